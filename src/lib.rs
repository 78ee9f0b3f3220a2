pub mod bests;
pub mod collaborators;
pub mod config;
pub mod consts;
pub mod dataset;
pub mod error;
pub mod model;
pub mod ranking;
pub mod records;
// The CLI front end (cmd, reports) lives with the binary in main.rs.

pub use error::{EngineError, EngineResult};
