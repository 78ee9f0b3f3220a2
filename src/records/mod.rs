pub mod board;
pub mod collection;
pub mod key;

pub use self::board::{BoardOwner, BoardSlot, RecordBoard, RecordProjection, SlotOverrides};
pub use self::collection::{AddOutcome, RecordCollection, RecordEntry};
pub use self::key::RecordKey;

use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

/// How an occupied slot reacts to a new candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, Serialize, Deserialize)]
#[strum(serialize_all = "snake_case")]
pub enum ReplacePolicy {
    /// Replace only with a strictly faster timing.
    OnlyIfBetter,
    /// Last write wins; callers are trusted to pass vetted bests.
    Always,
}
