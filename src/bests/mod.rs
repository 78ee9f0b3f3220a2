pub mod ponderated;
pub mod seasonal;

pub use self::ponderated::{PonderatedBest, PonderatedStandards, StoragePlan, StoreSummary};
pub use self::seasonal::{SeasonalEventBest, SeasonalEventBests};
