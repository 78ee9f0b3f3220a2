pub mod codes;
pub mod result;
pub mod season;
pub mod timing;

pub use self::codes::{CategoryCode, EventType, Gender, PoolType, RecordType, Stroke};
pub use self::result::{
    IndividualRecord, MeetingId, Recordable, ResultId, ResultRecord, SeasonId, SwimmerId, TeamId,
};
pub use self::season::{Meeting, Scope, Season, Swimmer, Team};
pub use self::timing::Timing;
