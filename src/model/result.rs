use crate::model::codes::{CategoryCode, EventType, Gender, PoolType, RecordType};
use crate::model::timing::Timing;
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use typed_builder::TypedBuilder;

pub type ResultId = u64;
pub type SwimmerId = u64;
pub type TeamId = u64;
pub type SeasonId = u64;
pub type MeetingId = u64;

/// One swimmer's timed performance in one event at one meeting.
///
/// Owned by the persistence layer; the engine only reads it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TypedBuilder)]
pub struct ResultRecord {
    pub id: ResultId,
    pub swimmer_id: SwimmerId,
    #[builder(default)]
    pub team_id: TeamId,
    #[builder(default)]
    pub season_id: SeasonId,
    #[builder(default)]
    pub meeting_id: MeetingId,
    #[builder(default = NaiveDate::MIN)]
    pub event_date: NaiveDate,
    pub event_type: EventType,
    #[builder(setter(into))]
    pub category: CategoryCode,
    pub gender: Gender,
    #[builder(default = PoolType::Pool25)]
    pub pool: PoolType,
    pub timing: Timing,
    #[builder(default)]
    #[serde(default)]
    pub rank: u32,
    #[builder(default)]
    #[serde(default)]
    pub is_disqualified: bool,
    #[builder(default)]
    #[serde(default)]
    pub is_out_of_race: bool,
    #[builder(default)]
    #[serde(default)]
    pub standard_points: f64,
    #[builder(default)]
    #[serde(default)]
    pub meeting_points: f64,
    #[builder(default)]
    #[serde(default)]
    pub goggle_cup_points: f64,
    /// Federation-assigned score carried into the rankings.
    #[builder(default)]
    #[serde(default)]
    pub event_points: f64,
    #[builder(default = NaiveDateTime::MIN)]
    #[serde(default)]
    pub updated_at: NaiveDateTime,
}

impl ResultRecord {
    /// Usable for rankings and records: swum, timed and in race.
    pub fn is_valid(&self) -> bool {
        !self.is_disqualified && !self.is_out_of_race && !self.timing.is_zero()
    }

    pub fn is_medal(&self) -> bool {
        (1..=3).contains(&self.rank)
    }
}

/// Snapshot of a record-holding result, as written back by the record writers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndividualRecord {
    pub record_type: RecordType,
    pub result_id: ResultId,
    pub swimmer_id: SwimmerId,
    pub team_id: TeamId,
    pub season_id: SeasonId,
    pub meeting_id: MeetingId,
    pub event_type: EventType,
    pub category: CategoryCode,
    pub gender: Gender,
    pub pool: PoolType,
    pub timing: Timing,
    pub updated_at: NaiveDateTime,
}

impl IndividualRecord {
    pub fn from_result(result: &ResultRecord, record_type: RecordType) -> Self {
        Self {
            record_type,
            result_id: result.id,
            swimmer_id: result.swimmer_id,
            team_id: result.team_id,
            season_id: result.season_id,
            meeting_id: result.meeting_id,
            event_type: result.event_type,
            category: result.category.clone(),
            gender: result.gender,
            pool: result.pool,
            timing: result.timing,
            updated_at: result.updated_at,
        }
    }
}

/// Common view over anything that can hold a record slot.
pub trait Recordable {
    fn pool(&self) -> PoolType;
    fn event_type(&self) -> EventType;
    fn category(&self) -> &CategoryCode;
    fn gender(&self) -> Gender;
    fn swimmer_id(&self) -> SwimmerId;
    fn timing(&self) -> Timing;
    fn source_result_id(&self) -> ResultId;
    fn updated_at(&self) -> NaiveDateTime;

    /// Derived records carry their own type; raw results do not.
    fn own_record_type(&self) -> Option<RecordType> {
        None
    }
}

impl Recordable for ResultRecord {
    fn pool(&self) -> PoolType {
        self.pool
    }
    fn event_type(&self) -> EventType {
        self.event_type
    }
    fn category(&self) -> &CategoryCode {
        &self.category
    }
    fn gender(&self) -> Gender {
        self.gender
    }
    fn swimmer_id(&self) -> SwimmerId {
        self.swimmer_id
    }
    fn timing(&self) -> Timing {
        self.timing
    }
    fn source_result_id(&self) -> ResultId {
        self.id
    }
    fn updated_at(&self) -> NaiveDateTime {
        self.updated_at
    }
}

impl Recordable for IndividualRecord {
    fn pool(&self) -> PoolType {
        self.pool
    }
    fn event_type(&self) -> EventType {
        self.event_type
    }
    fn category(&self) -> &CategoryCode {
        &self.category
    }
    fn gender(&self) -> Gender {
        self.gender
    }
    fn swimmer_id(&self) -> SwimmerId {
        self.swimmer_id
    }
    fn timing(&self) -> Timing {
        self.timing
    }
    fn source_result_id(&self) -> ResultId {
        self.result_id
    }
    fn updated_at(&self) -> NaiveDateTime {
        self.updated_at
    }
    fn own_record_type(&self) -> Option<RecordType> {
        Some(self.record_type)
    }
}
