use crate::error::{EngineError, EngineResult};
use crate::model::codes::{CategoryCode, EventType, Gender, PoolType};
use crate::model::result::{MeetingId, ResultRecord, SeasonId, SwimmerId, TeamId};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Meeting {
    pub id: MeetingId,
    pub description: String,
    pub header_date: NaiveDate,
    pub pool: PoolType,
    /// Event program offered by the meeting.
    #[serde(default)]
    pub events: Vec<EventType>,
}

impl Meeting {
    pub fn offers(&self, event: EventType) -> bool {
        self.events.contains(&event)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Swimmer {
    pub id: SwimmerId,
    pub complete_name: String,
    pub gender: Gender,
    #[serde(default)]
    pub year_of_birth: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Team {
    pub id: TeamId,
    pub name: String,
}

/// A season with every result acquired for it, as handed over by the persistence layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Season {
    pub id: SeasonId,
    pub description: String,
    pub begin_date: NaiveDate,
    pub end_date: NaiveDate,
    pub category_codes: Vec<CategoryCode>,
    pub event_types: Vec<EventType>,
    #[serde(default)]
    pub meetings: Vec<Meeting>,
    #[serde(default)]
    pub swimmers: Vec<Swimmer>,
    #[serde(default)]
    pub teams: Vec<Team>,
    #[serde(default)]
    pub results: Vec<ResultRecord>,
}

impl Season {
    pub fn valid_results(&self) -> impl Iterator<Item = &ResultRecord> {
        self.results.iter().filter(|r| r.is_valid())
    }

    pub fn results_for_meeting(&self, meeting_id: MeetingId) -> Vec<&ResultRecord> {
        self.valid_results()
            .filter(|r| r.meeting_id == meeting_id)
            .collect()
    }

    pub fn results_for_swimmer(&self, swimmer_id: SwimmerId) -> Vec<&ResultRecord> {
        self.valid_results()
            .filter(|r| r.swimmer_id == swimmer_id)
            .collect()
    }

    /// Swimmers with at least one valid result in the given gender/category cell.
    pub fn swimmers_in(&self, gender: Gender, category: &CategoryCode) -> BTreeSet<SwimmerId> {
        self.valid_results()
            .filter(|r| r.gender == gender && &r.category == category)
            .map(|r| r.swimmer_id)
            .collect()
    }

    pub fn meeting(&self, id: MeetingId) -> Option<&Meeting> {
        self.meetings.iter().find(|m| m.id == id)
    }

    pub fn swimmer(&self, id: SwimmerId) -> Option<&Swimmer> {
        self.swimmers.iter().find(|s| s.id == id)
    }

    pub fn team(&self, id: TeamId) -> Option<&Team> {
        self.teams.iter().find(|t| t.id == id)
    }

    /// Declared categories plus any category seen in the results.
    pub fn known_categories(&self) -> BTreeSet<CategoryCode> {
        self.category_codes
            .iter()
            .cloned()
            .chain(self.results.iter().map(|r| r.category.clone()))
            .collect()
    }

    /// Declared events plus any event seen in the results.
    pub fn known_events(&self) -> BTreeSet<EventType> {
        self.event_types
            .iter()
            .copied()
            .chain(self.results.iter().map(|r| r.event_type))
            .collect()
    }

    /// Meetings whose program includes the event.
    pub fn events_offered(&self, event: EventType) -> usize {
        self.meetings.iter().filter(|m| m.offers(event)).count()
    }
}

/// The scope a computation is asked to run on.
#[derive(Debug, Clone, Copy)]
pub enum Scope<'a> {
    Season(&'a Season),
    Meeting(&'a Meeting),
    Swimmer(&'a Swimmer),
    Team(&'a Team),
}

impl<'a> Scope<'a> {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Season(_) => "season",
            Self::Meeting(_) => "meeting",
            Self::Swimmer(_) => "swimmer",
            Self::Team(_) => "team",
        }
    }

    /// Season-level drivers only accept a season.
    pub fn require_season(&self) -> EngineResult<&'a Season> {
        match self {
            Self::Season(season) => Ok(season),
            other => Err(EngineError::InvalidArgument(format!(
                "expected a season scope, got a {}",
                other.kind()
            ))),
        }
    }
}
