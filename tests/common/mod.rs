#![allow(dead_code)]

use chrono::NaiveDate;
use std::collections::BTreeMap;
use swimrank::model::{
    CategoryCode, EventType, Gender, Meeting, MeetingId, PoolType, ResultRecord, Season, Swimmer, SwimmerId,
    Timing,
};

pub const SEASON_ID: u64 = 24;

/// Default balanced meeting bound: 100 + 100 + 8 + 10.
pub const BALANCED_MEETING_MAX: f64 = 218.0;

/// Default enhanced meeting bound: 150 + 100 + 10 + 8 + 10.
pub const ENHANCED_MEETING_MAX: f64 = 278.0;

pub fn date(day: u32) -> NaiveDate {
    // Day 1 is 2024-10-01; later days roll into the following months.
    NaiveDate::from_ymd_opt(2024, 10, 1).unwrap() + chrono::Days::new(u64::from(day.saturating_sub(1)))
}

pub fn ev(code: &str) -> EventType {
    code.parse().unwrap()
}

pub fn secs(s: f64) -> Timing {
    Timing::from_hundredths((s * 100.0).round() as u32)
}

/// Builder for ResultRecord to clean up tests
pub struct ResultBuilder {
    result: ResultRecord,
}

impl ResultBuilder {
    pub fn new(id: u64, swimmer_id: SwimmerId) -> Self {
        Self {
            result: ResultRecord::builder()
                .id(id)
                .swimmer_id(swimmer_id)
                .team_id(1)
                .season_id(SEASON_ID)
                .meeting_id(1)
                .event_date(date(1))
                .event_type(ev("50FS"))
                .category("M25")
                .gender(Gender::Male)
                .timing(secs(30.0))
                .build(),
        }
    }

    pub fn event(mut self, code: &str) -> Self {
        self.result.event_type = ev(code);
        self
    }

    pub fn time(mut self, seconds: f64) -> Self {
        self.result.timing = secs(seconds);
        self
    }

    pub fn timing(mut self, timing: Timing) -> Self {
        self.result.timing = timing;
        self
    }

    pub fn pool(mut self, pool: PoolType) -> Self {
        self.result.pool = pool;
        self
    }

    pub fn gender(mut self, gender: Gender) -> Self {
        self.result.gender = gender;
        self
    }

    pub fn category(mut self, code: &str) -> Self {
        self.result.category = CategoryCode::new(code);
        self
    }

    pub fn meeting(mut self, meeting_id: MeetingId, day: u32) -> Self {
        self.result.meeting_id = meeting_id;
        self.result.event_date = date(day);
        self
    }

    pub fn team(mut self, team_id: u64) -> Self {
        self.result.team_id = team_id;
        self
    }

    pub fn rank(mut self, rank: u32) -> Self {
        self.result.rank = rank;
        self
    }

    pub fn points(mut self, event_points: f64) -> Self {
        self.result.event_points = event_points;
        self
    }

    pub fn disqualified(mut self) -> Self {
        self.result.is_disqualified = true;
        self
    }

    pub fn out_of_race(mut self) -> Self {
        self.result.is_out_of_race = true;
        self
    }

    pub fn updated(mut self, day: u32) -> Self {
        self.result.updated_at = date(day).and_hms_opt(12, 0, 0).unwrap();
        self
    }

    pub fn build(self) -> ResultRecord {
        self.result
    }
}

/// Wraps results into a season; meetings, swimmers, categories and events
/// are derived from the results themselves.
pub fn season_with(results: Vec<ResultRecord>) -> Season {
    let mut meetings: BTreeMap<MeetingId, Meeting> = BTreeMap::new();
    let mut swimmers: BTreeMap<SwimmerId, Swimmer> = BTreeMap::new();
    let mut categories = Vec::new();
    let mut events = Vec::new();

    for r in &results {
        let meeting = meetings.entry(r.meeting_id).or_insert_with(|| Meeting {
            id: r.meeting_id,
            description: format!("Meeting {}", r.meeting_id),
            header_date: r.event_date,
            pool: r.pool,
            events: Vec::new(),
        });
        meeting.header_date = meeting.header_date.min(r.event_date);
        if !meeting.events.contains(&r.event_type) {
            meeting.events.push(r.event_type);
        }

        swimmers.entry(r.swimmer_id).or_insert_with(|| Swimmer {
            id: r.swimmer_id,
            complete_name: format!("Swimmer {}", r.swimmer_id),
            gender: r.gender,
            year_of_birth: None,
        });
        if !categories.contains(&r.category) {
            categories.push(r.category.clone());
        }
        if !events.contains(&r.event_type) {
            events.push(r.event_type);
        }
    }

    Season {
        id: SEASON_ID,
        description: "Season 2024/2025".to_string(),
        begin_date: date(1),
        end_date: date(270),
        category_codes: categories,
        event_types: events,
        meetings: meetings.into_values().collect(),
        swimmers: swimmers.into_values().collect(),
        teams: Vec::new(),
        results,
    }
}
