use crate::consts::LONG_COURSE_LENGTH;
use crate::error::EngineError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use strum_macros::{Display, EnumIter, EnumString};

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    EnumIter,
    EnumString,
    Display,
    Serialize,
    Deserialize,
)]
pub enum Gender {
    #[strum(serialize = "M")]
    #[serde(rename = "M")]
    Male,
    #[strum(serialize = "F")]
    #[serde(rename = "F")]
    Female,
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    EnumIter,
    EnumString,
    Display,
    Serialize,
    Deserialize,
)]
pub enum PoolType {
    #[strum(serialize = "25")]
    #[serde(rename = "25")]
    Pool25,
    #[strum(serialize = "50")]
    #[serde(rename = "50")]
    Pool50,
}

impl PoolType {
    pub fn length_in_meters(&self) -> u32 {
        match self {
            Self::Pool25 => 25,
            Self::Pool50 => 50,
        }
    }

    /// The opposite standard course.
    pub fn other(&self) -> Self {
        match self {
            Self::Pool25 => Self::Pool50,
            Self::Pool50 => Self::Pool25,
        }
    }
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    EnumIter,
    EnumString,
    Display,
    Serialize,
    Deserialize,
)]
pub enum Stroke {
    #[strum(serialize = "FS")]
    #[serde(rename = "FS")]
    Freestyle,
    #[strum(serialize = "BK")]
    #[serde(rename = "BK")]
    Backstroke,
    #[strum(serialize = "BR")]
    #[serde(rename = "BR")]
    Breaststroke,
    #[strum(serialize = "FL")]
    #[serde(rename = "FL")]
    Butterfly,
    #[strum(serialize = "IM")]
    #[serde(rename = "IM")]
    Medley,
}

/// An individual event, e.g. `100FS`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EventType {
    pub stroke: Stroke,
    pub distance: u32,
}

impl EventType {
    pub fn new(distance: u32, stroke: Stroke) -> Self {
        Self { stroke, distance }
    }

    pub fn code(&self) -> String {
        self.to_string()
    }

    /// Number of extra turns swum in a short-course pool compared to a long-course one.
    pub fn extra_short_course_turns(&self) -> u32 {
        self.distance / LONG_COURSE_LENGTH
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.distance, self.stroke)
    }
}

impl FromStr for EventType {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let split = s
            .find(|c: char| !c.is_ascii_digit())
            .ok_or_else(|| EngineError::Parse(format!("Event code '{}' has no stroke", s)))?;
        let (digits, stroke) = s.split_at(split);
        let distance: u32 = digits
            .parse()
            .map_err(|_| EngineError::Parse(format!("Event code '{}' has no distance", s)))?;
        if distance == 0 {
            return Err(EngineError::Parse(format!("Event code '{}' has zero distance", s)));
        }
        let stroke = Stroke::from_str(stroke)
            .map_err(|_| EngineError::Parse(format!("Unknown stroke '{}' in '{}'", stroke, s)))?;
        Ok(Self::new(distance, stroke))
    }
}

impl TryFrom<String> for EventType {
    type Error = EngineError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<EventType> for String {
    fn from(value: EventType) -> Self {
        value.to_string()
    }
}

/// Federation age-group category code (`M25`, `U25`, ...).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryCode(String);

impl CategoryCode {
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into().trim().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CategoryCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CategoryCode {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Default,
    EnumIter,
    EnumString,
    Display,
    Serialize,
    Deserialize,
)]
pub enum RecordType {
    /// Generic overall record, used when nothing else is known.
    #[default]
    #[strum(serialize = "FOR")]
    #[serde(rename = "FOR")]
    FederationRecord,
    #[strum(serialize = "TTB")]
    #[serde(rename = "TTB")]
    TeamRecord,
    #[strum(serialize = "SPB")]
    #[serde(rename = "SPB")]
    SwimmerPersonalBest,
    #[strum(serialize = "MRB")]
    #[serde(rename = "MRB")]
    MeetingRecord,
    #[strum(serialize = "SEB")]
    #[serde(rename = "SEB")]
    SeasonalBest,
}

impl RecordType {
    /// Personal bests belong to one swimmer, so category and gender do not split them.
    pub fn uses_category(&self) -> bool {
        !matches!(self, Self::SwimmerPersonalBest)
    }

    pub fn uses_gender(&self) -> bool {
        !matches!(self, Self::SwimmerPersonalBest)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_codes_parse_and_print() {
        let ev: EventType = "100FS".parse().unwrap();
        assert_eq!(ev, EventType::new(100, Stroke::Freestyle));
        assert_eq!(ev.to_string(), "100FS");
        assert_eq!(ev.extra_short_course_turns(), 2);
    }

    #[test]
    fn bad_event_codes_are_rejected() {
        assert!("FS".parse::<EventType>().is_err());
        assert!("100XX".parse::<EventType>().is_err());
        assert!("0FS".parse::<EventType>().is_err());
    }

    #[test]
    fn pool_other_is_symmetric() {
        assert_eq!(PoolType::Pool25.other(), PoolType::Pool50);
        assert_eq!(PoolType::Pool50.other().other(), PoolType::Pool50);
    }

    #[test]
    fn personal_bests_drop_category_and_gender() {
        assert!(!RecordType::SwimmerPersonalBest.uses_category());
        assert!(RecordType::TeamRecord.uses_gender());
        assert_eq!(RecordType::default().to_string(), "FOR");
    }
}
