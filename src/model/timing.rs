use crate::consts::{HUNDREDTHS_PER_MINUTE, HUNDREDTHS_PER_SECOND};
use crate::error::EngineError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A swim time, stored as total hundredths of a second.
///
/// Zero is the neutral "no timing" sentinel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timing {
    hundredths: u32,
}

impl Timing {
    pub const fn from_hundredths(hundredths: u32) -> Self {
        Self { hundredths }
    }

    /// Saturates on overflow; use `try_from_parts` for untrusted input.
    pub fn from_parts(minutes: u32, seconds: u32, hundredths: u32) -> Self {
        Self::try_from_parts(minutes, seconds, hundredths).unwrap_or(Self::from_hundredths(u32::MAX))
    }

    /// `None` when the total does not fit in hundredths.
    pub fn try_from_parts(minutes: u32, seconds: u32, hundredths: u32) -> Option<Self> {
        minutes
            .checked_mul(HUNDREDTHS_PER_MINUTE)?
            .checked_add(seconds.checked_mul(HUNDREDTHS_PER_SECOND)?)?
            .checked_add(hundredths)
            .map(Self::from_hundredths)
    }

    pub const fn zero() -> Self {
        Self { hundredths: 0 }
    }

    pub fn is_zero(&self) -> bool {
        self.hundredths == 0
    }

    pub fn to_hundredths(&self) -> u32 {
        self.hundredths
    }

    pub fn minutes(&self) -> u32 {
        self.hundredths / HUNDREDTHS_PER_MINUTE
    }

    pub fn seconds(&self) -> u32 {
        (self.hundredths % HUNDREDTHS_PER_MINUTE) / HUNDREDTHS_PER_SECOND
    }

    pub fn hundredths_part(&self) -> u32 {
        self.hundredths % HUNDREDTHS_PER_SECOND
    }

    /// Adds a signed hundredths delta, saturating at zero.
    pub fn offset(&self, delta: i64) -> Self {
        let value = (self.hundredths as i64 + delta).clamp(0, u32::MAX as i64);
        Self::from_hundredths(value as u32)
    }
}

impl fmt::Display for Timing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}'{:02}\"{:02}",
            self.minutes(),
            self.seconds(),
            self.hundredths_part()
        )
    }
}

fn invalid(whole: &str) -> EngineError {
    EngineError::Parse(format!("Invalid timing '{}'", whole))
}

fn parse_number(part: &str, whole: &str) -> Result<u32, EngineError> {
    part.trim().parse::<u32>().map_err(|_| invalid(whole))
}

/// Rejects parts past their unit, then builds the timing without overflow.
fn checked_timing(minutes: Option<u32>, seconds: u32, hundredths: u32, whole: &str) -> Result<Timing, EngineError> {
    if hundredths >= HUNDREDTHS_PER_SECOND || (minutes.is_some() && seconds >= 60) {
        return Err(invalid(whole));
    }
    Timing::try_from_parts(minutes.unwrap_or(0), seconds, hundredths).ok_or_else(|| invalid(whole))
}

/// Parses `ss.hh` fractional seconds into (seconds, hundredths).
fn parse_seconds(part: &str, whole: &str) -> Result<(u32, u32), EngineError> {
    match part.split_once('.') {
        Some((secs, frac)) => {
            let frac = frac.trim();
            let hundredths = match frac.len() {
                0 => 0,
                1 => parse_number(frac, whole)? * 10,
                2 => parse_number(frac, whole)?,
                _ => return Err(invalid(whole)),
            };
            Ok((parse_number(secs, whole)?, hundredths))
        }
        None => Ok((parse_number(part, whole)?, 0)),
    }
}

impl FromStr for Timing {
    type Err = EngineError;

    /// Accepts `1'05"30`, `1:05.30` and `65.30`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(EngineError::Parse("Empty timing".to_string()));
        }

        if let Some((min, rest)) = s.split_once('\'') {
            let rest = rest.trim_end_matches('"');
            let (sec, hun) = rest.split_once('"').unwrap_or((rest, "0"));
            return checked_timing(
                Some(parse_number(min, s)?),
                parse_number(sec, s)?,
                parse_number(hun, s)?,
                s,
            );
        }

        let (minutes, seconds_part) = match s.split_once(':') {
            Some((min, rest)) => (Some(parse_number(min, s)?), rest),
            None => (None, s),
        };
        let (seconds, hundredths) = parse_seconds(seconds_part, s)?;
        checked_timing(minutes, seconds, hundredths, s)
    }
}
