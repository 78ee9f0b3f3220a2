//! Capabilities the engine borrows from the surrounding application.
//!
//! Each one is a trait so the persistence layer can plug in its own
//! implementation; the in-memory versions below back the CLI and the tests.

use crate::error::{EngineError, EngineResult};
use crate::model::{CategoryCode, EventType, Gender, PoolType, SeasonId, Stroke, SwimmerId, Timing};
use fnv::FnvHashMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Translates a time swum on one standard course onto the other one.
pub trait CourseConverter: Sync {
    /// Converts `timing`, swum in `from_pool`, to its `from_pool.other()` equivalent.
    fn convert(&self, timing: Timing, gender: Gender, event: EventType, from_pool: PoolType) -> Timing;

    fn convert_to(
        &self,
        timing: Timing,
        gender: Gender,
        event: EventType,
        from_pool: PoolType,
        to_pool: PoolType,
    ) -> Timing {
        if from_pool == to_pool || timing.is_zero() {
            timing
        } else {
            self.convert(timing, gender, event, from_pool)
        }
    }
}

/// Converts by crediting (or charging) a fixed time per extra short-course turn.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TurnBasedConverter {
    /// Hundredths gained per turn, indexed by stroke, for male swimmers.
    pub male_turn_gain: [u32; 5],
    /// Hundredths gained per turn, indexed by stroke, for female swimmers.
    pub female_turn_gain: [u32; 5],
}

impl Default for TurnBasedConverter {
    fn default() -> Self {
        Self {
            // FS, BK, BR, FL, IM
            male_turn_gain: [40, 60, 50, 35, 45],
            female_turn_gain: [45, 65, 55, 40, 50],
        }
    }
}

impl TurnBasedConverter {
    fn stroke_index(stroke: Stroke) -> usize {
        match stroke {
            Stroke::Freestyle => 0,
            Stroke::Backstroke => 1,
            Stroke::Breaststroke => 2,
            Stroke::Butterfly => 3,
            Stroke::Medley => 4,
        }
    }

    pub fn turn_gain(&self, gender: Gender, stroke: Stroke) -> u32 {
        let idx = Self::stroke_index(stroke);
        match gender {
            Gender::Male => self.male_turn_gain[idx],
            Gender::Female => self.female_turn_gain[idx],
        }
    }
}

impl CourseConverter for TurnBasedConverter {
    fn convert(&self, timing: Timing, gender: Gender, event: EventType, from_pool: PoolType) -> Timing {
        let delta = (event.extra_short_course_turns() * self.turn_gain(gender, event.stroke)) as i64;
        match from_pool {
            PoolType::Pool50 => timing.offset(-delta),
            PoolType::Pool25 => timing.offset(delta),
        }
    }
}

/// Per-swimmer target times.
pub trait PersonalStandards: Sync {
    fn personal_standard(
        &self,
        season_id: SeasonId,
        swimmer_id: SwimmerId,
        pool: PoolType,
        event: EventType,
    ) -> Option<Timing>;
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PersonalStandardKey {
    pub season_id: SeasonId,
    pub swimmer_id: SwimmerId,
    pub pool: PoolType,
    pub event: EventType,
}

#[derive(Debug, Clone, Default)]
pub struct InMemoryPersonalStandards {
    standards: FnvHashMap<PersonalStandardKey, Timing>,
}

impl InMemoryPersonalStandards {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(
        &mut self,
        season_id: SeasonId,
        swimmer_id: SwimmerId,
        pool: PoolType,
        event: EventType,
        timing: Timing,
    ) {
        let key = PersonalStandardKey {
            season_id,
            swimmer_id,
            pool,
            event,
        };
        self.standards.insert(key, timing);
    }

    pub fn len(&self) -> usize {
        self.standards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.standards.is_empty()
    }
}

impl PersonalStandards for InMemoryPersonalStandards {
    fn personal_standard(
        &self,
        season_id: SeasonId,
        swimmer_id: SwimmerId,
        pool: PoolType,
        event: EventType,
    ) -> Option<Timing> {
        let key = PersonalStandardKey {
            season_id,
            swimmer_id,
            pool,
            event,
        };
        self.standards.get(&key).copied().filter(|t| !t.is_zero())
    }
}

/// Category-wide target time produced from a ponderated best.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct StandardKey {
    pub season_id: SeasonId,
    pub gender: Gender,
    pub category: CategoryCode,
    pub event: EventType,
    pub pool: PoolType,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeStandard {
    pub key: StandardKey,
    pub timing: Timing,
}

/// Write seam for time standards.
pub trait TimeStandardSink {
    fn exists(&self, key: &StandardKey) -> EngineResult<bool>;
    fn insert(&mut self, standard: &TimeStandard) -> EngineResult<()>;
    fn update(&mut self, standard: &TimeStandard) -> EngineResult<()>;
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InMemoryTimeStandards {
    standards: Vec<TimeStandard>,
}

impl InMemoryTimeStandards {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &StandardKey) -> Option<&TimeStandard> {
        self.standards.iter().find(|s| &s.key == key)
    }

    pub fn standards(&self) -> &[TimeStandard] {
        &self.standards
    }

    pub fn len(&self) -> usize {
        self.standards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.standards.is_empty()
    }
}

impl TimeStandardSink for InMemoryTimeStandards {
    fn exists(&self, key: &StandardKey) -> EngineResult<bool> {
        Ok(self.get(key).is_some())
    }

    fn insert(&mut self, standard: &TimeStandard) -> EngineResult<()> {
        if self.get(&standard.key).is_some() {
            return Err(EngineError::Store(format!(
                "standard {:?} already exists",
                standard.key
            )));
        }
        debug!("Inserting time standard {:?} = {}", standard.key, standard.timing);
        self.standards.push(standard.clone());
        Ok(())
    }

    fn update(&mut self, standard: &TimeStandard) -> EngineResult<()> {
        let slot = self
            .standards
            .iter_mut()
            .find(|s| s.key == standard.key)
            .ok_or_else(|| EngineError::Store(format!("standard {:?} not found", standard.key)))?;
        debug!("Updating time standard {:?}: {} -> {}", standard.key, slot.timing, standard.timing);
        slot.timing = standard.timing;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn long_course_converts_faster_on_short_course() {
        let conv = TurnBasedConverter::default();
        let ev = EventType::new(100, Stroke::Freestyle);
        let lc = Timing::from_parts(1, 0, 0);
        let sc = conv.convert(lc, Gender::Male, ev, PoolType::Pool50);
        assert_eq!(sc.to_hundredths(), 6000 - 2 * 40);
        assert_eq!(conv.convert(sc, Gender::Male, ev, PoolType::Pool25), lc);
    }

    #[test]
    fn same_course_is_untouched() {
        let conv = TurnBasedConverter::default();
        let ev = EventType::new(50, Stroke::Butterfly);
        let t = Timing::from_parts(0, 30, 0);
        assert_eq!(conv.convert_to(t, Gender::Female, ev, PoolType::Pool25, PoolType::Pool25), t);
    }

    #[test]
    fn sink_rejects_double_insert_and_missing_update() {
        let mut sink = InMemoryTimeStandards::new();
        let standard = TimeStandard {
            key: StandardKey {
                season_id: 1,
                gender: Gender::Male,
                category: CategoryCode::new("M25"),
                event: EventType::new(50, Stroke::Freestyle),
                pool: PoolType::Pool25,
            },
            timing: Timing::from_parts(0, 30, 0),
        };
        assert!(sink.update(&standard).is_err());
        sink.insert(&standard).unwrap();
        assert!(sink.insert(&standard).is_err());
        assert!(sink.exists(&standard.key).unwrap());
    }
}
