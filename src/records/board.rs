use crate::error::{EngineError, EngineResult};
use crate::model::{CategoryCode, EventType, Gender, MeetingId, PoolType, RecordType, ResultRecord, TeamId};
use crate::records::ReplacePolicy;
use serde::{Deserialize, Serialize};
use std::fmt;
use strum_macros::{Display, EnumIter, EnumString};
use tracing::debug;

/// Whoever the board keeps records for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum BoardOwner {
    Meeting(MeetingId),
    Team(TeamId),
    Federation(String),
}

impl BoardOwner {
    fn validate(&self) -> EngineResult<()> {
        match self {
            Self::Meeting(0) => Err(EngineError::InvalidArgument(
                "record board owner: meeting id must be set".to_string(),
            )),
            Self::Team(0) => Err(EngineError::InvalidArgument(
                "record board owner: team id must be set".to_string(),
            )),
            Self::Federation(name) if name.trim().is_empty() => Err(EngineError::InvalidArgument(
                "record board owner: federation name must not be empty".to_string(),
            )),
            _ => Ok(()),
        }
    }
}

impl fmt::Display for BoardOwner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Meeting(id) => write!(f, "meeting #{}", id),
            Self::Team(id) => write!(f, "team #{}", id),
            Self::Federation(name) => f.write_str(name),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BoardSlot {
    pub pool: PoolType,
    pub gender: Gender,
    pub event: EventType,
    pub category: CategoryCode,
}

impl BoardSlot {
    pub fn of(record: &ResultRecord) -> Self {
        Self {
            pool: record.pool,
            gender: record.gender,
            event: record.event_type,
            category: record.category.clone(),
        }
    }
}

/// Dimensions to use instead of the ones read off the record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SlotOverrides {
    pub category: Option<CategoryCode>,
    pub pool: Option<PoolType>,
    pub gender: Option<Gender>,
    pub event: Option<EventType>,
}

impl SlotOverrides {
    fn resolve(self, record: &ResultRecord) -> BoardSlot {
        BoardSlot {
            pool: self.pool.unwrap_or(record.pool),
            gender: self.gender.unwrap_or(record.gender),
            event: self.event.unwrap_or(record.event_type),
            category: self.category.unwrap_or_else(|| record.category.clone()),
        }
    }
}

/// Field projections available through `RecordBoard::get_record`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, EnumString, Display)]
#[strum(serialize_all = "snake_case")]
pub enum RecordProjection {
    Timing,
    EventDate,
    SwimmerId,
    TeamId,
    MeetingId,
    Rank,
}

impl RecordProjection {
    pub fn project(&self, record: &ResultRecord) -> String {
        match self {
            Self::Timing => record.timing.to_string(),
            Self::EventDate => record.event_date.format("%Y-%m-%d").to_string(),
            Self::SwimmerId => record.swimmer_id.to_string(),
            Self::TeamId => record.team_id.to_string(),
            Self::MeetingId => record.meeting_id.to_string(),
            Self::Rank => record.rank.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BoardEntry {
    pub slot: BoardSlot,
    pub record: ResultRecord,
}

/// Live pool × gender × event × category board of best results for one owner.
#[derive(Debug, Clone)]
pub struct RecordBoard {
    owner: BoardOwner,
    record_type: RecordType,
    policy: ReplacePolicy,
    entries: Vec<BoardEntry>,
}

impl RecordBoard {
    pub fn new(owner: BoardOwner, record_type: RecordType) -> EngineResult<Self> {
        owner.validate()?;
        if record_type == RecordType::SeasonalBest {
            return Err(EngineError::InvalidArgument(format!(
                "record board for {} cannot hold '{}' records",
                owner, record_type
            )));
        }
        Ok(Self {
            owner,
            record_type,
            policy: ReplacePolicy::Always,
            entries: Vec::new(),
        })
    }

    pub fn with_policy(mut self, policy: ReplacePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn owner(&self) -> &BoardOwner {
        &self.owner
    }

    pub fn record_type(&self) -> RecordType {
        self.record_type
    }

    pub fn add_record(&mut self, record: ResultRecord) -> bool {
        self.add_record_at(record, SlotOverrides::default())
    }

    /// Stores `record` in its slot. Returns false, leaving the board untouched,
    /// for unusable results or when the policy keeps the current holder.
    pub fn add_record_at(&mut self, record: ResultRecord, overrides: SlotOverrides) -> bool {
        if !record.is_valid() {
            debug!("Board {}: ignoring unusable result #{}", self.owner, record.id);
            return false;
        }
        let slot = overrides.resolve(&record);

        match self.position_of(&slot) {
            Some(idx) => {
                let held = &self.entries[idx].record;
                if self.policy == ReplacePolicy::OnlyIfBetter && record.timing >= held.timing {
                    return false;
                }
                debug!(
                    "Board {}: slot {:?} {} -> {}",
                    self.owner, slot, held.timing, record.timing
                );
                self.entries[idx].record = record;
            }
            None => {
                debug!("Board {}: new slot {:?} = {}", self.owner, slot, record.timing);
                self.entries.push(BoardEntry { slot, record });
            }
        }
        true
    }

    fn position_of(&self, slot: &BoardSlot) -> Option<usize> {
        self.entries.iter().position(|e| &e.slot == slot)
    }

    /// Zero-based position of the matching entry.
    pub fn has_record_for(
        &self,
        pool: PoolType,
        gender: Gender,
        event: EventType,
        category: &CategoryCode,
    ) -> Option<usize> {
        self.entries.iter().position(|e| {
            e.slot.pool == pool
                && e.slot.gender == gender
                && e.slot.event == event
                && &e.slot.category == category
        })
    }

    pub fn get_record_instance(
        &self,
        pool: PoolType,
        gender: Gender,
        event: EventType,
        category: &CategoryCode,
    ) -> Option<&ResultRecord> {
        self.has_record_for(pool, gender, event, category)
            .map(|idx| &self.entries[idx].record)
    }

    pub fn get_record(
        &self,
        pool: PoolType,
        gender: Gender,
        event: EventType,
        category: &CategoryCode,
        projection: RecordProjection,
    ) -> Option<String> {
        self.get_record_instance(pool, gender, event, category)
            .map(|r| projection.project(r))
    }

    pub fn delete_record(
        &mut self,
        pool: PoolType,
        gender: Gender,
        event: EventType,
        category: &CategoryCode,
    ) -> bool {
        match self.has_record_for(pool, gender, event, category) {
            Some(idx) => {
                self.entries.remove(idx);
                true
            }
            None => false,
        }
    }

    pub fn record_count(&self) -> usize {
        self.entries.len()
    }

    pub fn entries(&self) -> impl Iterator<Item = &BoardEntry> {
        self.entries.iter()
    }
}
