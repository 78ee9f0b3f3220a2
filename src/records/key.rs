use crate::consts::{KEY_DELIMITER, TIE_TOKEN};
use crate::model::{CategoryCode, EventType, Gender, PoolType, RecordType, Recordable};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Address of one slot of a record board.
///
/// Equality is structural. The tie slot is a separate key with `is_tie` set,
/// so a primary holder and a co-holder never share a map entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RecordKey {
    pub record_type: RecordType,
    pub pool: PoolType,
    pub event: EventType,
    pub category: Option<CategoryCode>,
    pub gender: Option<Gender>,
    pub is_tie: bool,
}

impl RecordKey {
    /// Builds the primary key, dropping the dimensions the record type does not use.
    pub fn new(
        record_type: RecordType,
        pool: PoolType,
        event: EventType,
        category: Option<CategoryCode>,
        gender: Option<Gender>,
    ) -> Self {
        Self {
            record_type,
            pool,
            event,
            category: category.filter(|_| record_type.uses_category()),
            gender: gender.filter(|_| record_type.uses_gender()),
            is_tie: false,
        }
    }

    pub fn for_record<R: Recordable>(record: &R, record_type: RecordType) -> Self {
        Self::new(
            record_type,
            record.pool(),
            record.event_type(),
            Some(record.category().clone()),
            Some(record.gender()),
        )
    }

    pub fn tie_slot(&self) -> Self {
        Self {
            is_tie: true,
            ..self.clone()
        }
    }

    pub fn primary_slot(&self) -> Self {
        Self {
            is_tie: false,
            ..self.clone()
        }
    }

    /// Wildcard match: `None` for category or gender matches any value.
    pub fn matches(
        &self,
        record_type: RecordType,
        pool: PoolType,
        event: EventType,
        category: Option<&CategoryCode>,
        gender: Option<Gender>,
    ) -> bool {
        self.record_type == record_type
            && self.pool == pool
            && self.event == event
            && category.map_or(true, |c| self.category.as_ref() == Some(c))
            && gender.map_or(true, |g| self.gender == Some(g))
    }

    /// Delimiter-joined form, e.g. `FOR|25|50FS|M25|M`.
    pub fn encode(&self) -> String {
        let mut parts = vec![
            self.record_type.to_string(),
            self.pool.to_string(),
            self.event.to_string(),
        ];
        if let Some(category) = &self.category {
            parts.push(category.to_string());
        }
        if let Some(gender) = self.gender {
            parts.push(gender.to_string());
        }
        if self.is_tie {
            parts.push(TIE_TOKEN.to_string());
        }
        parts.join(&KEY_DELIMITER.to_string())
    }
}

impl fmt::Display for RecordKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encode())
    }
}
