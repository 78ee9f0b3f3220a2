use crate::consts::EMPTY_CACHE_KEY;
use crate::model::{CategoryCode, EventType, Gender, PoolType, RecordType, Recordable};
use crate::records::key::RecordKey;
use crate::records::ReplacePolicy;
use fnv::FnvHashMap;
use itertools::Itertools;
use sha2::{Digest, Sha256};
use tracing::debug;

#[derive(Debug, Clone, PartialEq)]
pub struct RecordEntry<R> {
    pub key: RecordKey,
    pub record: R,
}

/// What `RecordCollection::add` did with a record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddOutcome {
    Inserted(RecordKey),
    Replaced(RecordKey),
    Tied(RecordKey),
    Kept(RecordKey),
}

impl AddOutcome {
    pub fn key(&self) -> &RecordKey {
        match self {
            Self::Inserted(k) | Self::Replaced(k) | Self::Tied(k) | Self::Kept(k) => k,
        }
    }

    pub fn is_stored(&self) -> bool {
        !matches!(self, Self::Kept(_))
    }
}

/// Best record per key, with tie-in tracking.
///
/// Entries keep insertion order; the index maps each key to its position.
#[derive(Debug, Clone)]
pub struct RecordCollection<R> {
    default_type: RecordType,
    policy: ReplacePolicy,
    entries: Vec<RecordEntry<R>>,
    index: FnvHashMap<RecordKey, usize>,
}

impl<R: Recordable + Clone> RecordCollection<R> {
    pub fn new(default_type: Option<RecordType>) -> Self {
        Self {
            default_type: default_type.unwrap_or_default(),
            policy: ReplacePolicy::OnlyIfBetter,
            entries: Vec::new(),
            index: FnvHashMap::default(),
        }
    }

    pub fn from_record(record: R, record_type: Option<RecordType>) -> Self {
        Self::from_records(std::iter::once(record), record_type)
    }

    /// The discriminator is the explicit type, else the first record's own type,
    /// else the generic overall type.
    pub fn from_records<I>(records: I, record_type: Option<RecordType>) -> Self
    where
        I: IntoIterator<Item = R>,
    {
        let mut records = records.into_iter().peekable();
        let discriminator = record_type.or_else(|| records.peek().and_then(|r| r.own_record_type()));
        let mut collection = Self::new(discriminator);
        for record in records {
            collection.add(record, None);
        }
        collection
    }

    pub fn with_policy(mut self, policy: ReplacePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn policy(&self) -> ReplacePolicy {
        self.policy
    }

    pub fn default_type(&self) -> RecordType {
        self.default_type
    }

    fn resolve_type(&self, record: &R, record_type: Option<RecordType>) -> RecordType {
        record_type
            .or_else(|| record.own_record_type())
            .unwrap_or(self.default_type)
    }

    fn push(&mut self, key: RecordKey, record: R) {
        self.index.insert(key.clone(), self.entries.len());
        self.entries.push(RecordEntry { key, record });
    }

    pub fn add(&mut self, record: R, record_type: Option<RecordType>) -> AddOutcome {
        let record_type = self.resolve_type(&record, record_type);
        let key = RecordKey::for_record(&record, record_type);

        let Some(&idx) = self.index.get(&key) else {
            debug!("Record slot {} filled by swimmer {}", key, record.swimmer_id());
            self.push(key.clone(), record);
            return AddOutcome::Inserted(key);
        };

        let holder = &self.entries[idx].record;
        let (held_timing, held_swimmer) = (holder.timing(), holder.swimmer_id());

        if record.timing() == held_timing && record.swimmer_id() != held_swimmer {
            let tie = key.tie_slot();
            if self.index.contains_key(&tie) {
                return AddOutcome::Kept(tie);
            }
            debug!("Record slot {} tied by swimmer {}", key, record.swimmer_id());
            self.push(tie.clone(), record);
            return AddOutcome::Tied(tie);
        }

        let improves = record.timing() < held_timing;
        if !improves && self.policy == ReplacePolicy::OnlyIfBetter {
            return AddOutcome::Kept(key);
        }

        debug!(
            "Record slot {} replaced: {} -> {}",
            key,
            held_timing,
            record.timing()
        );
        let timing_changed = record.timing() != held_timing;
        self.entries[idx].record = record;
        if timing_changed {
            // A co-holder only ties the time it was stored against.
            self.remove_slot(&key.tie_slot());
        }
        AddOutcome::Replaced(key)
    }

    pub fn delete(&mut self, record: &R, record_type: Option<RecordType>) -> bool {
        let record_type = self.resolve_type(record, record_type);
        let key = RecordKey::for_record(record, record_type);
        let tie = key.tie_slot();
        let target = [key, tie].into_iter().find(|k| {
            self.get(k)
                .is_some_and(|e| e.record.source_result_id() == record.source_result_id())
        });
        match target {
            Some(k) => self.delete_with_key(&k),
            None => false,
        }
    }

    /// Removes a slot. Deleting a primary holder promotes its co-holder, if any.
    pub fn delete_with_key(&mut self, key: &RecordKey) -> bool {
        if !self.remove_slot(key) {
            return false;
        }
        if !key.is_tie {
            if let Some(idx) = self.index.remove(&key.tie_slot()) {
                self.entries[idx].key = key.clone();
                self.index.insert(key.clone(), idx);
            }
        }
        true
    }

    fn remove_slot(&mut self, key: &RecordKey) -> bool {
        let Some(idx) = self.index.remove(key) else {
            return false;
        };
        self.entries.remove(idx);
        for pos in self.index.values_mut() {
            if *pos > idx {
                *pos -= 1;
            }
        }
        true
    }

    pub fn get_record_for(
        &self,
        record_type: RecordType,
        pool: PoolType,
        event: EventType,
        category: Option<&CategoryCode>,
        gender: Option<Gender>,
        is_tie: bool,
    ) -> Option<&RecordEntry<R>> {
        let mut key = RecordKey::new(record_type, pool, event, category.cloned(), gender);
        key.is_tie = is_tie;
        self.get(&key)
    }

    pub fn get(&self, key: &RecordKey) -> Option<&RecordEntry<R>> {
        self.index.get(key).map(|&idx| &self.entries[idx])
    }

    pub fn has_record_for(
        &self,
        record_type: RecordType,
        pool: PoolType,
        event: EventType,
        category: Option<&CategoryCode>,
        gender: Option<Gender>,
    ) -> bool {
        self.get_record_for(record_type, pool, event, category, gender, false)
            .is_some()
    }

    /// True if any primary slot matches; `None` dimensions match anything.
    pub fn has_any_record_for(
        &self,
        record_type: RecordType,
        pool: PoolType,
        event: EventType,
        category: Option<&CategoryCode>,
        gender: Option<Gender>,
    ) -> bool {
        self.entries
            .iter()
            .any(|e| !e.key.is_tie && e.key.matches(record_type, pool, event, category, gender))
    }

    pub fn has_tie_in_for(
        &self,
        record_type: RecordType,
        pool: PoolType,
        event: EventType,
        category: Option<&CategoryCode>,
        gender: Option<Gender>,
    ) -> bool {
        self.get_record_for(record_type, pool, event, category, gender, true)
            .is_some()
    }

    /// `(key, entry)` pairs in insertion order.
    pub fn entries(&self) -> impl Iterator<Item = (&RecordKey, &RecordEntry<R>)> {
        self.entries.iter().map(|e| (&e.key, e))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Cache-invalidation token: digest of the sorted source ids and the latest update stamp.
    pub fn cache_key(&self) -> String {
        let Some(latest) = self.entries.iter().map(|e| e.record.updated_at()).max() else {
            return EMPTY_CACHE_KEY.to_string();
        };
        let ids = self
            .entries
            .iter()
            .map(|e| e.record.source_result_id())
            .sorted()
            .join(",");

        let mut hasher = Sha256::new();
        hasher.update(ids.as_bytes());
        hasher.update(b"@");
        hasher.update(latest.format("%Y%m%d%H%M%S").to_string().as_bytes());
        hex::encode(hasher.finalize())
    }
}
