use crate::collaborators::CourseConverter;
use crate::model::{CategoryCode, EventType, Gender, PoolType, RecordType, ResultId, ResultRecord, Season, SeasonId, Timing};
use crate::records::RecordKey;
use fnv::FnvHashMap;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use strum::IntoEnumIterator;
use tracing::{debug, info};

/// Fastest time of the season for one gender/category/event, on the reference course.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeasonalEventBest {
    pub gender: Gender,
    pub category: CategoryCode,
    pub event: EventType,
    pub pool: PoolType,
    pub timing: Timing,
    /// The winning time was converted from the other course.
    pub is_converted: bool,
    /// Candidate times that needed a conversion.
    pub conversions: usize,
    /// Meetings of the season offering the event.
    pub total_events: usize,
    /// Valid results swum for the combination.
    pub events_swam: usize,
}

#[derive(Debug, Clone)]
struct NormalizedResult {
    gender: Gender,
    category: CategoryCode,
    event: EventType,
    timing: Timing,
    is_converted: bool,
}

/// Per-season store of seasonal event bests.
#[derive(Debug, Clone)]
pub struct SeasonalEventBests {
    season_id: SeasonId,
    reference_pool: PoolType,
    categories: Vec<CategoryCode>,
    events: Vec<EventType>,
    offered: FnvHashMap<EventType, usize>,
    normalized: Vec<NormalizedResult>,
    by_result: FnvHashMap<ResultId, Timing>,
    bests: BTreeMap<RecordKey, SeasonalEventBest>,
}

impl SeasonalEventBests {
    /// Normalizes every valid result of the season onto `reference_pool`.
    /// The store stays empty until `scan_for_gender_category_and_event` runs.
    pub fn new(season: &Season, converter: &dyn CourseConverter, reference_pool: PoolType) -> Self {
        let mut normalized = Vec::new();
        let mut by_result = FnvHashMap::default();

        for r in season.valid_results() {
            let timing = converter.convert_to(r.timing, r.gender, r.event_type, r.pool, reference_pool);
            by_result.insert(r.id, timing);
            normalized.push(NormalizedResult {
                gender: r.gender,
                category: r.category.clone(),
                event: r.event_type,
                timing,
                is_converted: r.pool != reference_pool,
            });
        }

        let categories = season.known_categories();
        let events = season.known_events();
        let offered = events
            .iter()
            .map(|&ev| (ev, season.events_offered(ev)))
            .collect();

        Self {
            season_id: season.id,
            reference_pool,
            categories: categories.into_iter().collect(),
            events: events.into_iter().collect(),
            offered,
            normalized,
            by_result,
            bests: BTreeMap::new(),
        }
    }

    /// `new` followed by a full scan.
    pub fn build(season: &Season, converter: &dyn CourseConverter, reference_pool: PoolType) -> Self {
        let mut bests = Self::new(season, converter, reference_pool);
        bests.scan_for_gender_category_and_event();
        bests
    }

    pub fn season_id(&self) -> SeasonId {
        self.season_id
    }

    pub fn reference_pool(&self) -> PoolType {
        self.reference_pool
    }

    fn key_for(&self, gender: Gender, category: &CategoryCode, event: EventType) -> RecordKey {
        RecordKey::new(
            RecordType::SeasonalBest,
            self.reference_pool,
            event,
            Some(category.clone()),
            Some(gender),
        )
    }

    pub fn calculate_event_best(
        &self,
        gender: Gender,
        category: &CategoryCode,
        event: EventType,
        total_events_offered: usize,
        events_swam: usize,
    ) -> Option<SeasonalEventBest> {
        let candidates = self
            .normalized
            .iter()
            .filter(|n| n.gender == gender && &n.category == category && n.event == event);

        let mut conversions = 0;
        let mut best: Option<&NormalizedResult> = None;
        for candidate in candidates {
            if candidate.is_converted {
                conversions += 1;
            }
            // Native times win ties against converted ones.
            let better = match best {
                None => true,
                Some(b) => {
                    candidate.timing < b.timing
                        || (candidate.timing == b.timing && b.is_converted && !candidate.is_converted)
                }
            };
            if better {
                best = Some(candidate);
            }
        }

        best.map(|b| SeasonalEventBest {
            gender,
            category: category.clone(),
            event,
            pool: self.reference_pool,
            timing: b.timing,
            is_converted: b.is_converted,
            conversions,
            total_events: total_events_offered,
            events_swam,
        })
    }

    /// Fills the store for every gender × category × event of the season.
    /// Combinations without results get no entry.
    pub fn scan_for_gender_category_and_event(&mut self) -> usize {
        let mut found = Vec::new();
        for gender in Gender::iter() {
            for category in &self.categories {
                for &event in &self.events {
                    let swam = self
                        .normalized
                        .iter()
                        .filter(|n| n.gender == gender && &n.category == category && n.event == event)
                        .count();
                    if swam == 0 {
                        continue;
                    }
                    let offered = self.offered.get(&event).copied().unwrap_or(0);
                    if let Some(best) = self.calculate_event_best(gender, category, event, offered, swam) {
                        found.push(best);
                    }
                }
            }
        }

        let count = found.len();
        for best in found {
            debug!(
                "Seasonal best {} {} {}: {}{}",
                best.gender,
                best.category,
                best.event,
                best.timing,
                if best.is_converted { " (converted)" } else { "" }
            );
            self.set_best_for_gender_category_and_event(best);
        }
        info!(
            "Season #{}: {} seasonal event bests on the {}m course",
            self.season_id,
            count,
            self.reference_pool.length_in_meters()
        );
        count
    }

    pub fn set_best_for_gender_category_and_event(&mut self, best: SeasonalEventBest) {
        let key = self.key_for(best.gender, &best.category, best.event);
        self.bests.insert(key, best);
    }

    pub fn get_best_for_gender_category_and_event(
        &self,
        gender: Gender,
        category: &CategoryCode,
        event: EventType,
    ) -> Option<&SeasonalEventBest> {
        self.bests.get(&self.key_for(gender, category, event))
    }

    /// The result's time on the reference course, if it belongs to the season.
    pub fn reference_timing(&self, result: &ResultRecord) -> Option<Timing> {
        self.by_result.get(&result.id).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = &SeasonalEventBest> {
        self.bests.values()
    }

    pub fn len(&self) -> usize {
        self.bests.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bests.is_empty()
    }
}
