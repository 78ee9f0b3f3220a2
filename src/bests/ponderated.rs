use crate::collaborators::{StandardKey, TimeStandard, TimeStandardSink};
use crate::config::PonderatedParams;
use crate::error::EngineResult;
use crate::model::{CategoryCode, EventType, Gender, PoolType, ResultRecord, Scope, Season, SeasonId, Timing};
use std::cell::OnceCell;
use strum::IntoEnumIterator;
use tracing::{debug, info};

/// Best-N-of-M target time for one gender/category/event/pool.
#[derive(Debug, Clone)]
pub struct PonderatedBest {
    pub season_id: SeasonId,
    pub gender: Gender,
    pub category: CategoryCode,
    pub event: EventType,
    pub pool: PoolType,
    pub max_results: usize,
    pub bests_to_be_ignored: usize,
    collected: Vec<ResultRecord>,
    ponderated: OnceCell<Timing>,
}

impl PonderatedBest {
    pub fn new(
        season_id: SeasonId,
        gender: Gender,
        category: CategoryCode,
        event: EventType,
        pool: PoolType,
        max_results: usize,
        bests_to_be_ignored: usize,
    ) -> Self {
        Self {
            season_id,
            gender,
            category,
            event,
            pool,
            max_results,
            bests_to_be_ignored,
            collected: Vec::new(),
            ponderated: OnceCell::new(),
        }
    }

    pub fn key(&self) -> StandardKey {
        StandardKey {
            season_id: self.season_id,
            gender: self.gender,
            category: self.category.clone(),
            event: self.event,
            pool: self.pool,
        }
    }

    /// Keeps the fastest `max_results + bests_to_be_ignored` valid results of the tuple.
    /// Ordering is total: timing, then swimmer, then result id.
    pub fn collect_event_bests<'r, I>(&mut self, results: I) -> usize
    where
        I: IntoIterator<Item = &'r ResultRecord>,
    {
        let mut bests: Vec<ResultRecord> = results
            .into_iter()
            .filter(|r| {
                r.is_valid()
                    && r.gender == self.gender
                    && r.category == self.category
                    && r.event_type == self.event
                    && r.pool == self.pool
            })
            .cloned()
            .collect();
        bests.sort_by_key(|r| (r.timing, r.swimmer_id, r.id));
        bests.truncate(self.max_results.saturating_add(self.bests_to_be_ignored));

        self.collected = bests;
        self.ponderated = OnceCell::new();
        self.collected.len()
    }

    pub fn collected_results(&self) -> &[ResultRecord] {
        &self.collected
    }

    /// Collected results left once the outliers are dropped.
    pub fn retained_results(&self) -> &[ResultRecord] {
        let skip = self.bests_to_be_ignored.min(self.collected.len());
        &self.collected[skip..]
    }

    /// Linearly weighted mean of the retained times: the fastest weighs N, the slowest 1.
    /// Zero when nothing was retained.
    pub fn set_ponderated_best(&self) -> Timing {
        *self.ponderated.get_or_init(|| {
            let retained = self.retained_results();
            let n = retained.len() as u64;
            if n == 0 {
                return Timing::zero();
            }
            let (weighted, weights) = retained
                .iter()
                .enumerate()
                .fold((0u64, 0u64), |(sum, w_sum), (i, r)| {
                    let w = n - i as u64;
                    (sum + w * r.timing.to_hundredths() as u64, w_sum + w)
                });
            Timing::from_hundredths(((weighted + weights / 2) / weights) as u32)
        })
    }

    pub fn get_ponderated_best(&self) -> Timing {
        self.set_ponderated_best()
    }
}

/// Insert/update partition handed to the standards writer.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StoragePlan {
    pub to_insert: Vec<TimeStandard>,
    pub to_update: Vec<TimeStandard>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StoreSummary {
    pub inserted: usize,
    pub updated: usize,
}

/// Season driver: one `PonderatedBest` per gender × category × event × pool.
pub struct PonderatedStandards<'a> {
    season: &'a Season,
    params: PonderatedParams,
    calculators: Vec<PonderatedBest>,
}

impl<'a> PonderatedStandards<'a> {
    pub fn new(scope: &Scope<'a>, params: PonderatedParams) -> EngineResult<Self> {
        let season = scope.require_season()?;
        params.validate()?;
        Ok(Self {
            season,
            params,
            calculators: Vec::new(),
        })
    }

    pub fn scan_for_gender_category_and_event(&mut self) -> usize {
        let categories = self.season.known_categories();
        let events = self.season.known_events();
        self.calculators.clear();

        for gender in Gender::iter() {
            for category in &categories {
                for &event in &events {
                    for pool in PoolType::iter() {
                        let mut calc = PonderatedBest::new(
                            self.season.id,
                            gender,
                            category.clone(),
                            event,
                            pool,
                            self.params.max_results,
                            self.params.bests_to_be_ignored,
                        );
                        calc.collect_event_bests(&self.season.results);
                        self.calculators.push(calc);
                    }
                }
            }
        }

        let with_results = self
            .calculators
            .iter()
            .filter(|c| !c.collected_results().is_empty())
            .count();
        info!(
            "Season #{}: {} ponderated calculators, {} with results",
            self.season.id,
            self.calculators.len(),
            with_results
        );
        with_results
    }

    pub fn calculators(&self) -> &[PonderatedBest] {
        &self.calculators
    }

    pub fn get(
        &self,
        gender: Gender,
        category: &CategoryCode,
        event: EventType,
        pool: PoolType,
    ) -> Option<&PonderatedBest> {
        self.calculators.iter().find(|c| {
            c.gender == gender && &c.category == category && c.event == event && c.pool == pool
        })
    }

    /// Splits the non-zero bests into inserts and updates according to the sink.
    pub fn prepare_to_store(&self, sink: &dyn TimeStandardSink) -> EngineResult<StoragePlan> {
        let mut plan = StoragePlan::default();
        for calc in &self.calculators {
            let timing = calc.get_ponderated_best();
            if timing.is_zero() {
                continue;
            }
            let standard = TimeStandard {
                key: calc.key(),
                timing,
            };
            if sink.exists(&standard.key)? {
                plan.to_update.push(standard);
            } else {
                plan.to_insert.push(standard);
            }
        }
        debug!(
            "Storage plan: {} inserts, {} updates",
            plan.to_insert.len(),
            plan.to_update.len()
        );
        Ok(plan)
    }

    pub fn to_db(&self, sink: &mut dyn TimeStandardSink) -> EngineResult<StoreSummary> {
        let plan = self.prepare_to_store(&*sink)?;
        for standard in &plan.to_insert {
            sink.insert(standard)?;
        }
        for standard in &plan.to_update {
            sink.update(standard)?;
        }
        let summary = StoreSummary {
            inserted: plan.to_insert.len(),
            updated: plan.to_update.len(),
        };
        info!(
            "Season #{}: stored time standards ({} new, {} updated)",
            self.season.id, summary.inserted, summary.updated
        );
        Ok(summary)
    }
}
