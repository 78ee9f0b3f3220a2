use crate::collaborators::PersonalStandards;
use crate::config::{RankingConfig, RankingParams};
use crate::error::EngineResult;
use crate::model::{CategoryCode, EventType, Gender, Meeting, MeetingId, ResultId, ResultRecord, Scope, Season, SeasonId, SwimmerId, Timing};
use crate::ranking::{
    best_n_of_m, event_bonus_points, medal_bonus_points, populated_cells, resolve_gender_category,
    results_by_meeting, round2, sort_by_total, MeetingTotal, SwimmerTotal,
};
use chrono::NaiveDate;
use rayon::prelude::*;
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::{debug, info};

/// One result scored on raw performance and on improvement over the personal standard.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnhancedEventScore {
    pub result_id: ResultId,
    pub event_date: NaiveDate,
    pub event_type: EventType,
    pub rank: u32,
    pub timing: Timing,
    pub standard: Option<Timing>,
    pub event_points: f64,
    pub performance_points: f64,
    pub enhance_points: f64,
}

impl EnhancedEventScore {
    pub fn new(result: &ResultRecord, standard: Option<Timing>, params: &RankingParams) -> Self {
        Self {
            result_id: result.id,
            event_date: result.event_date,
            event_type: result.event_type,
            rank: result.rank,
            timing: result.timing,
            standard,
            event_points: result.event_points,
            performance_points: Self::performance_points_for(result.event_points, params),
            enhance_points: Self::enhance_points_for(result.timing, standard, params),
        }
    }

    /// Proportional to the event score, full marks at the ceiling.
    pub fn performance_points_for(event_points: f64, params: &RankingParams) -> f64 {
        let share = event_points.clamp(0.0, params.performance_ceiling) / params.performance_ceiling;
        round2(share * params.performance_points_max)
    }

    /// Proportional to the improvement over the standard, full marks at the threshold.
    pub fn enhance_points_for(timing: Timing, standard: Option<Timing>, params: &RankingParams) -> f64 {
        let Some(standard) = standard.filter(|s| !s.is_zero()) else {
            return 0.0;
        };
        if timing.is_zero() || timing >= standard {
            return 0.0;
        }
        let std_h = standard.to_hundredths() as f64;
        let improvement = (std_h - timing.to_hundredths() as f64) / std_h;
        let share = (improvement / params.enhance_threshold).min(1.0);
        round2(share * params.enhance_points_max)
    }

    pub fn get_total_points(&self) -> f64 {
        self.performance_points + self.enhance_points
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnhancedMeetingScore {
    pub meeting_id: MeetingId,
    pub header_date: NaiveDate,
    pub event_results: Vec<EnhancedEventScore>,
    pub performance_points: f64,
    pub event_points: f64,
    pub enhance_points: f64,
    pub event_bonus_points: f64,
    pub medal_bonus_points: f64,
    max_total: f64,
}

impl EnhancedMeetingScore {
    pub fn new(
        meeting_id: MeetingId,
        header_date: NaiveDate,
        season_id: SeasonId,
        results: &[&ResultRecord],
        standards: &dyn PersonalStandards,
        params: &RankingParams,
    ) -> Self {
        let valid: Vec<&ResultRecord> = results.iter().copied().filter(|r| r.is_valid()).collect();

        let event_results: Vec<EnhancedEventScore> = valid
            .iter()
            .map(|r| {
                let standard = standards.personal_standard(season_id, r.swimmer_id, r.pool, r.event_type);
                EnhancedEventScore::new(r, standard, params)
            })
            .collect();

        let performance: f64 = event_results.iter().map(|e| e.performance_points).sum();
        let event_points: f64 = event_results.iter().map(|e| e.event_points).sum();
        let enhance: f64 = event_results.iter().map(|e| e.enhance_points).sum();

        Self {
            meeting_id,
            header_date,
            performance_points: round2(performance.clamp(0.0, params.performance_points_cap)),
            event_points: round2(event_points.clamp(0.0, params.event_points_cap)),
            enhance_points: round2(enhance.clamp(0.0, params.enhance_points_cap)),
            event_bonus_points: event_bonus_points(&valid, params),
            medal_bonus_points: medal_bonus_points(&valid, params),
            event_results,
            max_total: params.enhanced_meeting_max(),
        }
    }

    pub fn get_total_points(&self) -> f64 {
        let total = self.performance_points
            + self.event_points
            + self.enhance_points
            + self.event_bonus_points
            + self.medal_bonus_points;
        round2(total.clamp(0.0, self.max_total))
    }
}

impl MeetingTotal for EnhancedMeetingScore {
    fn meeting_id(&self) -> MeetingId {
        self.meeting_id
    }

    fn get_total_points(&self) -> f64 {
        EnhancedMeetingScore::get_total_points(self)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnhancedSwimmerScore {
    pub swimmer_id: SwimmerId,
    pub gender: Gender,
    pub category: CategoryCode,
    meetings: BTreeMap<MeetingId, EnhancedMeetingScore>,
    best_meetings: usize,
    meetings_considered: usize,
    /// `best_meetings` × the enhanced meeting maximum: 1390 with the defaults,
    /// not the balanced 1090.
    max_total: f64,
}

impl EnhancedSwimmerScore {
    pub fn new(
        swimmer_id: SwimmerId,
        season: &Season,
        standards: &dyn PersonalStandards,
        params: &RankingParams,
    ) -> Option<Self> {
        let all = season.results_for_swimmer(swimmer_id);
        let (gender, category) = resolve_gender_category(&all)?;

        let meetings = results_by_meeting(season, swimmer_id)
            .into_iter()
            .map(|(meeting_id, results)| {
                let header_date = season
                    .meeting(meeting_id)
                    .map(|m| m.header_date)
                    .or_else(|| results.iter().map(|r| r.event_date).min())
                    .unwrap_or(season.begin_date);
                let score = EnhancedMeetingScore::new(meeting_id, header_date, season.id, &results, standards, params);
                (meeting_id, score)
            })
            .collect();

        Some(Self {
            swimmer_id,
            gender,
            category,
            meetings,
            best_meetings: params.best_meetings,
            meetings_considered: params.meetings_considered,
            max_total: params.best_meetings as f64 * params.enhanced_meeting_max(),
        })
    }

    pub fn get_meeting_scores(&self, meeting_id: MeetingId) -> Option<&EnhancedMeetingScore> {
        self.meetings.get(&meeting_id)
    }

    pub fn meeting_scores(&self) -> impl Iterator<Item = &EnhancedMeetingScore> {
        self.meetings.values()
    }

    pub fn meeting_count(&self) -> usize {
        self.meetings.len()
    }

    /// Bounded by `max_total_points`.
    pub fn total_best_5_on_6(&self) -> f64 {
        let total = best_n_of_m(self.meetings.values(), self.best_meetings, self.meetings_considered);
        round2(total.clamp(0.0, self.max_total))
    }

    pub fn max_total_points(&self) -> f64 {
        self.max_total
    }
}

impl SwimmerTotal for EnhancedSwimmerScore {
    fn swimmer_id(&self) -> SwimmerId {
        self.swimmer_id
    }

    fn total_points(&self) -> f64 {
        self.total_best_5_on_6()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnhancedCategoryRanking {
    pub season_id: SeasonId,
    pub gender: Gender,
    pub category: CategoryCode,
    swimmer_scores: Vec<EnhancedSwimmerScore>,
}

impl EnhancedCategoryRanking {
    pub fn new(
        season: &Season,
        gender: Gender,
        category: &CategoryCode,
        standards: &dyn PersonalStandards,
        params: &RankingParams,
    ) -> Self {
        let swimmer_scores: Vec<EnhancedSwimmerScore> = season
            .swimmers_in(gender, category)
            .into_iter()
            .filter_map(|id| EnhancedSwimmerScore::new(id, season, standards, params))
            .filter(|s| s.gender == gender && &s.category == category)
            .collect();

        debug!(
            "Enhanced ranking {} {}: {} swimmers",
            gender,
            category,
            swimmer_scores.len()
        );
        Self {
            season_id: season.id,
            gender,
            category: category.clone(),
            swimmer_scores,
        }
    }

    pub fn swimmer_scores(&self) -> &[EnhancedSwimmerScore] {
        &self.swimmer_scores
    }

    pub fn sorted_scores(&self) -> Vec<&EnhancedSwimmerScore> {
        sort_by_total(&self.swimmer_scores)
    }
}

/// Season driver for the enhanced individual ranking.
pub struct EnhancedIndividualRanking<'a> {
    season: &'a Season,
    standards: &'a dyn PersonalStandards,
    config: RankingConfig,
    rankings: BTreeMap<(Gender, CategoryCode), EnhancedCategoryRanking>,
}

impl<'a> EnhancedIndividualRanking<'a> {
    pub fn new(
        scope: &Scope<'a>,
        standards: &'a dyn PersonalStandards,
        config: RankingConfig,
    ) -> EngineResult<Self> {
        let season = scope.require_season()?;
        config.validate()?;
        info!(
            "Enhanced ranking for season #{} ({} results)",
            season.id,
            season.results.len()
        );
        Ok(Self {
            season,
            standards,
            config,
            rankings: BTreeMap::new(),
        })
    }

    pub fn season(&self) -> &Season {
        self.season
    }

    pub fn meetings_with_results(&self) -> Vec<&'a Meeting> {
        let season = self.season;
        season
            .meetings
            .iter()
            .filter(|m| season.valid_results().any(|r| r.meeting_id == m.id))
            .collect()
    }

    pub fn set_ranking_for_gender_and_category(
        &mut self,
        gender: Gender,
        category: &CategoryCode,
    ) -> &EnhancedCategoryRanking {
        let ranking =
            EnhancedCategoryRanking::new(self.season, gender, category, self.standards, &self.config.ranking);
        let key = (gender, category.clone());
        self.rankings.insert(key.clone(), ranking);
        &self.rankings[&key]
    }

    pub fn get_ranking_for_gender_and_category(
        &mut self,
        gender: Gender,
        category: &CategoryCode,
    ) -> &EnhancedCategoryRanking {
        let (season, standards, params) = (self.season, self.standards, &self.config.ranking);
        self.rankings
            .entry((gender, category.clone()))
            .or_insert_with(|| EnhancedCategoryRanking::new(season, gender, category, standards, params))
    }

    pub fn cached_ranking(&self, gender: Gender, category: &CategoryCode) -> Option<&EnhancedCategoryRanking> {
        self.rankings.get(&(gender, category.clone()))
    }

    pub fn rankings_for_all_categories(&mut self) -> Vec<&EnhancedCategoryRanking> {
        let missing: Vec<(Gender, CategoryCode)> = populated_cells(self.season)
            .into_iter()
            .filter(|cell| !self.rankings.contains_key(cell))
            .collect();

        let (season, standards, params) = (self.season, self.standards, &self.config.ranking);
        let built: Vec<_> = missing
            .into_par_iter()
            .map(|(gender, category)| {
                let ranking = EnhancedCategoryRanking::new(season, gender, &category, standards, params);
                ((gender, category), ranking)
            })
            .collect();

        self.rankings.extend(built);
        self.rankings.values().collect()
    }
}
