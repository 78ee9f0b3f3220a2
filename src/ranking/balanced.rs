use crate::bests::{SeasonalEventBest, SeasonalEventBests};
use crate::collaborators::CourseConverter;
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

/// One result scored against its seasonal event best.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BalancedEventScore {
    pub result_id: ResultId,
    pub event_date: NaiveDate,
    pub event_type: EventType,
    pub rank: u32,
    pub timing: Timing,
    /// Timing actually compared with the seasonal best.
    pub reference_timing: Timing,
    pub event_points: f64,
    pub ranking_points: f64,
}

impl BalancedEventScore {
    /// `converted` is the result's time already moved onto the seasonal best's course.
    /// Without it, a result swum on the other course goes through `converter`.
    pub fn new(
        result: &ResultRecord,
        best: Option<&SeasonalEventBest>,
        converted: Option<Timing>,
        converter: &dyn CourseConverter,
        params: &RankingParams,
    ) -> Self {
        let reference_timing = match (converted, best) {
            (Some(timing), _) => timing,
            (None, Some(best)) if result.pool != best.pool => {
                converter.convert_to(result.timing, result.gender, result.event_type, result.pool, best.pool)
            }
            (None, _) => result.timing,
        };
        let ranking_points = match best {
            Some(best) if !reference_timing.is_zero() && !best.timing.is_zero() => {
                let ratio = best.timing.to_hundredths() as f64 / reference_timing.to_hundredths() as f64;
                round2(ratio * params.ranking_points_max).clamp(0.0, params.ranking_points_max)
            }
            _ => 0.0,
        };

        Self {
            result_id: result.id,
            event_date: result.event_date,
            event_type: result.event_type,
            rank: result.rank,
            timing: result.timing,
            reference_timing,
            event_points: result.event_points,
            ranking_points,
        }
    }

    pub fn get_total_points(&self) -> f64 {
        self.ranking_points + self.event_points
    }
}

/// A swimmer's results at one meeting, with the meeting-level bonuses.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BalancedMeetingScore {
    pub meeting_id: MeetingId,
    pub header_date: NaiveDate,
    pub event_results: Vec<BalancedEventScore>,
    pub event_points: f64,
    pub ranking_points: f64,
    pub event_bonus_points: f64,
    pub medal_bonus_points: f64,
    max_total: f64,
}

impl BalancedMeetingScore {
    pub fn new(
        meeting_id: MeetingId,
        header_date: NaiveDate,
        results: &[&ResultRecord],
        bests: &SeasonalEventBests,
        converter: &dyn CourseConverter,
        params: &RankingParams,
    ) -> Self {
        let valid: Vec<&ResultRecord> = results.iter().copied().filter(|r| r.is_valid()).collect();

        let event_results: Vec<BalancedEventScore> = valid
            .iter()
            .map(|r| {
                let best = bests.get_best_for_gender_category_and_event(r.gender, &r.category, r.event_type);
                BalancedEventScore::new(r, best, bests.reference_timing(r), converter, params)
            })
            .collect();

        let event_points: f64 = event_results.iter().map(|e| e.event_points).sum();
        let ranking_points: f64 = event_results.iter().map(|e| e.ranking_points).sum();

        Self {
            meeting_id,
            header_date,
            event_points: round2(event_points.clamp(0.0, params.event_points_cap)),
            ranking_points: round2(ranking_points.clamp(0.0, params.ranking_points_cap)),
            event_bonus_points: event_bonus_points(&valid, params),
            medal_bonus_points: medal_bonus_points(&valid, params),
            event_results,
            max_total: params.balanced_meeting_max(),
        }
    }

    pub fn get_total_points(&self) -> f64 {
        let total = self.event_points + self.ranking_points + self.event_bonus_points + self.medal_bonus_points;
        round2(total.clamp(0.0, self.max_total))
    }
}

impl MeetingTotal for BalancedMeetingScore {
    fn meeting_id(&self) -> MeetingId {
        self.meeting_id
    }

    fn get_total_points(&self) -> f64 {
        BalancedMeetingScore::get_total_points(self)
    }
}

/// A swimmer's season: one meeting score per attended meeting.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BalancedSwimmerScore {
    pub swimmer_id: SwimmerId,
    pub gender: Gender,
    pub category: CategoryCode,
    meetings: BTreeMap<MeetingId, BalancedMeetingScore>,
    best_meetings: usize,
    meetings_considered: usize,
    max_total: f64,
}

impl BalancedSwimmerScore {
    /// `None` when the swimmer has no valid result in the season.
    pub fn new(
        swimmer_id: SwimmerId,
        season: &Season,
        bests: &SeasonalEventBests,
        converter: &dyn CourseConverter,
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
                let score = BalancedMeetingScore::new(meeting_id, header_date, &results, bests, converter, params);
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
            max_total: params.best_meetings as f64 * params.balanced_meeting_max(),
        })
    }

    pub fn get_meeting_scores(&self, meeting_id: MeetingId) -> Option<&BalancedMeetingScore> {
        self.meetings.get(&meeting_id)
    }

    pub fn meeting_scores(&self) -> impl Iterator<Item = &BalancedMeetingScore> {
        self.meetings.values()
    }

    pub fn meeting_count(&self) -> usize {
        self.meetings.len()
    }

    pub fn total_best_5_on_6(&self) -> f64 {
        let total = best_n_of_m(self.meetings.values(), self.best_meetings, self.meetings_considered);
        round2(total.clamp(0.0, self.max_total))
    }
}

impl SwimmerTotal for BalancedSwimmerScore {
    fn swimmer_id(&self) -> SwimmerId {
        self.swimmer_id
    }

    fn total_points(&self) -> f64 {
        self.total_best_5_on_6()
    }
}

/// Board of swimmer scores for one gender/category cell.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BalancedCategoryRanking {
    pub season_id: SeasonId,
    pub gender: Gender,
    pub category: CategoryCode,
    swimmer_scores: Vec<BalancedSwimmerScore>,
}

impl BalancedCategoryRanking {
    pub fn new(
        season: &Season,
        gender: Gender,
        category: &CategoryCode,
        bests: &SeasonalEventBests,
        converter: &dyn CourseConverter,
        params: &RankingParams,
    ) -> Self {
        let swimmer_scores: Vec<BalancedSwimmerScore> = season
            .swimmers_in(gender, category)
            .into_iter()
            .filter_map(|id| BalancedSwimmerScore::new(id, season, bests, converter, params))
            // A swimmer belongs to the cell of its resolved category only.
            .filter(|s| s.gender == gender && &s.category == category)
            .collect();

        debug!(
            "Balanced ranking {} {}: {} swimmers",
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

    pub fn swimmer_scores(&self) -> &[BalancedSwimmerScore] {
        &self.swimmer_scores
    }

    pub fn sorted_scores(&self) -> Vec<&BalancedSwimmerScore> {
        sort_by_total(&self.swimmer_scores)
    }
}

/// Season driver for the balanced individual ranking.
pub struct BalancedIndividualRanking<'a> {
    season: &'a Season,
    converter: &'a dyn CourseConverter,
    config: RankingConfig,
    bests: SeasonalEventBests,
    rankings: BTreeMap<(Gender, CategoryCode), BalancedCategoryRanking>,
}

impl<'a> BalancedIndividualRanking<'a> {
    pub fn new(scope: &Scope<'a>, converter: &'a dyn CourseConverter, config: RankingConfig) -> EngineResult<Self> {
        let season = scope.require_season()?;
        config.validate()?;
        let bests = SeasonalEventBests::build(season, converter, config.reference_pool);
        info!(
            "Balanced ranking for season #{} ({} results)",
            season.id,
            season.results.len()
        );
        Ok(Self {
            season,
            converter,
            config,
            bests,
            rankings: BTreeMap::new(),
        })
    }

    pub fn season(&self) -> &Season {
        self.season
    }

    pub fn seasonal_event_bests(&self) -> &SeasonalEventBests {
        &self.bests
    }

    /// Meetings of the season with at least one valid result.
    pub fn meetings_with_results(&self) -> Vec<&'a Meeting> {
        let season = self.season;
        season
            .meetings
            .iter()
            .filter(|m| season.valid_results().any(|r| r.meeting_id == m.id))
            .collect()
    }

    /// (Re)builds and caches the board for one cell.
    pub fn set_ranking_for_gender_and_category(
        &mut self,
        gender: Gender,
        category: &CategoryCode,
    ) -> &BalancedCategoryRanking {
        let ranking = BalancedCategoryRanking::new(
            self.season,
            gender,
            category,
            &self.bests,
            self.converter,
            &self.config.ranking,
        );
        let key = (gender, category.clone());
        self.rankings.insert(key.clone(), ranking);
        &self.rankings[&key]
    }

    /// Cached board for the cell, built on first request.
    pub fn get_ranking_for_gender_and_category(
        &mut self,
        gender: Gender,
        category: &CategoryCode,
    ) -> &BalancedCategoryRanking {
        let (season, bests, converter, params) = (self.season, &self.bests, self.converter, &self.config.ranking);
        self.rankings
            .entry((gender, category.clone()))
            .or_insert_with(|| BalancedCategoryRanking::new(season, gender, category, bests, converter, params))
    }

    pub fn cached_ranking(&self, gender: Gender, category: &CategoryCode) -> Option<&BalancedCategoryRanking> {
        self.rankings.get(&(gender, category.clone()))
    }

    /// Builds every populated cell not yet cached, in parallel.
    pub fn rankings_for_all_categories(&mut self) -> Vec<&BalancedCategoryRanking> {
        let missing: Vec<(Gender, CategoryCode)> = populated_cells(self.season)
            .into_iter()
            .filter(|cell| !self.rankings.contains_key(cell))
            .collect();

        let (season, bests, converter, params) = (self.season, &self.bests, self.converter, &self.config.ranking);
        let built: Vec<_> = missing
            .into_par_iter()
            .map(|(gender, category)| {
                let ranking = BalancedCategoryRanking::new(season, gender, &category, bests, converter, params);
                ((gender, category), ranking)
            })
            .collect();

        self.rankings.extend(built);
        self.rankings.values().collect()
    }
}
