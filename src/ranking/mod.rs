//! Individual ranking pipelines.
//!
//! Both pipelines share one shape: event score → meeting score → swimmer
//! score → gender/category board, driven per season. They differ only in how
//! a single result is turned into points.

pub mod balanced;
pub mod enhanced;

pub use self::balanced::{
    BalancedCategoryRanking, BalancedEventScore, BalancedIndividualRanking, BalancedMeetingScore,
    BalancedSwimmerScore,
};
pub use self::enhanced::{
    EnhancedCategoryRanking, EnhancedEventScore, EnhancedIndividualRanking, EnhancedMeetingScore,
    EnhancedSwimmerScore,
};

use crate::config::RankingParams;
use crate::model::{CategoryCode, Gender, MeetingId, ResultRecord, Season, SwimmerId};
use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};

pub trait MeetingTotal {
    fn meeting_id(&self) -> MeetingId;
    fn get_total_points(&self) -> f64;
}

pub trait SwimmerTotal {
    fn swimmer_id(&self) -> SwimmerId;
    fn total_points(&self) -> f64;
}

#[inline]
pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Bonus for swimming several distinct events at one meeting; the first event earns nothing.
pub(crate) fn event_bonus_points(results: &[&ResultRecord], params: &RankingParams) -> f64 {
    let distinct: BTreeSet<_> = results.iter().map(|r| r.event_type).collect();
    let extra = distinct.len().saturating_sub(1) as f64;
    (extra * params.event_bonus_per_event).clamp(0.0, params.event_bonus_max)
}

pub(crate) fn medal_bonus_points(results: &[&ResultRecord], params: &RankingParams) -> f64 {
    let sum: f64 = results.iter().map(|r| params.medal_bonus_for(r.rank)).sum();
    sum.clamp(0.0, params.medal_bonus_max)
}

/// Sum of the `n` highest totals among the best `m`.
pub(crate) fn best_n_of_m<'s, M, I>(meetings: I, n: usize, m: usize) -> f64
where
    M: MeetingTotal + 's,
    I: IntoIterator<Item = &'s M>,
{
    let mut totals: Vec<f64> = meetings.into_iter().map(|s| s.get_total_points()).collect();
    totals.sort_by(|a, b| b.partial_cmp(a).unwrap_or(Ordering::Equal));
    totals.into_iter().take(m).take(n).sum()
}

/// Valid season results of a swimmer, grouped by meeting.
pub(crate) fn results_by_meeting(season: &Season, swimmer_id: SwimmerId) -> BTreeMap<MeetingId, Vec<&ResultRecord>> {
    let mut grouped: BTreeMap<MeetingId, Vec<&ResultRecord>> = BTreeMap::new();
    for r in season.results_for_swimmer(swimmer_id) {
        grouped.entry(r.meeting_id).or_default().push(r);
    }
    grouped
}

/// Gender and category of the swimmer's earliest result in the season.
pub(crate) fn resolve_gender_category(results: &[&ResultRecord]) -> Option<(Gender, CategoryCode)> {
    results
        .iter()
        .min_by_key(|r| (r.event_date, r.id))
        .map(|r| (r.gender, r.category.clone()))
}

/// Placement order: total descending, swimmer id ascending.
pub fn sort_by_total<T: SwimmerTotal>(scores: &[T]) -> Vec<&T> {
    let mut sorted: Vec<&T> = scores.iter().collect();
    sorted.sort_by(|a, b| {
        b.total_points()
            .partial_cmp(&a.total_points())
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.swimmer_id().cmp(&b.swimmer_id()))
    });
    sorted
}

/// (gender, category) cells of the season that have at least one swimmer.
pub(crate) fn populated_cells(season: &Season) -> Vec<(Gender, CategoryCode)> {
    let cells: BTreeSet<(Gender, CategoryCode)> = season
        .valid_results()
        .map(|r| (r.gender, r.category.clone()))
        .collect();
    cells.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed(MeetingId, f64);

    impl MeetingTotal for Fixed {
        fn meeting_id(&self) -> MeetingId {
            self.0
        }
        fn get_total_points(&self) -> f64 {
            self.1
        }
    }

    #[test]
    fn best_five_of_six_drops_the_weakest() {
        let meetings: Vec<Fixed> = [10.0, 60.0, 20.0, 50.0, 30.0, 40.0, 5.0]
            .iter()
            .enumerate()
            .map(|(i, &t)| Fixed(i as MeetingId, t))
            .collect();
        assert_eq!(best_n_of_m(&meetings, 5, 6), 60.0 + 50.0 + 40.0 + 30.0 + 20.0);
    }

    #[test]
    fn best_n_of_m_with_few_meetings_sums_them_all() {
        let meetings = vec![Fixed(1, 12.5), Fixed(2, 7.5)];
        assert_eq!(best_n_of_m(&meetings, 5, 6), 20.0);
        assert_eq!(best_n_of_m(&Vec::<Fixed>::new(), 5, 6), 0.0);
    }

    #[test]
    fn round2_keeps_two_decimals() {
        assert_eq!(round2(66.666_666), 66.67);
        assert_eq!(round2(100.0), 100.0);
    }
}
