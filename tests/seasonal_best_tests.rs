mod common;

use common::{ev, season_with, secs, ResultBuilder};
use swimrank::bests::SeasonalEventBests;
use swimrank::collaborators::{CourseConverter, TurnBasedConverter};
use swimrank::model::{CategoryCode, Gender, PoolType};

fn m25() -> CategoryCode {
    CategoryCode::new("M25")
}

#[test]
fn test_fastest_native_time_wins() {
    let season = season_with(vec![
        ResultBuilder::new(1, 10).time(30.0).build(),
        ResultBuilder::new(2, 11).time(31.5).build(),
        ResultBuilder::new(3, 12).time(29.0).disqualified().build(),
    ]);
    let bests = SeasonalEventBests::build(&season, &TurnBasedConverter::default(), PoolType::Pool25);

    let best = bests
        .get_best_for_gender_category_and_event(Gender::Male, &m25(), ev("50FS"))
        .unwrap();
    assert_eq!(best.timing, secs(30.0));
    assert!(!best.is_converted);
    assert_eq!(best.events_swam, 2);
    assert_eq!(best.total_events, 1);
    assert_eq!(best.pool, PoolType::Pool25);
}

#[test]
fn test_long_course_times_are_converted() {
    let season = season_with(vec![
        ResultBuilder::new(1, 10).event("100FS").time(62.0).build(),
        ResultBuilder::new(2, 11)
            .event("100FS")
            .time(62.5)
            .pool(PoolType::Pool50)
            .meeting(2, 10)
            .build(),
    ]);
    let bests = SeasonalEventBests::build(&season, &TurnBasedConverter::default(), PoolType::Pool25);

    // 62.50 in 50 m minus two turns at 0.40 = 61.70 on 25 m.
    let best = bests
        .get_best_for_gender_category_and_event(Gender::Male, &m25(), ev("100FS"))
        .unwrap();
    assert_eq!(best.timing, secs(61.7));
    assert!(best.is_converted);
    assert_eq!(best.conversions, 1);
    assert_eq!(best.total_events, 2);
}

#[test]
fn test_native_time_wins_an_exact_tie_with_a_converted_one() {
    let season = season_with(vec![
        ResultBuilder::new(1, 10)
            .event("100FS")
            .time(62.4)
            .pool(PoolType::Pool50)
            .build(),
        ResultBuilder::new(2, 11).event("100FS").time(61.6).build(),
    ]);
    let bests = SeasonalEventBests::build(&season, &TurnBasedConverter::default(), PoolType::Pool25);

    let best = bests
        .get_best_for_gender_category_and_event(Gender::Male, &m25(), ev("100FS"))
        .unwrap();
    assert_eq!(best.timing, secs(61.6));
    assert!(!best.is_converted);
}

#[test]
fn test_long_course_reference_pool() {
    let season = season_with(vec![ResultBuilder::new(1, 10).event("100BK").time(70.0).build()]);
    let bests = SeasonalEventBests::build(&season, &TurnBasedConverter::default(), PoolType::Pool50);

    // Short-course times get slower on the long course: two turns at 0.60.
    let best = bests
        .get_best_for_gender_category_and_event(Gender::Male, &m25(), ev("100BK"))
        .unwrap();
    assert_eq!(best.timing, secs(71.2));
    assert_eq!(best.pool, PoolType::Pool50);
}

#[test]
fn test_combinations_without_results_have_no_entry() {
    let season = season_with(vec![
        ResultBuilder::new(1, 10).build(),
        ResultBuilder::new(2, 20).gender(Gender::Female).category("M30").event("200BR").time(170.0).build(),
    ]);
    let bests = SeasonalEventBests::build(&season, &TurnBasedConverter::default(), PoolType::Pool25);

    assert_eq!(bests.len(), 2);
    assert!(bests
        .get_best_for_gender_category_and_event(Gender::Female, &m25(), ev("50FS"))
        .is_none());
    assert!(bests
        .get_best_for_gender_category_and_event(Gender::Male, &CategoryCode::new("M30"), ev("200BR"))
        .is_none());
}

#[test]
fn test_new_leaves_the_store_empty_until_scanned() {
    let season = season_with(vec![ResultBuilder::new(1, 10).build()]);
    let mut bests = SeasonalEventBests::new(&season, &TurnBasedConverter::default(), PoolType::Pool25);
    assert!(bests.is_empty());

    let calculated = bests
        .calculate_event_best(Gender::Male, &m25(), ev("50FS"), 1, 1)
        .unwrap();
    assert_eq!(calculated.timing, secs(30.0));
    assert!(bests.is_empty());

    assert_eq!(bests.scan_for_gender_category_and_event(), 1);
    assert_eq!(bests.len(), 1);
}

#[test]
fn test_reference_timing_follows_the_conversion() {
    let long = ResultBuilder::new(2, 10)
        .event("200FL")
        .time(140.0)
        .pool(PoolType::Pool50)
        .build();
    let season = season_with(vec![ResultBuilder::new(1, 10).build(), long.clone()]);
    let converter = TurnBasedConverter::default();
    let bests = SeasonalEventBests::build(&season, &converter, PoolType::Pool25);

    let expected = converter.convert(long.timing, Gender::Male, long.event_type, PoolType::Pool50);
    assert_eq!(bests.reference_timing(&long), Some(expected));
    assert_eq!(expected, secs(138.6));
    assert!(bests
        .reference_timing(&ResultBuilder::new(99, 10).build())
        .is_none());
}

#[test]
fn test_end_to_end_50_and_100_freestyle_bests() {
    let season = season_with(vec![
        ResultBuilder::new(1, 10).time(30.0).build(),
        ResultBuilder::new(2, 11).time(31.5).build(),
        ResultBuilder::new(3, 12)
            .event("100FS")
            .time(65.0)
            .pool(PoolType::Pool50)
            .meeting(2, 12)
            .build(),
    ]);
    let bests = SeasonalEventBests::build(&season, &TurnBasedConverter::default(), PoolType::Pool25);

    let fifty = bests
        .get_best_for_gender_category_and_event(Gender::Male, &m25(), ev("50FS"))
        .unwrap();
    let hundred = bests
        .get_best_for_gender_category_and_event(Gender::Male, &m25(), ev("100FS"))
        .unwrap();
    assert_eq!(fifty.timing, secs(30.0));
    assert_eq!(hundred.timing, secs(64.2));
    assert!(hundred.timing >= fifty.timing);
}
