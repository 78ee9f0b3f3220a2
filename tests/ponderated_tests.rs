mod common;

use common::{ev, season_with, secs, ResultBuilder, SEASON_ID};
use swimrank::bests::{PonderatedBest, PonderatedStandards};
use swimrank::collaborators::{InMemoryTimeStandards, StandardKey, TimeStandard, TimeStandardSink};
use swimrank::config::PonderatedParams;
use swimrank::model::{CategoryCode, Gender, PoolType, ResultRecord, Scope, Swimmer, Timing};
use swimrank::{EngineError, EngineResult};

fn calculator(max_results: usize, ignored: usize) -> PonderatedBest {
    PonderatedBest::new(
        SEASON_ID,
        Gender::Male,
        CategoryCode::new("M25"),
        ev("50FS"),
        PoolType::Pool25,
        max_results,
        ignored,
    )
}

fn times(seconds: &[f64]) -> Vec<ResultRecord> {
    seconds
        .iter()
        .enumerate()
        .map(|(i, &s)| ResultBuilder::new(i as u64 + 1, i as u64 + 100).time(s).build())
        .collect()
}

#[test]
fn test_no_results_gives_zero_timing() {
    let mut calc = calculator(10, 3);
    assert_eq!(calc.collect_event_bests(&Vec::<ResultRecord>::new()), 0);
    assert!(calc.get_ponderated_best().is_zero());
}

#[test]
fn test_only_outliers_gives_zero_timing() {
    let mut calc = calculator(10, 3);
    calc.collect_event_bests(&times(&[28.0, 29.0, 30.0]));
    assert!(calc.retained_results().is_empty());
    assert_eq!(calc.get_ponderated_best(), Timing::zero());
}

#[test]
fn test_fastest_are_discarded_and_the_rest_weighted() {
    let mut calc = calculator(3, 2);
    let collected = calc.collect_event_bests(&times(&[33.0, 28.0, 32.0, 29.0, 31.0, 40.0, 30.0]));

    assert_eq!(collected, 5);
    let retained: Vec<Timing> = calc.retained_results().iter().map(|r| r.timing).collect();
    assert_eq!(retained, vec![secs(30.0), secs(31.0), secs(32.0)]);

    // (3 * 30 + 2 * 31 + 1 * 32) / 6 = 30.67
    assert_eq!(calc.get_ponderated_best(), secs(30.67));
}

#[test]
fn test_value_stays_within_retained_bounds_and_is_idempotent() {
    let mut calc = calculator(10, 0);
    calc.collect_event_bests(&times(&[30.0, 30.5, 31.0, 45.0]));
    let first = calc.get_ponderated_best();

    let retained = calc.retained_results();
    assert!(first >= retained[0].timing);
    assert!(first <= retained[retained.len() - 1].timing);
    assert_eq!(first, calc.set_ponderated_best());
    assert_eq!(first, calc.get_ponderated_best());
}

#[test]
fn test_recollection_resets_the_cached_value() {
    let mut calc = calculator(10, 0);
    calc.collect_event_bests(&times(&[30.0]));
    assert_eq!(calc.get_ponderated_best(), secs(30.0));

    calc.collect_event_bests(&times(&[35.0]));
    assert_eq!(calc.get_ponderated_best(), secs(35.0));
}

#[test]
fn test_collection_filters_the_exact_tuple() {
    let results = vec![
        ResultBuilder::new(1, 1).time(30.0).build(),
        ResultBuilder::new(2, 2).time(29.0).pool(PoolType::Pool50).build(),
        ResultBuilder::new(3, 3).time(29.0).gender(Gender::Female).build(),
        ResultBuilder::new(4, 4).time(29.0).category("M30").build(),
        ResultBuilder::new(5, 5).time(29.0).event("100FS").build(),
        ResultBuilder::new(6, 6).time(29.0).disqualified().build(),
    ];
    let mut calc = calculator(10, 0);
    assert_eq!(calc.collect_event_bests(&results), 1);
    assert_eq!(calc.collected_results()[0].id, 1);
}

#[test]
fn test_equal_times_sort_by_swimmer_then_id() {
    let results = vec![
        ResultBuilder::new(9, 20).time(30.0).build(),
        ResultBuilder::new(3, 20).time(30.0).build(),
        ResultBuilder::new(1, 21).time(30.0).build(),
        ResultBuilder::new(5, 10).time(30.0).build(),
    ];
    let mut calc = calculator(10, 0);
    calc.collect_event_bests(&results);

    let order: Vec<u64> = calc.collected_results().iter().map(|r| r.id).collect();
    assert_eq!(order, vec![5, 3, 9, 1]);
}

#[test]
fn test_driver_requires_a_season() {
    let swimmer = Swimmer {
        id: 1,
        complete_name: "Nobody".to_string(),
        gender: Gender::Male,
        year_of_birth: None,
    };
    let err = PonderatedStandards::new(&Scope::Swimmer(&swimmer), PonderatedParams::default())
        .err()
        .unwrap();
    assert!(matches!(err, EngineError::InvalidArgument(_)));
}

#[test]
fn test_unbounded_window_keeps_every_result() {
    let mut calc = calculator(usize::MAX, 1);
    assert_eq!(calc.collect_event_bests(&times(&[30.0, 31.0, 32.0])), 3);
    // (2 * 31 + 1 * 32) / 3 = 31.33
    assert_eq!(calc.get_ponderated_best(), secs(31.33));
}

#[test]
fn test_driver_rejects_an_empty_window() {
    let season = season_with(times(&[30.0]));
    let params = PonderatedParams {
        max_results: 0,
        bests_to_be_ignored: 0,
    };
    let err = PonderatedStandards::new(&Scope::Season(&season), params).err().unwrap();
    assert!(matches!(err, EngineError::InvalidArgument(_)));
}

fn small_params() -> PonderatedParams {
    PonderatedParams {
        max_results: 3,
        bests_to_be_ignored: 0,
    }
}

#[test]
fn test_driver_scans_every_tuple_and_plans_inserts() {
    let season = season_with(vec![
        ResultBuilder::new(1, 1).time(30.0).build(),
        ResultBuilder::new(2, 2).time(31.0).build(),
        ResultBuilder::new(3, 3).time(35.0).gender(Gender::Female).build(),
    ]);
    let mut driver = PonderatedStandards::new(&Scope::Season(&season), small_params()).unwrap();

    assert_eq!(driver.scan_for_gender_category_and_event(), 2);
    // 2 genders x 1 category x 1 event x 2 pools
    assert_eq!(driver.calculators().len(), 4);

    let male = driver
        .get(Gender::Male, &CategoryCode::new("M25"), ev("50FS"), PoolType::Pool25)
        .unwrap();
    assert_eq!(male.get_ponderated_best(), secs(30.33));

    let sink = InMemoryTimeStandards::new();
    let plan = driver.prepare_to_store(&sink).unwrap();
    assert_eq!(plan.to_insert.len(), 2);
    assert!(plan.to_update.is_empty());
}

#[test]
fn test_to_db_inserts_then_updates() {
    let season = season_with(vec![ResultBuilder::new(1, 1).time(30.0).build()]);
    let mut driver = PonderatedStandards::new(&Scope::Season(&season), small_params()).unwrap();
    driver.scan_for_gender_category_and_event();

    let mut sink = InMemoryTimeStandards::new();
    let first = driver.to_db(&mut sink).unwrap();
    assert_eq!((first.inserted, first.updated), (1, 0));

    let second = driver.to_db(&mut sink).unwrap();
    assert_eq!((second.inserted, second.updated), (0, 1));
    assert_eq!(sink.len(), 1);

    let key = StandardKey {
        season_id: SEASON_ID,
        gender: Gender::Male,
        category: CategoryCode::new("M25"),
        event: ev("50FS"),
        pool: PoolType::Pool25,
    };
    assert_eq!(sink.get(&key).unwrap().timing, secs(30.0));
}

struct FailingSink;

impl TimeStandardSink for FailingSink {
    fn exists(&self, _key: &StandardKey) -> EngineResult<bool> {
        Ok(false)
    }

    fn insert(&mut self, _standard: &TimeStandard) -> EngineResult<()> {
        Err(EngineError::Store("disk full".to_string()))
    }

    fn update(&mut self, _standard: &TimeStandard) -> EngineResult<()> {
        Ok(())
    }
}

#[test]
fn test_sink_errors_are_propagated() {
    let season = season_with(vec![ResultBuilder::new(1, 1).time(30.0).build()]);
    let mut driver = PonderatedStandards::new(&Scope::Season(&season), small_params()).unwrap();
    driver.scan_for_gender_category_and_event();

    let err = driver.to_db(&mut FailingSink).unwrap_err();
    assert!(matches!(err, EngineError::Store(ref msg) if msg == "disk full"));
}
