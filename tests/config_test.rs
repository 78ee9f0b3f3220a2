mod common;

use common::{BALANCED_MEETING_MAX, ENHANCED_MEETING_MAX};
use rstest::rstest;
use std::io::Write;
use swimrank::config::{PonderatedParams, RankingConfig, RankingParams};
use swimrank::model::PoolType;
use swimrank::EngineError;
use tempfile::NamedTempFile;

fn write_config(json: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("Failed to create temp file");
    write!(file, "{}", json).unwrap();
    file
}

#[test]
fn test_defaults_match_the_federation_scale() {
    let params = RankingParams::default();
    assert_eq!(params.balanced_meeting_max(), BALANCED_MEETING_MAX);
    assert_eq!(params.enhanced_meeting_max(), ENHANCED_MEETING_MAX);
    assert_eq!(params.best_meetings as f64 * params.balanced_meeting_max(), 1090.0);
    assert_eq!(params.medal_bonus_for(1), 4.0);
    assert_eq!(params.medal_bonus_for(2), 3.0);
    assert_eq!(params.medal_bonus_for(3), 2.0);
    assert_eq!(params.medal_bonus_for(4), 0.0);

    let config = RankingConfig::default();
    assert_eq!(config.reference_pool, PoolType::Pool25);
    assert_eq!(config.ponderated.max_results, 10);
    assert_eq!(config.ponderated.bests_to_be_ignored, 3);
    assert!(config.validate().is_ok());
}

#[test]
fn test_partial_file_keeps_defaults() {
    let file = write_config(r#"{ "ranking": { "best_meetings": 4 }, "reference_pool": "50" }"#);
    let config = RankingConfig::load_from_file(file.path()).unwrap();

    assert_eq!(config.ranking.best_meetings, 4);
    assert_eq!(config.ranking.meetings_considered, 6);
    assert_eq!(config.ranking.event_bonus_max, 8.0);
    assert_eq!(config.reference_pool, PoolType::Pool50);
    assert_eq!(config.ponderated.max_results, PonderatedParams::default().max_results);
}

#[test]
fn test_invalid_values_are_rejected() {
    let file = write_config(r#"{ "ranking": { "best_meetings": 7, "meetings_considered": 6 } }"#);
    let err = RankingConfig::load_from_file(file.path()).unwrap_err();
    assert!(matches!(err, EngineError::InvalidArgument(_)));

    let mut config = RankingConfig::default();
    config.ranking.enhance_threshold = 0.0;
    assert!(config.validate().is_err());

    let mut config = RankingConfig::default();
    config.ponderated.max_results = 0;
    assert!(config.validate().is_err());
}

#[rstest]
#[case(|p: &mut RankingParams| p.ranking_points_max = -1.0)]
#[case(|p: &mut RankingParams| p.ranking_points_cap = -0.5)]
#[case(|p: &mut RankingParams| p.event_points_cap = f64::NAN)]
#[case(|p: &mut RankingParams| p.performance_points_cap = f64::INFINITY)]
#[case(|p: &mut RankingParams| p.enhance_points_cap = -10.0)]
#[case(|p: &mut RankingParams| p.event_bonus_max = -8.0)]
#[case(|p: &mut RankingParams| p.medal_bonus_max = f64::NAN)]
#[case(|p: &mut RankingParams| p.medal_bonus_gold = -4.0)]
#[case(|p: &mut RankingParams| p.performance_ceiling = f64::NAN)]
#[case(|p: &mut RankingParams| p.enhance_threshold = f64::NAN)]
fn test_collapsed_bounds_are_rejected(#[case] tweak: fn(&mut RankingParams)) {
    let mut config = RankingConfig::default();
    tweak(&mut config.ranking);
    let err = config.validate().unwrap_err();
    assert!(matches!(err, EngineError::InvalidArgument(_)));
}

#[test]
fn test_negative_cap_in_file_is_rejected() {
    let file = write_config(r#"{ "ranking": { "ranking_points_max": -1.0 } }"#);
    let err = RankingConfig::load_from_file(file.path()).unwrap_err();
    assert!(matches!(err, EngineError::InvalidArgument(_)));
}

#[test]
fn test_zero_caps_are_accepted() {
    let mut config = RankingConfig::default();
    config.ranking.medal_bonus_max = 0.0;
    config.ranking.event_bonus_max = 0.0;
    assert!(config.validate().is_ok());
}

#[test]
fn test_malformed_json_is_a_json_error() {
    let file = write_config("{ ranking: ");
    let err = RankingConfig::load_from_file(file.path()).unwrap_err();
    assert!(matches!(err, EngineError::Json(_)));
}

#[test]
fn test_missing_file_is_an_io_error() {
    let err = RankingConfig::load_from_file("/definitely/not/here.json").unwrap_err();
    assert!(matches!(err, EngineError::Io(_)));
}

#[test]
fn test_config_round_trips_through_json() {
    let mut config = RankingConfig::default();
    config.ranking.enhance_threshold = 0.25;
    let json = serde_json::to_string(&config).unwrap();
    let file = write_config(&json);

    let loaded = RankingConfig::load_from_file(file.path()).unwrap();
    assert_eq!(loaded.ranking.enhance_threshold, 0.25);
}
