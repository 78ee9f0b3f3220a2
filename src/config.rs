use crate::error::{EngineError, EngineResult};
use crate::model::PoolType;
use clap::Args;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Args, Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RankingConfig {
    #[command(flatten)]
    pub ranking: RankingParams,
    #[command(flatten)]
    pub ponderated: PonderatedParams,

    /// Course every seasonal best is normalized onto.
    #[arg(long, default_value = "25")]
    pub reference_pool: PoolType,
}

impl Default for RankingConfig {
    fn default() -> Self {
        Self {
            ranking: RankingParams::default(),
            ponderated: PonderatedParams::default(),
            reference_pool: PoolType::Pool25,
        }
    }
}

#[derive(Args, Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RankingParams {
    // === EVENT LEVEL ===
    #[arg(long, default_value_t = 100.0)]
    pub ranking_points_max: f64,
    #[arg(long, default_value_t = 150.0)]
    pub performance_points_max: f64,
    /// Event score that earns the full performance points.
    #[arg(long, default_value_t = 1000.0)]
    pub performance_ceiling: f64,
    #[arg(long, default_value_t = 10.0)]
    pub enhance_points_max: f64,
    /// Improvement over the personal standard that earns the full enhance points.
    #[arg(long, default_value_t = 0.20)]
    pub enhance_threshold: f64,

    // === MEETING LEVEL ===
    #[arg(long, default_value_t = 100.0)]
    pub event_points_cap: f64,
    #[arg(long, default_value_t = 100.0)]
    pub ranking_points_cap: f64,
    #[arg(long, default_value_t = 150.0)]
    pub performance_points_cap: f64,
    #[arg(long, default_value_t = 10.0)]
    pub enhance_points_cap: f64,
    #[arg(long, default_value_t = 2.0)]
    pub event_bonus_per_event: f64,
    #[arg(long, default_value_t = 8.0)]
    pub event_bonus_max: f64,
    #[arg(long, default_value_t = 4.0)]
    pub medal_bonus_gold: f64,
    #[arg(long, default_value_t = 3.0)]
    pub medal_bonus_silver: f64,
    #[arg(long, default_value_t = 2.0)]
    pub medal_bonus_bronze: f64,
    #[arg(long, default_value_t = 10.0)]
    pub medal_bonus_max: f64,

    // === SEASON LEVEL ===
    #[arg(long, default_value_t = 5)]
    pub best_meetings: usize,
    #[arg(long, default_value_t = 6)]
    pub meetings_considered: usize,
}

impl Default for RankingParams {
    fn default() -> Self {
        Self {
            ranking_points_max: 100.0,
            performance_points_max: 150.0,
            performance_ceiling: 1000.0,
            enhance_points_max: 10.0,
            enhance_threshold: 0.20,
            event_points_cap: 100.0,
            ranking_points_cap: 100.0,
            performance_points_cap: 150.0,
            enhance_points_cap: 10.0,
            event_bonus_per_event: 2.0,
            event_bonus_max: 8.0,
            medal_bonus_gold: 4.0,
            medal_bonus_silver: 3.0,
            medal_bonus_bronze: 2.0,
            medal_bonus_max: 10.0,
            best_meetings: 5,
            meetings_considered: 6,
        }
    }
}

impl RankingParams {
    pub fn balanced_meeting_max(&self) -> f64 {
        self.event_points_cap + self.ranking_points_cap + self.event_bonus_max + self.medal_bonus_max
    }

    pub fn enhanced_meeting_max(&self) -> f64 {
        self.performance_points_cap
            + self.event_points_cap
            + self.enhance_points_cap
            + self.event_bonus_max
            + self.medal_bonus_max
    }

    pub fn medal_bonus_for(&self, rank: u32) -> f64 {
        match rank {
            1 => self.medal_bonus_gold,
            2 => self.medal_bonus_silver,
            3 => self.medal_bonus_bronze,
            _ => 0.0,
        }
    }
}

#[derive(Args, Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PonderatedParams {
    /// Results kept after the outliers are discarded.
    #[arg(long, default_value_t = 10)]
    pub max_results: usize,
    /// Fastest results discarded as outliers.
    #[arg(long, default_value_t = 3)]
    pub bests_to_be_ignored: usize,
}

impl Default for PonderatedParams {
    fn default() -> Self {
        Self {
            max_results: 10,
            bests_to_be_ignored: 3,
        }
    }
}

impl RankingConfig {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let content = fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> EngineResult<()> {
        self.ranking.validate()?;
        self.ponderated.validate()
    }
}

impl RankingParams {
    /// Point amounts, caps and bonuses by name; all feed `clamp(0.0, cap)` bounds.
    fn amounts(&self) -> [(&'static str, f64); 15] {
        [
            ("ranking_points_max", self.ranking_points_max),
            ("performance_points_max", self.performance_points_max),
            ("performance_ceiling", self.performance_ceiling),
            ("enhance_points_max", self.enhance_points_max),
            ("enhance_threshold", self.enhance_threshold),
            ("event_points_cap", self.event_points_cap),
            ("ranking_points_cap", self.ranking_points_cap),
            ("performance_points_cap", self.performance_points_cap),
            ("enhance_points_cap", self.enhance_points_cap),
            ("event_bonus_per_event", self.event_bonus_per_event),
            ("event_bonus_max", self.event_bonus_max),
            ("medal_bonus_gold", self.medal_bonus_gold),
            ("medal_bonus_silver", self.medal_bonus_silver),
            ("medal_bonus_bronze", self.medal_bonus_bronze),
            ("medal_bonus_max", self.medal_bonus_max),
        ]
    }

    pub fn validate(&self) -> EngineResult<()> {
        if let Some((name, value)) = self.amounts().into_iter().find(|(_, v)| !v.is_finite() || *v < 0.0) {
            return Err(EngineError::InvalidArgument(format!(
                "{} ({}) must be a finite, non-negative number",
                name, value
            )));
        }
        if self.best_meetings == 0 || self.best_meetings > self.meetings_considered {
            return Err(EngineError::InvalidArgument(format!(
                "best_meetings ({}) must be in 1..={}",
                self.best_meetings, self.meetings_considered
            )));
        }
        if self.performance_ceiling == 0.0 {
            return Err(EngineError::InvalidArgument(
                "performance_ceiling must be positive".to_string(),
            ));
        }
        if self.enhance_threshold == 0.0 || self.enhance_threshold > 1.0 {
            return Err(EngineError::InvalidArgument(format!(
                "enhance_threshold ({}) must be in (0, 1]",
                self.enhance_threshold
            )));
        }
        Ok(())
    }
}

impl PonderatedParams {
    pub fn validate(&self) -> EngineResult<()> {
        if self.max_results == 0 {
            return Err(EngineError::InvalidArgument(
                "max_results must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
