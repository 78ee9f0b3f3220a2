use crate::reports;
use clap::Args;
use swimrank::bests::SeasonalEventBests;
use swimrank::collaborators::TurnBasedConverter;
use swimrank::config::RankingConfig;
use swimrank::model::Season;
use swimrank::EngineResult;

#[derive(Args, Debug, Clone)]
pub struct BestsArgs {
    #[command(flatten)]
    pub config: RankingConfig,
}

pub fn run(_args: &BestsArgs, season: &Season, config: &RankingConfig) -> EngineResult<()> {
    let converter = TurnBasedConverter::default();
    let bests = SeasonalEventBests::build(season, &converter, config.reference_pool);
    reports::print_seasonal_bests(&bests);
    Ok(())
}
