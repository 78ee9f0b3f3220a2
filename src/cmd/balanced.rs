use crate::cmd::wants;
use crate::reports;
use clap::Args;
use swimrank::collaborators::TurnBasedConverter;
use swimrank::config::RankingConfig;
use swimrank::model::{Gender, Scope, Season};
use swimrank::ranking::BalancedIndividualRanking;
use swimrank::EngineResult;
use tracing::info;

#[derive(Args, Debug, Clone)]
pub struct BalancedArgs {
    #[command(flatten)]
    pub config: RankingConfig,

    #[arg(short, long)]
    pub gender: Option<Gender>,

    #[arg(long)]
    pub category: Option<String>,
}

pub fn run(args: &BalancedArgs, season: &Season, config: RankingConfig) -> EngineResult<()> {
    let converter = TurnBasedConverter::default();
    let mut driver = BalancedIndividualRanking::new(&Scope::Season(season), &converter, config)?;
    info!(
        "{} meetings with results in season #{}",
        driver.meetings_with_results().len(),
        season.id
    );

    for ranking in driver.rankings_for_all_categories() {
        if wants(args.gender, args.category.as_deref(), ranking.gender, &ranking.category) {
            reports::print_balanced_ranking(season, ranking);
        }
    }
    Ok(())
}
