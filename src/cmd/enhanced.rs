use crate::cmd::wants;
use crate::reports;
use clap::Args;
use swimrank::collaborators::InMemoryPersonalStandards;
use swimrank::config::RankingConfig;
use swimrank::dataset;
use swimrank::model::{Gender, Scope, Season};
use swimrank::ranking::EnhancedIndividualRanking;
use swimrank::EngineResult;
use tracing::warn;

#[derive(Args, Debug, Clone)]
pub struct EnhancedArgs {
    #[command(flatten)]
    pub config: RankingConfig,

    /// Personal standards CSV (`season_id,swimmer_id,pool,event_type,timing`).
    #[arg(long)]
    pub standards: Option<String>,

    #[arg(short, long)]
    pub gender: Option<Gender>,

    #[arg(long)]
    pub category: Option<String>,
}

pub fn run(args: &EnhancedArgs, season: &Season, config: RankingConfig) -> EngineResult<()> {
    let standards = match &args.standards {
        Some(path) => dataset::load_personal_standards_csv(path)?,
        None => {
            warn!("⚠️  No personal standards loaded; enhance points will be zero.");
            InMemoryPersonalStandards::new()
        }
    };

    let mut driver = EnhancedIndividualRanking::new(&Scope::Season(season), &standards, config)?;
    for ranking in driver.rankings_for_all_categories() {
        if wants(args.gender, args.category.as_deref(), ranking.gender, &ranking.category) {
            reports::print_enhanced_ranking(season, ranking);
        }
    }
    Ok(())
}
