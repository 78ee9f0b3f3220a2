use crate::reports;
use clap::Args;
use std::fs;
use swimrank::bests::PonderatedStandards;
use swimrank::collaborators::InMemoryTimeStandards;
use swimrank::config::RankingConfig;
use swimrank::model::{Scope, Season};
use swimrank::EngineResult;
use tracing::info;

#[derive(Args, Debug, Clone)]
pub struct StandardsArgs {
    #[command(flatten)]
    pub config: RankingConfig,

    /// Previously stored standards (JSON), used to split inserts from updates.
    #[arg(long)]
    pub existing: Option<String>,

    /// Writes the resulting standards as JSON.
    #[arg(short, long)]
    pub out: Option<String>,
}

pub fn run(args: &StandardsArgs, season: &Season, config: &RankingConfig) -> EngineResult<()> {
    let mut store: InMemoryTimeStandards = match &args.existing {
        Some(path) => serde_json::from_str(&fs::read_to_string(path)?)?,
        None => InMemoryTimeStandards::new(),
    };

    let mut standards = PonderatedStandards::new(&Scope::Season(season), config.ponderated.clone())?;
    standards.scan_for_gender_category_and_event();
    reports::print_storage_plan(&standards.prepare_to_store(&store)?);

    if let Some(path) = &args.out {
        let summary = standards.to_db(&mut store)?;
        fs::write(path, serde_json::to_string_pretty(&store)?)?;
        info!(
            "💾 Saved {} standards to {} ({} new, {} updated)",
            store.len(),
            path,
            summary.inserted,
            summary.updated
        );
    }
    Ok(())
}
