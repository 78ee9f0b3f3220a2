use crate::reports;
use clap::Args;
use swimrank::model::{RecordType, Season, SwimmerId, TeamId};
use swimrank::records::{RecordCollection, ReplacePolicy};
use swimrank::EngineResult;
use tracing::info;

#[derive(Args, Debug, Clone)]
pub struct RecordsArgs {
    #[arg(short = 't', long, default_value = "FOR")]
    pub record_type: RecordType,

    #[arg(long, default_value = "only_if_better")]
    pub policy: ReplacePolicy,

    /// Only results swum for this team.
    #[arg(long)]
    pub team: Option<TeamId>,

    /// Only results of this swimmer.
    #[arg(long)]
    pub swimmer: Option<SwimmerId>,
}

pub fn run(args: &RecordsArgs, season: &Season) -> EngineResult<()> {
    let mut collection = RecordCollection::new(Some(args.record_type)).with_policy(args.policy);

    let mut stored = 0;
    for result in season.valid_results() {
        if args.team.is_some_and(|t| t != result.team_id) {
            continue;
        }
        if args.swimmer.is_some_and(|s| s != result.swimmer_id) {
            continue;
        }
        if collection.add(result.clone(), None).is_stored() {
            stored += 1;
        }
    }

    info!("{} of {} results changed the collection", stored, season.results.len());
    reports::print_records(season, &collection);
    Ok(())
}
