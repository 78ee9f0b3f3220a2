use crate::reports;
use clap::Args;
use swimrank::model::{MeetingId, RecordType, Season, TeamId};
use swimrank::records::{BoardOwner, RecordBoard, ReplacePolicy};
use swimrank::{EngineError, EngineResult};
use tracing::debug;

#[derive(Args, Debug, Clone)]
pub struct BoardArgs {
    /// Meeting whose record board is built.
    #[arg(short, long, conflicts_with_all = ["team", "federation"])]
    pub meeting: Option<MeetingId>,

    /// Team whose record board is built.
    #[arg(long, conflicts_with = "federation")]
    pub team: Option<TeamId>,

    #[arg(long)]
    pub federation: Option<String>,

    #[arg(long, default_value = "only_if_better")]
    pub policy: ReplacePolicy,
}

impl BoardArgs {
    fn owner_and_type(&self) -> EngineResult<(BoardOwner, RecordType)> {
        match (self.meeting, self.team, &self.federation) {
            (Some(id), _, _) => Ok((BoardOwner::Meeting(id), RecordType::MeetingRecord)),
            (_, Some(id), _) => Ok((BoardOwner::Team(id), RecordType::TeamRecord)),
            (_, _, Some(name)) => Ok((BoardOwner::Federation(name.clone()), RecordType::FederationRecord)),
            _ => Err(EngineError::InvalidArgument(
                "one of --meeting, --team or --federation is required".to_string(),
            )),
        }
    }
}

pub fn run(args: &BoardArgs, season: &Season) -> EngineResult<()> {
    let (owner, record_type) = args.owner_and_type()?;
    let mut board = RecordBoard::new(owner.clone(), record_type)?.with_policy(args.policy);

    let candidates = season.valid_results().filter(|r| match &owner {
        BoardOwner::Meeting(id) => r.meeting_id == *id,
        BoardOwner::Team(id) => r.team_id == *id,
        BoardOwner::Federation(_) => true,
    });

    let mut accepted = 0;
    for result in candidates {
        if board.add_record(result.clone()) {
            accepted += 1;
        }
    }
    debug!("{} results accepted by the board", accepted);

    reports::print_board(season, &board);
    Ok(())
}
