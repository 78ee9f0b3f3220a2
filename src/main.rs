use clap::{Parser, Subcommand};
use std::process;
use swimrank::config::RankingConfig;
use swimrank::dataset;
use swimrank::model::Season;
use swimrank::EngineResult;
use tracing::{error, info};

mod cmd;
mod reports;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[arg(global = true, short, long, default_value = "data/season.json")]
    season: String,

    /// Extra results appended to the season snapshot.
    #[arg(global = true, short, long)]
    results: Option<String>,

    /// JSON ranking config; replaces the command-line parameters when given.
    #[arg(global = true, long)]
    config: Option<String>,

    #[arg(global = true, long, default_value_t = false)]
    debug: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    Records(cmd::records::RecordsArgs),
    Bests(cmd::bests::BestsArgs),
    Balanced(cmd::balanced::BalancedArgs),
    Enhanced(cmd::enhanced::EnhancedArgs),
    Standards(cmd::standards::StandardsArgs),
    Board(cmd::board::BoardArgs),
}

fn load_season(cli: &Cli) -> EngineResult<Season> {
    let mut season = dataset::load_season(&cli.season)?;
    if let Some(path) = &cli.results {
        let extra = dataset::load_results_csv(path)?;
        info!("Appending {} results from {}", extra.len(), path);
        season.results.extend(extra);
    }
    Ok(season)
}

fn resolve_config(cli: &Cli, from_args: &RankingConfig) -> EngineResult<RankingConfig> {
    match &cli.config {
        Some(path) => {
            info!("Loading config from: {}", path);
            RankingConfig::load_from_file(path)
        }
        None => {
            from_args.validate()?;
            Ok(from_args.clone())
        }
    }
}

fn run(cli: &Cli) -> EngineResult<()> {
    let season = load_season(cli)?;
    match &cli.command {
        Commands::Records(args) => cmd::records::run(args, &season),
        Commands::Bests(args) => {
            let config = resolve_config(cli, &args.config)?;
            cmd::bests::run(args, &season, &config)
        }
        Commands::Balanced(args) => {
            let config = resolve_config(cli, &args.config)?;
            cmd::balanced::run(args, &season, config)
        }
        Commands::Enhanced(args) => {
            let config = resolve_config(cli, &args.config)?;
            cmd::enhanced::run(args, &season, config)
        }
        Commands::Standards(args) => {
            let config = resolve_config(cli, &args.config)?;
            cmd::standards::run(args, &season, &config)
        }
        Commands::Board(args) => cmd::board::run(args, &season),
    }
}

fn main() {
    let cli = Cli::parse();

    let level = if cli.debug { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| level.into()))
        .with_writer(std::io::stderr)
        .init();

    info!("🏊 Initializing swimrank...");
    if let Err(e) = run(&cli) {
        error!("❌ {}", e);
        process::exit(1);
    }
}
