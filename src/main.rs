//! dlt-checker command line
//!
//! Checks a file of tickets against a window of draws loaded from JSON.

use clap::{Parser, Subcommand, ValueEnum};
use dlt_checker::{
    common::config::generate_sample_config,
    engine::winning_combinations,
    errors::DltResult,
    parse_tickets,
    report::{render_json, render_text},
    Checker, CheckerConfig, ConfigLoader, DrawNumber, DrawProvider, JsonFileDrawProvider,
    PayoutSource,
};
use log::info;
use std::path::PathBuf;

/// Super Lotto ticket checker
#[derive(Parser)]
#[command(name = "dlt-checker")]
#[command(about = "Check Super Lotto tickets against historical draws")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Check tickets against a window of draws
    Check {
        /// JSON file with an array of draws
        #[arg(short, long)]
        draws: PathBuf,

        /// Ticket file, one ticket per line
        #[arg(short, long)]
        tickets: PathBuf,

        /// First draw number of the window
        #[arg(short, long)]
        start: String,

        /// Number of draws to check (defaults to the configured value)
        #[arg(short = 'n', long)]
        count: Option<usize>,

        /// Include the additional-bet (追加) bonus
        #[arg(short, long)]
        additional: bool,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Print the tier table and payout sources
    Tiers,

    /// Write a sample configuration file
    InitConfig {
        /// Destination path
        path: PathBuf,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

fn main() -> DltResult<()> {
    let cli = Cli::parse();

    let mut loader = ConfigLoader::new();
    if let Some(path) = &cli.config {
        loader = loader.with_path(path);
    }
    let config = loader.load()?;

    let default_filter = if cli.verbose {
        "debug"
    } else {
        config.logging.level.as_filter()
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    match cli.command {
        Commands::Check {
            draws,
            tickets,
            start,
            count,
            additional,
            format,
        } => run_check(&config, draws, tickets, start, count, additional, format),
        Commands::Tiers => print_tiers(&config),
        Commands::InitConfig { path } => {
            generate_sample_config(&path)?;
            println!("Wrote sample configuration to {}", path.display());
            Ok(())
        }
    }
}

fn run_check(
    config: &CheckerConfig,
    draws_path: PathBuf,
    tickets_path: PathBuf,
    start: String,
    count: Option<usize>,
    additional: bool,
    format: OutputFormat,
) -> DltResult<()> {
    let store = JsonFileDrawProvider::new(&draws_path, config.query.page_size).load()?;
    let tickets = parse_tickets(&std::fs::read_to_string(&tickets_path)?)?;
    info!("Read {} tickets from {}", tickets.len(), tickets_path.display());

    let checker = Checker::from_config(config)?;
    let report = checker.check(
        &tickets,
        &store,
        &DrawNumber::from(start),
        count.unwrap_or(config.query.default_num_draws),
        additional || config.query.include_additional,
    )?;

    match format {
        OutputFormat::Text => print!("{}", render_text(&report)),
        OutputFormat::Json => println!("{}", render_json(&report)?),
    }
    Ok(())
}

fn print_tiers(config: &CheckerConfig) -> DltResult<()> {
    let checker = Checker::from_config(config)?;
    let schedule = checker.engine().schedule();

    println!("{:<6} {:<8} {:<10} {}", "tier", "prize", "hits", "payout");
    for ((front, back), tier) in winning_combinations() {
        let payout = match schedule.source(tier) {
            PayoutSource::Fixed(amount) => format!("{} 元", amount.to_grouped_string()),
            PayoutSource::FromSource => "from draw".to_string(),
        };
        let bonus = if tier.has_additional_bonus() { " (+追加)" } else { "" };
        println!(
            "{:<6} {:<8} {:<10} {}{}",
            tier.name(),
            tier.prize_key(),
            format!("{}+{}", front, back),
            payout,
            bonus
        );
    }
    Ok(())
}
