mod commands;
mod output;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use elections_lib::{default_election_config, load_election_config, ElectionConfig};

use crate::output::OutputFormat;

#[derive(Parser)]
#[command(name = "elections")]
#[command(about = "Load election results, manage desk calls and render published artifacts")]
struct Cli {
    /// Output format: table, markdown, csv or json
    #[arg(long, default_value = "table", global = true)]
    output: String,

    /// SQLite database path
    #[arg(long, env = "ELECTIONS_DB", default_value = "elections.db", global = true)]
    db: PathBuf,

    /// Election config YAML (defaults to the bundled config)
    #[arg(long, env = "ELECTIONS_CONFIG", global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the database schema
    Bootstrap(commands::bootstrap::BootstrapArgs),
    /// Replace stored results with an ingestion CSV export
    Load(commands::load::LoadArgs),
    /// Seed desk calls and race meta
    Seed(commands::seed::SeedArgs),
    /// Edit the desk call for a result or race
    Call(commands::call::CallArgs),
    /// Render published JSON artifacts
    Render(commands::render::RenderArgs),
    /// Print electoral college and balance of power
    Summary(commands::summary::SummaryArgs),
}

fn election_config(path: Option<&PathBuf>) -> Result<ElectionConfig> {
    Ok(match path {
        Some(path) => load_election_config(path)?,
        None => default_election_config()?,
    })
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("elections=info".parse()?),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let format = match cli.output.as_str() {
        "json" => OutputFormat::Json,
        "csv" => OutputFormat::Csv,
        "md" | "markdown" => OutputFormat::Markdown,
        _ => OutputFormat::Table,
    };

    match &cli.command {
        Commands::Bootstrap(args) => commands::bootstrap::run(args, &cli.db)?,
        Commands::Load(args) => commands::load::run(args, &cli.db)?,
        Commands::Seed(args) => {
            let config = election_config(cli.config.as_ref())?;
            commands::seed::run(args, &cli.db, &config)?
        }
        Commands::Call(args) => commands::call::run(args, &cli.db)?,
        Commands::Render(args) => {
            let config = election_config(cli.config.as_ref())?;
            commands::render::run(args, &cli.db, &config)?
        }
        Commands::Summary(args) => {
            let config = election_config(cli.config.as_ref())?;
            commands::summary::run(args, &cli.db, &config, &format)?
        }
    }

    Ok(())
}
