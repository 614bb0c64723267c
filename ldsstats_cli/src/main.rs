mod commands;
mod export;
mod output;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use ldsstats_lib::{ScrapeConfig, Scraper};

use crate::output::OutputFormat;

#[derive(Parser)]
#[command(name = "ldsstats")]
#[command(about = "Scrape membership and congregation statistics from the Church newsroom")]
struct Cli {
    /// Output format for printed records: table, json, csv or markdown
    #[arg(long, default_value = "table", global = true)]
    format: String,

    /// Directory the dated CSV files are written to
    #[arg(long, default_value = "./data", global = true)]
    output: PathBuf,

    /// Newsroom origin (overrides LDSSTATS_ORIGIN)
    #[arg(long, global = true)]
    origin: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scrape countries, states and temples and write dated CSV files
    Run,
    /// Print the detail links discovered from an index page
    Links(commands::links::LinksArgs),
    /// Extract a single country or state page
    Region(commands::region::RegionArgs),
    /// Scrape and print every country
    Countries,
    /// Scrape and print every state
    States,
}

fn load_config(origin: Option<&str>) -> ScrapeConfig {
    let origin = origin
        .map(str::to_string)
        .or_else(|| std::env::var("LDSSTATS_ORIGIN").ok());
    let mut config = match origin {
        Some(origin) => ScrapeConfig::with_origin(&origin),
        None => ScrapeConfig::default(),
    };
    if let Ok(url) = std::env::var("LDSSTATS_TEMPLES_URL") {
        config.temples_url = url;
    }
    config
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("ldsstats=info".parse()?),
        )
        .with_target(false)
        .init();

    let cli = Cli::parse();

    let format = match cli.format.as_str() {
        "json" => OutputFormat::Json,
        "csv" => OutputFormat::Csv,
        "markdown" | "md" => OutputFormat::Markdown,
        _ => OutputFormat::Table,
    };

    let scraper = Scraper::new(load_config(cli.origin.as_deref()))?;

    match &cli.command {
        Commands::Run => commands::run::run(&cli.output, &scraper).await?,
        Commands::Links(args) => commands::links::run(args, &scraper, &format).await?,
        Commands::Region(args) => commands::region::run(args, &scraper, &format).await?,
        Commands::Countries => commands::regions::run_countries(&scraper, &format).await?,
        Commands::States => commands::regions::run_states(&scraper, &format).await?,
    }

    Ok(())
}
