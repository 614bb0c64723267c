use anyhow::Result;
use clap::Args;
use ldsstats_lib::Scraper;

use crate::output::{print_json, OutputFormat};

#[derive(Args)]
pub struct LinksArgs {
    /// Index page URL (defaults to the all-countries index)
    pub index: Option<String>,

    /// Use the United States index instead of the all-countries index
    #[arg(long, conflicts_with = "index")]
    pub states: bool,
}

pub async fn run(args: &LinksArgs, scraper: &Scraper, format: &OutputFormat) -> Result<()> {
    let index = match (&args.index, args.states) {
        (Some(url), _) => url.clone(),
        (None, true) => scraper.config().states_index(),
        (None, false) => scraper.config().countries_index(),
    };

    let discovery = scraper.discover(&index).await;

    if let OutputFormat::Json = format {
        print_json(&serde_json::json!({
            "index": index,
            "strategy": discovery.strategy.map(|s| s.name()),
            "links": discovery.links,
        }));
        return Ok(());
    }

    match discovery.strategy {
        Some(strategy) => eprintln!(
            "{} links from {} ({})",
            discovery.links.len(),
            index,
            strategy
        ),
        None => eprintln!("No links found on {}", index),
    }
    for link in &discovery.links {
        println!("{}", link);
    }
    Ok(())
}
