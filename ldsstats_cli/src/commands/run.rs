use std::path::Path;

use anyhow::Result;
use chrono::Local;
use ldsstats_lib::Scraper;

use super::{progress_bar, track};
use crate::export::{self, COUNTRY, STATE};

/// Full scrape: countries, then states not already scraped as countries,
/// then the temple list. Only filesystem errors abort the run.
pub async fn run(output_dir: &Path, scraper: &Scraper) -> Result<()> {
    let today = Local::now().date_naive();

    let pb = progress_bar("countries");
    let countries = scraper.countries_with(track(&pb)).await;
    pb.finish_and_clear();

    let pb = progress_bar("states");
    let states = scraper
        .states_with(&countries.discovery.links, track(&pb))
        .await;
    pb.finish_and_clear();

    let country_records = countries.records;
    let state_records = states.records;

    let temples = match scraper.temples().await {
        Ok(table) => Some(table),
        Err(e) => {
            tracing::error!("Error scraping temple list: {}", e);
            None
        }
    };

    println!("\nScraping complete!");
    println!("Countries scraped: {}", country_records.len());
    println!("States scraped: {}", state_records.len());
    match &temples {
        Some(table) => println!("Temples scraped: {}", table.len()),
        None => println!("Temples scraped: none (temple list unavailable)"),
    }

    let mut written = vec![
        export::export_regions(output_dir, COUNTRY, today, &country_records)?,
        export::export_regions(output_dir, STATE, today, &state_records)?,
    ];
    if let Some(table) = &temples {
        written.push(export::export_temples(output_dir, today, table)?);
    }

    println!("\nFiles saved:");
    for path in &written {
        println!("  {}", path.display());
    }
    Ok(())
}
