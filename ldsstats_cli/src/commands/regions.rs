use anyhow::Result;
use ldsstats_lib::Scraper;

use super::{progress_bar, track};
use crate::output::{print_regions, OutputFormat};

pub async fn run_countries(scraper: &Scraper, format: &OutputFormat) -> Result<()> {
    let pb = progress_bar("countries");
    let batch = scraper.countries_with(track(&pb)).await;
    pb.finish_and_clear();
    print_regions(&batch.records, format)
}

/// States are printed without the entries that the countries index also lists.
pub async fn run_states(scraper: &Scraper, format: &OutputFormat) -> Result<()> {
    let countries = scraper.discover(&scraper.config().countries_index()).await;
    let pb = progress_bar("states");
    let batch = scraper.states_with(&countries.links, track(&pb)).await;
    pb.finish_and_clear();
    print_regions(&batch.records, format)
}
