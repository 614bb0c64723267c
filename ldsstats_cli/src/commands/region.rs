use anyhow::Result;
use clap::Args;
use ldsstats_lib::Scraper;

use crate::output::{print_regions, OutputFormat};

#[derive(Args)]
pub struct RegionArgs {
    /// Country or state detail page URL
    pub url: String,
}

pub async fn run(args: &RegionArgs, scraper: &Scraper, format: &OutputFormat) -> Result<()> {
    let record = scraper.extract(&args.url).await?;
    print_regions(&[record], format)
}
