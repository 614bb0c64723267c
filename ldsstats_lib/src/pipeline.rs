//! Sequential scrape pipeline: discovery feeds extraction.
//!
//! Every fetch happens one URL at a time. Nothing is kept between runs.

use tracing::{error, info};

use crate::catalog::Catalog;
use crate::config::ScrapeConfig;
use crate::discover::{Discovery, LinkDiscovery};
use crate::error::ScraperError;
use crate::extract::{parse_region, ExtractError};
use crate::record::RegionRecord;
use crate::render::Renderer;
use crate::temples::{parse_temple_list, TempleError, TempleTable};

/// Links discovered for an index page and the records extracted from them.
#[derive(Debug, Clone, Default)]
pub struct RegionBatch {
    pub discovery: Discovery,
    pub records: Vec<RegionRecord>,
}

/// Reported after each detail page, whether or not it was extracted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress<'a> {
    pub url: &'a str,
    pub done: usize,
    pub total: usize,
}

/// Owns the page client, fallback catalog and renderer for one run.
pub struct Scraper {
    config: ScrapeConfig,
    client: newsroom_api::Client,
    catalog: Catalog,
    renderer: Box<dyn Renderer>,
}

impl Scraper {
    /// Builds a scraper with the embedded catalog and the default renderer
    /// (headless Chrome with the `browser` feature, otherwise none).
    pub fn new(config: ScrapeConfig) -> Result<Self, ScraperError> {
        let client = newsroom_api::Client::with_timeout(config.request_timeout)?;
        let catalog = Catalog::embedded()?;
        let renderer = default_renderer(&config);
        Ok(Self {
            config,
            client,
            catalog,
            renderer,
        })
    }

    pub fn with_renderer(mut self, renderer: Box<dyn Renderer>) -> Self {
        self.renderer = renderer;
        self
    }

    pub fn with_catalog(mut self, catalog: Catalog) -> Self {
        self.catalog = catalog;
        self
    }

    pub fn config(&self) -> &ScrapeConfig {
        &self.config
    }

    /// Detail-page links for an index page. Never fails; see [`LinkDiscovery`].
    pub async fn discover(&self, index_url: &str) -> Discovery {
        LinkDiscovery::new(
            &self.client,
            self.renderer.as_ref(),
            &self.catalog,
            &self.config.origin,
        )
        .discover(index_url)
        .await
    }

    /// Fetches one detail page and extracts its record.
    pub async fn extract(&self, url: &str) -> Result<RegionRecord, ExtractError> {
        let html = self.client.fetch_html(url).await?;
        let record = parse_region(&html);
        info!("{}", record.name);
        Ok(record)
    }

    /// Extracts every URL in order, logging and skipping failures.
    pub async fn collect(&self, urls: &[String]) -> Vec<RegionRecord> {
        self.collect_with(urls, |_| {}).await
    }

    /// Like [`Scraper::collect`], reporting [`Progress`] after each URL.
    pub async fn collect_with<F>(&self, urls: &[String], mut on_each: F) -> Vec<RegionRecord>
    where
        F: FnMut(Progress<'_>),
    {
        let total = urls.len();
        let mut records = Vec::with_capacity(total);
        for (idx, url) in urls.iter().enumerate() {
            match self.extract(url).await {
                Ok(record) => records.push(record),
                Err(e) => error!("Error scraping {}: {}", url, e),
            }
            on_each(Progress {
                url,
                done: idx + 1,
                total,
            });
        }
        records
    }

    /// Country records from the all-countries index.
    pub async fn countries(&self) -> RegionBatch {
        self.countries_with(|_| {}).await
    }

    pub async fn countries_with<F>(&self, on_each: F) -> RegionBatch
    where
        F: FnMut(Progress<'_>),
    {
        let discovery = self.discover(&self.config.countries_index()).await;
        let records = self.collect_with(&discovery.links, on_each).await;
        RegionBatch { discovery, records }
    }

    /// State records from the United States page, skipping any link that
    /// was already scraped as a country.
    pub async fn states(&self, country_links: &[String]) -> RegionBatch {
        self.states_with(country_links, |_| {}).await
    }

    pub async fn states_with<F>(&self, country_links: &[String], on_each: F) -> RegionBatch
    where
        F: FnMut(Progress<'_>),
    {
        let mut discovery = self.discover(&self.config.states_index()).await;
        discovery.links = exclude_links(discovery.links, country_links);
        let records = self.collect_with(&discovery.links, on_each).await;
        RegionBatch { discovery, records }
    }

    /// Temple list rows from the embedded page data.
    pub async fn temples(&self) -> Result<TempleTable, TempleError> {
        let html = self.client.fetch_html(&self.config.temples_url).await?;
        parse_temple_list(&html)
    }
}

/// Drops every link that appears in `exclude`, keeping order and duplicates otherwise.
pub fn exclude_links(links: Vec<String>, exclude: &[String]) -> Vec<String> {
    links
        .into_iter()
        .filter(|l| !exclude.contains(l))
        .collect()
}

#[cfg(feature = "browser")]
fn default_renderer(config: &ScrapeConfig) -> Box<dyn Renderer> {
    Box::new(crate::render::ChromeRenderer::new(
        config.render_timeout,
        config.settle_delay,
    ))
}

#[cfg(not(feature = "browser"))]
fn default_renderer(_config: &ScrapeConfig) -> Box<dyn Renderer> {
    Box::new(crate::render::NoRenderer)
}
