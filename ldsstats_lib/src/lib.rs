//! Library layer for the newsroom statistics scraper.
//!
//! Discovers country and state detail pages from an index page (with a
//! chain of fallback strategies), extracts the nine published metrics from
//! each page, and scrapes the temple list. Export is left to the caller.

pub mod catalog;
pub mod config;
pub mod discover;
pub mod error;
pub mod extract;
pub mod pipeline;
pub mod record;
pub mod render;
pub mod temples;

pub use newsroom_api;

pub use catalog::{Catalog, CatalogError};
pub use config::ScrapeConfig;
pub use discover::{Discovery, LinkDiscovery, Strategy};
pub use error::ScraperError;
pub use extract::{ExtractError, MetricLookup, SelectorTier};
pub use pipeline::{Progress, RegionBatch, Scraper};
pub use record::{Metric, RegionRecord};
pub use render::{NoRenderer, RenderError, Renderer};
pub use temples::{TempleError, TempleTable};
