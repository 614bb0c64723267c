//! Setup errors for the library layer.
//!
//! Per-page failures have their own types ([`crate::ExtractError`],
//! [`crate::TempleError`]) and never abort a run; these are the errors that
//! stop a [`crate::Scraper`] from being built at all.

use thiserror::Error;

use crate::catalog::CatalogError;

#[derive(Error, Debug)]
pub enum ScraperError {
    #[error("HTTP client error: {0}")]
    Client(#[from] newsroom_api::Error),
    #[error("fallback catalog error: {0}")]
    Catalog(#[from] CatalogError),
}
