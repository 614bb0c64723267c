//! Run configuration: entry points and timing knobs.

use std::time::Duration;

pub const DEFAULT_ORIGIN: &str = "https://newsroom.churchofjesuschrist.org";
pub const DEFAULT_TEMPLES_URL: &str = "https://www.churchofjesuschrist.org/temples/list?lang=eng";

const COUNTRIES_INDEX_PATH: &str = "/facts-and-statistics";
const STATES_INDEX_PATH: &str = "/facts-and-statistics/country/united-states";

/// Settings shared by discovery, extraction and the temple scrape.
#[derive(Debug, Clone)]
pub struct ScrapeConfig {
    /// Origin used to resolve relative detail links, without trailing slash.
    pub origin: String,
    /// Temple list page carrying the embedded JSON payload.
    pub temples_url: String,
    /// Upper bound on waiting for the first link in a rendered page.
    pub render_timeout: Duration,
    /// Pause after the first link appears, before reading the DOM.
    pub settle_delay: Duration,
    /// Per-request HTTP timeout.
    pub request_timeout: Duration,
}

impl Default for ScrapeConfig {
    fn default() -> Self {
        Self {
            origin: DEFAULT_ORIGIN.to_string(),
            temples_url: DEFAULT_TEMPLES_URL.to_string(),
            render_timeout: Duration::from_secs(10),
            settle_delay: Duration::from_secs(2),
            request_timeout: Duration::from_secs(30),
        }
    }
}

impl ScrapeConfig {
    /// Default config pointed at a different origin (staging, mock server).
    pub fn with_origin(origin: &str) -> Self {
        Self {
            origin: origin.trim_end_matches('/').to_string(),
            ..Self::default()
        }
    }

    /// The all-countries facts-and-statistics index.
    pub fn countries_index(&self) -> String {
        format!("{}{}", self.origin, COUNTRIES_INDEX_PATH)
    }

    /// The United States country page, which lists the state pages.
    pub fn states_index(&self) -> String {
        format!("{}{}", self.origin, STATES_INDEX_PATH)
    }
}
