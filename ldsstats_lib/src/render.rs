//! Rendering seam for index pages whose links are only built by JavaScript.
//!
//! Discovery calls a [`Renderer`] as its fourth strategy. Without the
//! `browser` feature the only implementation is [`NoRenderer`], which
//! always reports itself unavailable; discovery treats that as "no links".

use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("no browser renderer available")]
    Unavailable,
    #[error("browser error: {0}")]
    Browser(String),
    #[error("no link appeared within {0:?}")]
    Timeout(Duration),
}

/// Loads a page in a browser-like environment and returns the rendered HTML.
#[async_trait]
pub trait Renderer: Send + Sync {
    async fn render(&self, url: &str) -> Result<String, RenderError>;
}

/// Renderer used when no browser is configured.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoRenderer;

#[async_trait]
impl Renderer for NoRenderer {
    async fn render(&self, _url: &str) -> Result<String, RenderError> {
        Err(RenderError::Unavailable)
    }
}

#[cfg(feature = "browser")]
pub use chrome::ChromeRenderer;

#[cfg(feature = "browser")]
mod chrome {
    use std::time::{Duration, Instant};

    use async_trait::async_trait;
    use chromiumoxide::{Browser, BrowserConfig};
    use futures::StreamExt;
    use tokio::time::sleep;
    use tracing::debug;

    use super::{RenderError, Renderer};

    const POLL_INTERVAL: Duration = Duration::from_millis(250);

    /// Headless Chrome session per render call.
    ///
    /// The browser is launched for one page load and closed afterwards
    /// whether or not the load succeeded.
    #[derive(Debug, Clone)]
    pub struct ChromeRenderer {
        render_timeout: Duration,
        settle_delay: Duration,
    }

    impl ChromeRenderer {
        pub fn new(render_timeout: Duration, settle_delay: Duration) -> Self {
            Self {
                render_timeout,
                settle_delay,
            }
        }

        async fn load(&self, browser: &Browser, url: &str) -> Result<String, RenderError> {
            let page = browser.new_page(url).await.map_err(browser_err)?;

            let deadline = Instant::now() + self.render_timeout;
            while page.find_element("a").await.is_err() {
                if Instant::now() >= deadline {
                    return Err(RenderError::Timeout(self.render_timeout));
                }
                sleep(POLL_INTERVAL).await;
            }

            sleep(self.settle_delay).await;
            page.content().await.map_err(browser_err)
        }
    }

    #[async_trait]
    impl Renderer for ChromeRenderer {
        async fn render(&self, url: &str) -> Result<String, RenderError> {
            let config = BrowserConfig::builder()
                .no_sandbox()
                .arg("--disable-dev-shm-usage")
                .build()
                .map_err(RenderError::Browser)?;
            let (mut browser, mut handler) = Browser::launch(config).await.map_err(browser_err)?;
            let events = tokio::spawn(async move {
                while let Some(event) = handler.next().await {
                    if event.is_err() {
                        break;
                    }
                }
            });

            let result = self.load(&browser, url).await;

            if let Err(e) = browser.close().await {
                debug!("Failed to close browser: {}", e);
            }
            let _ = browser.wait().await;
            events.abort();

            result
        }
    }

    fn browser_err(e: chromiumoxide::error::CdpError) -> RenderError {
        RenderError::Browser(e.to_string())
    }
}
