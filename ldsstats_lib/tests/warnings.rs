//! Degraded-mode warnings, captured through the same `ldsstats=info` filter
//! the CLI installs.

use std::io::Write;
use std::sync::{Arc, Mutex};

use ldsstats_lib::extract::parse_region;
use ldsstats_lib::{Catalog, NoRenderer, ScrapeConfig, Scraper, Strategy};
use tracing::Subscriber;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::EnvFilter;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Buffer shared by every writer the subscriber makes.
#[derive(Clone, Default)]
struct LogCapture {
    buffer: Arc<Mutex<Vec<u8>>>,
}

impl LogCapture {
    fn text(&self) -> String {
        String::from_utf8_lossy(&self.buffer.lock().unwrap()).into_owned()
    }

    fn subscriber(&self) -> impl Subscriber + Send + Sync {
        tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::new("ldsstats=info"))
            .with_writer(self.clone())
            .with_ansi(false)
            .with_target(false)
            .finish()
    }
}

struct LogCaptureWriter {
    buffer: Arc<Mutex<Vec<u8>>>,
}

impl Write for LogCaptureWriter {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.buffer.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for LogCapture {
    type Writer = LogCaptureWriter;

    fn make_writer(&'a self) -> Self::Writer {
        LogCaptureWriter {
            buffer: Arc::clone(&self.buffer),
        }
    }
}

fn capture_parse(html: &str) -> String {
    let capture = LogCapture::default();
    tracing::subscriber::with_default(capture.subscriber(), || {
        parse_region(html);
    });
    capture.text()
}

// ============================================================================
// Extraction
// ============================================================================

#[test]
fn stat_line_tier_warns_once() {
    let logs = capture_parse(
        r#"<html><head><title>Utah - Facts</title></head><body>
<p class="stat-line">28
Temples</p>
</body></html>"#,
    );
    assert!(logs.contains("WARN"));
    assert!(logs.contains("Primary stat selectors matched nothing, trying .stat-line"));
    assert!(!logs.contains("No .stat-line elements"));
}

#[test]
fn stat_class_tier_warns_for_both_fallbacks() {
    let logs = capture_parse(
        r#"<html><head><title>Peru - Facts</title></head><body>
<div class="country-stats">
9
Temples
</div>
</body></html>"#,
    );
    assert!(logs.contains("Primary stat selectors matched nothing"));
    assert!(logs.contains("No .stat-line elements, trying any element with a stat class"));
    assert!(!logs.contains("No statistics text found"));
}

#[test]
fn empty_page_warns_about_zero_record() {
    let logs = capture_parse(
        "<html><head><title>Nowhere - Facts</title></head><body><p>soon</p></body></html>",
    );
    assert!(logs.contains("No statistics text found for Nowhere; all metrics default to 0"));
}

#[test]
fn label_at_first_token_warns_as_malformed() {
    let logs = capture_parse(
        r#"<html><head><title>Tonga - Facts</title></head><body>
<div class="stat-line one-fifth">Stakes 5 Temples</div>
</body></html>"#,
    );
    assert!(logs.contains("Malformed statistics for Tonga: label Stakes is the first token"));
    // Temples has a value before it and is not reported
    assert!(!logs.contains("label Temples"));
    assert!(!logs.contains("Primary stat selectors matched nothing"));
}

#[test]
fn non_numeric_value_stays_below_info() {
    let logs = capture_parse(
        r#"<html><head><title>Chile - Facts</title></head><body>
<div class="stat-line one-fifth">N/A Temples</div>
</body></html>"#,
    );
    assert!(!logs.contains("not a count"));
    assert!(logs.is_empty());
}

// ============================================================================
// Discovery
// ============================================================================

async fn mount_fixture(server: &MockServer, route: &str, fixture: &str) {
    let body = std::fs::read_to_string(format!("tests/fixtures/{}", fixture)).unwrap();
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .mount(server)
        .await;
}

#[tokio::test]
async fn missing_marker_links_warns_before_anchors() {
    let server = MockServer::start().await;
    mount_fixture(&server, "/facts-and-statistics", "index_anchors.html").await;
    let scraper = Scraper::new(ScrapeConfig::with_origin(&server.uri())).unwrap();

    let capture = LogCapture::default();
    let discovery = {
        let _guard = tracing::subscriber::set_default(capture.subscriber());
        scraper.discover(&scraper.config().countries_index()).await
    };

    assert_eq!(discovery.strategy, Some(Strategy::DetailAnchors));
    let logs = capture.text();
    assert!(logs.contains("No links found with data-code attribute, trying generic anchors"));
    assert!(!logs.contains("checking for JSON data"));
}

#[tokio::test]
async fn exhausted_strategies_warn_then_use_catalog() {
    let server = MockServer::start().await;
    mount_fixture(&server, "/facts-and-statistics", "index_empty.html").await;
    let catalog = Catalog::parse(&format!(
        "countries:\n  - \"{0}/facts-and-statistics/country/brazil\"\n  - \"{0}/facts-and-statistics/country/peru\"\nstates:\n  - \"{0}/facts-and-statistics/state/utah\"\n",
        server.uri()
    ))
    .unwrap();
    let scraper = Scraper::new(ScrapeConfig::with_origin(&server.uri()))
        .unwrap()
        .with_renderer(Box::new(NoRenderer))
        .with_catalog(catalog);

    let capture = LogCapture::default();
    let discovery = {
        let _guard = tracing::subscriber::set_default(capture.subscriber());
        scraper.discover(&scraper.config().countries_index()).await
    };

    assert_eq!(discovery.strategy, Some(Strategy::FallbackCatalog));
    let logs = capture.text();
    for expected in [
        "No links found with data-code attribute, trying generic anchors",
        "No links found in HTML, checking for JSON data in script tags",
        "No links found via static methods, trying rendered DOM",
        "Rendered DOM attempt failed: no browser renderer available",
        "All dynamic methods failed, using fallback catalog URLs",
        "Using 2 hardcoded fallback URLs",
    ] {
        assert!(logs.contains(expected), "missing {:?} in:\n{}", expected, logs);
    }
}
