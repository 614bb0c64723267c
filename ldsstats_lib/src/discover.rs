//! Link discovery: from an index page to the detail pages it lists.
//!
//! Strategies run in a fixed order and the first one that yields at least
//! one link wins:
//!
//! 1. list items whose first anchor carries `data-code`
//! 2. any anchor pointing at a country/state detail path
//! 3. detail paths found in JSON embedded in `<script>` bodies
//! 4. strategies 2 and 1 again on a browser-rendered DOM
//! 5. the static fallback catalog
//!
//! Running out of strategies is not an error; the caller gets an empty
//! [`Discovery`] and extracts nothing for that index.

use std::collections::HashSet;

use scraper::{ElementRef, Html, Selector};
use serde_json::Value;
use tracing::{debug, info, warn};
use url::Url;

use crate::catalog::Catalog;
use crate::render::Renderer;

pub const COUNTRY_PATH: &str = "/facts-and-statistics/country/";
pub const STATE_PATH: &str = "/facts-and-statistics/state/";

const MARKER_ATTR: &str = "data-code";
// Shorter hrefs are placeholders like "#" or "/".
const MIN_MARKED_HREF_LEN: usize = 10;

/// One link discovery strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    MarkedListItems,
    DetailAnchors,
    EmbeddedJson,
    RenderedDom,
    FallbackCatalog,
}

impl Strategy {
    /// Priority order.
    pub const ORDER: [Strategy; 5] = [
        Strategy::MarkedListItems,
        Strategy::DetailAnchors,
        Strategy::EmbeddedJson,
        Strategy::RenderedDom,
        Strategy::FallbackCatalog,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Strategy::MarkedListItems => "marked list items",
            Strategy::DetailAnchors => "detail anchors",
            Strategy::EmbeddedJson => "embedded JSON",
            Strategy::RenderedDom => "rendered DOM",
            Strategy::FallbackCatalog => "fallback catalog",
        }
    }

    fn fallthrough_warning(self) -> Option<&'static str> {
        match self {
            Strategy::MarkedListItems => {
                Some("No links found with data-code attribute, trying generic anchors")
            }
            Strategy::DetailAnchors => {
                Some("No links found in HTML, checking for JSON data in script tags")
            }
            Strategy::EmbeddedJson => {
                Some("No links found via static methods, trying rendered DOM")
            }
            Strategy::RenderedDom => {
                Some("All dynamic methods failed, using fallback catalog URLs")
            }
            Strategy::FallbackCatalog => None,
        }
    }
}

impl std::fmt::Display for Strategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Links found for one index page and the strategy that found them.
///
/// `strategy` is `None` when every strategy came back empty. Links are not
/// deduplicated except for the rendered-DOM strategy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Discovery {
    pub strategy: Option<Strategy>,
    pub links: Vec<String>,
}

/// Runs the strategy chain against one index page.
pub struct LinkDiscovery<'a> {
    client: &'a newsroom_api::Client,
    renderer: &'a dyn Renderer,
    catalog: &'a Catalog,
    origin: &'a str,
}

impl<'a> LinkDiscovery<'a> {
    pub fn new(
        client: &'a newsroom_api::Client,
        renderer: &'a dyn Renderer,
        catalog: &'a Catalog,
        origin: &'a str,
    ) -> Self {
        Self {
            client,
            renderer,
            catalog,
            origin,
        }
    }

    pub async fn discover(&self, index_url: &str) -> Discovery {
        let html = match self.client.fetch_html(index_url).await {
            Ok(html) => Some(html),
            Err(e) => {
                warn!("Could not fetch index page {}: {}", index_url, e);
                None
            }
        };

        for strategy in Strategy::ORDER {
            if let Some(links) = self.attempt(strategy, index_url, html.as_deref()).await {
                info!(
                    "Found {} links from {} via {}",
                    links.len(),
                    index_url,
                    strategy
                );
                return Discovery {
                    strategy: Some(strategy),
                    links,
                };
            }
            if let Some(msg) = strategy.fallthrough_warning() {
                warn!("{}", msg);
            }
        }

        warn!("Found 0 links from {}", index_url);
        Discovery::default()
    }

    async fn attempt(
        &self,
        strategy: Strategy,
        index_url: &str,
        html: Option<&str>,
    ) -> Option<Vec<String>> {
        let links = match (strategy, html) {
            (Strategy::MarkedListItems, Some(html)) => marked_item_links(html, self.origin),
            (Strategy::DetailAnchors, Some(html)) => detail_anchor_links(html, self.origin),
            (Strategy::EmbeddedJson, Some(html)) => embedded_json_links(html, self.origin),
            (Strategy::RenderedDom, _) => self.rendered_links(index_url).await,
            (Strategy::FallbackCatalog, _) => self.catalog_links(index_url),
            (_, None) => Vec::new(),
        };
        if links.is_empty() {
            None
        } else {
            Some(links)
        }
    }

    async fn rendered_links(&self, index_url: &str) -> Vec<String> {
        match self.renderer.render(index_url).await {
            Ok(html) => rendered_page_links(&html, self.origin),
            Err(e) => {
                warn!("Rendered DOM attempt failed: {}", e);
                Vec::new()
            }
        }
    }

    fn catalog_links(&self, index_url: &str) -> Vec<String> {
        match self.catalog.for_index(index_url) {
            Some(urls) => {
                info!("Using {} hardcoded fallback URLs", urls.len());
                urls.to_vec()
            }
            None => {
                warn!("No fallback catalog list matches {}", index_url);
                Vec::new()
            }
        }
    }
}

/// Strategy 1: `<li>` elements whose first `<a>` has a `data-code` attribute.
pub fn marked_item_links(html: &str, origin: &str) -> Vec<String> {
    let document = Html::parse_document(html);
    collect_marked(&document, origin, absolutize)
}

/// Strategy 2: every `<a href>` whose target contains a country or state detail path.
pub fn detail_anchor_links(html: &str, origin: &str) -> Vec<String> {
    let document = Html::parse_document(html);
    collect_anchors(&document, origin, absolutize)
}

/// Strategy 3: detail paths inside JSON carried by inline scripts.
///
/// Only scripts that look like JSON are parsed; parse failures skip the
/// script. The first script that yields links ends the scan.
pub fn embedded_json_links(html: &str, origin: &str) -> Vec<String> {
    let document = Html::parse_document(html);
    let Some(scripts) = parse_selector("script") else {
        return Vec::new();
    };

    for script in document.select(&scripts) {
        let Some(body) = sole_text(&script) else {
            continue;
        };
        let body = body.trim();
        let lower = body.to_lowercase();
        if !(body.starts_with('{') || lower.contains("countries") || lower.contains("states")) {
            continue;
        }
        let value: Value = match serde_json::from_str(body) {
            Ok(v) => v,
            Err(e) => {
                debug!("Skipping script that is not JSON: {}", e);
                continue;
            }
        };
        let links = json_value_links(&value, origin);
        if !links.is_empty() {
            return links;
        }
    }
    Vec::new()
}

/// Recursively collects detail-path strings from objects and arrays.
///
/// Absolute `http` values are kept, `/`-rooted values are resolved against
/// `origin`, anything else is ignored. A bare top-level string is not searched.
pub fn json_value_links(value: &Value, origin: &str) -> Vec<String> {
    let mut links = Vec::new();
    walk_json(value, origin, &mut links);
    links
}

/// Strategy 4 on an already rendered page: anchors first, then marked items,
/// accepting only absolute or `/`-rooted targets, deduplicated.
pub fn rendered_page_links(html: &str, origin: &str) -> Vec<String> {
    let document = Html::parse_document(html);
    let mut links = collect_anchors(&document, origin, absolutize_rooted);
    links.extend(collect_marked(&document, origin, absolutize_rooted));
    dedup_preserving_order(links)
}

/// True when `target` points at a country or state detail page.
pub fn is_detail_path(target: &str) -> bool {
    target.contains(COUNTRY_PATH) || target.contains(STATE_PATH)
}

type Resolver = fn(&str, &str) -> Option<String>;

fn collect_marked(document: &Html, origin: &str, resolve: Resolver) -> Vec<String> {
    let (Some(items), Some(anchors)) = (parse_selector("li"), parse_selector("a")) else {
        return Vec::new();
    };
    document
        .select(&items)
        .filter_map(|li| li.select(&anchors).next())
        .filter(|a| a.value().attr(MARKER_ATTR).is_some())
        .filter_map(|a| a.value().attr("href"))
        .filter(|href| href.len() > MIN_MARKED_HREF_LEN)
        .filter_map(|href| resolve(origin, href))
        .collect()
}

fn collect_anchors(document: &Html, origin: &str, resolve: Resolver) -> Vec<String> {
    let Some(anchors) = parse_selector("a[href]") else {
        return Vec::new();
    };
    document
        .select(&anchors)
        .filter_map(|a| a.value().attr("href"))
        .filter(|href| is_detail_path(href))
        .filter_map(|href| resolve(origin, href))
        .collect()
}

fn walk_json(value: &Value, origin: &str, out: &mut Vec<String>) {
    match value {
        Value::Object(map) => map.values().for_each(|child| visit_json(child, origin, out)),
        Value::Array(items) => items.iter().for_each(|child| visit_json(child, origin, out)),
        _ => {}
    }
}

fn visit_json(child: &Value, origin: &str, out: &mut Vec<String>) {
    match child {
        Value::String(s) if is_detail_path(s) => {
            if let Some(url) = absolutize_rooted(origin, s) {
                out.push(url);
            }
        }
        Value::Object(_) | Value::Array(_) => walk_json(child, origin, out),
        _ => {}
    }
}

fn absolutize(origin: &str, href: &str) -> Option<String> {
    if href.starts_with("http") {
        return Some(href.to_string());
    }
    let base = Url::parse(origin).ok()?;
    base.join(href).ok().map(String::from)
}

fn absolutize_rooted(origin: &str, href: &str) -> Option<String> {
    if href.starts_with("http") || href.starts_with('/') {
        absolutize(origin, href)
    } else {
        None
    }
}

fn sole_text<'a>(el: &ElementRef<'a>) -> Option<&'a str> {
    let mut children = el.children();
    let only = children.next()?;
    if children.next().is_some() {
        return None;
    }
    only.value().as_text().map(|t| &**t)
}

fn dedup_preserving_order(links: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    links
        .into_iter()
        .filter(|l| seen.insert(l.clone()))
        .collect()
}

fn parse_selector(css: &str) -> Option<Selector> {
    match Selector::parse(css) {
        Ok(s) => Some(s),
        Err(e) => {
            debug!("Invalid selector {}: {:?}", css, e);
            None
        }
    }
}
