//! Field extraction from country and state detail pages.
//!
//! The statistics live in loosely structured text: a number followed by its
//! label ("16,663,663 Total Church Membership"). Page text is flattened into
//! whitespace tokens and each metric is read as the token right before its
//! label. Selector tiers degrade from the known stat-line layout to any
//! element with "stat" in its class.

use scraper::{ElementRef, Html, Selector};
use thiserror::Error;
use tracing::{debug, warn};

use crate::record::{Metric, RegionRecord};

/// Name used when a page has no `<title>`.
pub const UNKNOWN_NAME: &str = "Unknown";

const TITLE_SEPARATOR: &str = " - ";

#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("fetch failed: {0}")]
    Fetch(#[from] newsroom_api::Error),
}

/// Which selector tier produced the token list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectorTier {
    /// `.stat-line.one-fifth` plus `.stat-line.w-graph`.
    Primary,
    /// Every `.stat-line` element.
    StatLine,
    /// Any element whose class attribute contains "stat".
    StatClass,
    /// Nothing matched.
    Empty,
}

/// Outcome of reading one metric from the token list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MetricLookup {
    Found(u64),
    /// Label not on the page.
    Missing,
    /// Label present but the token before it is not a count, e.g. "N/A".
    NotNumeric(String),
    /// Label is the first token, so there is nothing before it.
    NoPrecedingToken,
}

impl MetricLookup {
    /// The value stored in the record. Everything but `Found` becomes 0.
    pub fn value(&self) -> u64 {
        match self {
            MetricLookup::Found(v) => *v,
            _ => 0,
        }
    }
}

/// Parses a fetched detail page into a record.
///
/// Never fails: missing title or statistics degrade to "Unknown" and zeros.
pub fn parse_region(html: &str) -> RegionRecord {
    let document = Html::parse_document(html);
    let name = page_name(&document);
    let (tokens, tier) = stat_tokens(&document);
    if tier == SelectorTier::Empty {
        warn!("No statistics text found for {}; all metrics default to 0", name);
    }

    let mut record = RegionRecord::new(name);
    for metric in Metric::ALL {
        let lookup = lookup_metric(&tokens, metric);
        match &lookup {
            MetricLookup::NoPrecedingToken => warn!(
                "Malformed statistics for {}: label {} is the first token",
                record.name, metric
            ),
            MetricLookup::NotNumeric(raw) => {
                debug!("{}: {} value {:?} is not a count", record.name, metric, raw)
            }
            _ => {}
        }
        record.set(metric, lookup.value());
    }
    record
}

/// Region name from the page title, cut at the first " - ".
pub fn page_name(document: &Html) -> String {
    match select(document, "title").first() {
        Some(el) => name_from_title(&element_text(el)),
        None => UNKNOWN_NAME.to_string(),
    }
}

/// Strips the site suffix from a title, e.g. "Brazil - Facts and Statistics" -> "Brazil".
pub fn name_from_title(title: &str) -> String {
    title
        .split(TITLE_SEPARATOR)
        .next()
        .unwrap_or(title)
        .trim()
        .to_string()
}

/// Builds the token list, falling through selector tiers until one yields text.
pub fn stat_tokens(document: &Html) -> (Vec<String>, SelectorTier) {
    let mut tokens: Vec<String> = Vec::new();
    if let Some(el) = select(document, ".stat-line.one-fifth").first() {
        tokens.extend(element_text(el).split_whitespace().map(String::from));
    }
    if let Some(el) = select(document, ".stat-line.w-graph").first() {
        tokens.extend(collapsed_tokens(&element_text(el)));
    }
    if !tokens.is_empty() {
        return (tokens, SelectorTier::Primary);
    }

    warn!("Primary stat selectors matched nothing, trying .stat-line");
    for el in select(document, ".stat-line") {
        tokens.extend(collapsed_tokens(&element_text(&el)));
    }
    if !tokens.is_empty() {
        return (tokens, SelectorTier::StatLine);
    }

    warn!("No .stat-line elements, trying any element with a stat class");
    for el in select(document, "[class]") {
        let has_stat_class = el
            .value()
            .attr("class")
            .is_some_and(|c| c.to_lowercase().contains("stat"));
        if has_stat_class {
            tokens.extend(collapsed_tokens(&element_text(&el)));
        }
    }
    if !tokens.is_empty() {
        return (tokens, SelectorTier::StatClass);
    }

    (tokens, SelectorTier::Empty)
}

/// Reads `metric` as the token immediately before its label.
pub fn lookup_metric(tokens: &[String], metric: Metric) -> MetricLookup {
    let Some(idx) = tokens.iter().position(|t| t == metric.label()) else {
        return MetricLookup::Missing;
    };
    let Some(prev) = idx.checked_sub(1).and_then(|i| tokens.get(i)) else {
        return MetricLookup::NoPrecedingToken;
    };
    match parse_count(prev) {
        Some(v) => MetricLookup::Found(v),
        None => MetricLookup::NotNumeric(prev.clone()),
    }
}

/// "16,663,663" -> 16663663. Anything other than digits and commas is rejected.
pub fn parse_count(raw: &str) -> Option<u64> {
    let cleaned = raw.replace(',', "");
    if cleaned.is_empty() || !cleaned.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    cleaned.parse().ok()
}

// Spaces are dropped so multi-word labels become one token; other
// whitespace (newlines, tabs, nbsp) still separates tokens.
fn collapsed_tokens(text: &str) -> Vec<String> {
    text.replace(' ', "")
        .split_whitespace()
        .map(String::from)
        .collect()
}

fn element_text(el: &ElementRef<'_>) -> String {
    el.text().collect()
}

// Selectors are literals; one that fails to parse matches nothing.
fn select<'a>(document: &'a Html, css: &str) -> Vec<ElementRef<'a>> {
    match Selector::parse(css) {
        Ok(sel) => document.select(&sel).collect(),
        Err(e) => {
            debug!("Invalid selector {}: {:?}", css, e);
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(words: &[&str]) -> Vec<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    const BRAZIL: &str = r#"<!DOCTYPE html>
<html><head><title>Brazil - Facts and Statistics</title></head>
<body>
  <div class="stat-line one-fifth">
    <span>33</span>
    <span>Missions</span>
  </div>
  <div class="stat-line w-graph">
    <div>1,545,606</div>
    <div>Total Church Membership</div>
    <div>287</div>
    <div>Stakes</div>
    <div>2,137</div>
    <div>Congregations</div>
    <div>62</div>
    <div>Family Search Centers</div>
    <div>N/A</div>
    <div>Districts</div>
  </div>
</body></html>"#;

    #[test]
    fn test_name_from_title() {
        assert_eq!(name_from_title("Brazil - Facts and Statistics"), "Brazil");
    }

    #[test]
    fn test_name_from_title_keeps_later_separators_out() {
        assert_eq!(
            name_from_title("Guinea - Bissau - Facts and Statistics"),
            "Guinea"
        );
    }

    #[test]
    fn test_name_from_title_without_separator() {
        assert_eq!(name_from_title("  Utah\n"), "Utah");
    }

    #[test]
    fn test_page_name_missing_title() {
        let doc = Html::parse_document("<html><body><p>hi</p></body></html>");
        assert_eq!(page_name(&doc), UNKNOWN_NAME);
    }

    #[test]
    fn test_lookup_found_strips_commas() {
        let toks = tokens(&[
            "Total",
            "Church",
            "Membership",
            "16,663,663",
            "TotalChurchMembership",
            "Stakes",
        ]);
        assert_eq!(
            lookup_metric(&toks, Metric::TotalChurchMembership),
            MetricLookup::Found(16_663_663)
        );
    }

    #[test]
    fn test_lookup_missing_label() {
        let toks = tokens(&["12", "Stakes"]);
        let lookup = lookup_metric(&toks, Metric::Wards);
        assert_eq!(lookup, MetricLookup::Missing);
        assert_eq!(lookup.value(), 0);
    }

    #[test]
    fn test_lookup_non_numeric_value() {
        let toks = tokens(&["N/A", "Temples"]);
        let lookup = lookup_metric(&toks, Metric::Temples);
        assert_eq!(lookup, MetricLookup::NotNumeric("N/A".into()));
        assert_eq!(lookup.value(), 0);
    }

    #[test]
    fn test_lookup_label_at_first_position_is_malformed() {
        // Must not wrap around and read the last token.
        let toks = tokens(&["Stakes", "5", "99"]);
        let lookup = lookup_metric(&toks, Metric::Stakes);
        assert_eq!(lookup, MetricLookup::NoPrecedingToken);
        assert_eq!(lookup.value(), 0);
    }

    #[test]
    fn test_lookup_uses_first_occurrence() {
        let toks = tokens(&["4", "Temples", "9", "Temples"]);
        assert_eq!(lookup_metric(&toks, Metric::Temples), MetricLookup::Found(4));
    }

    #[test]
    fn test_parse_count() {
        assert_eq!(parse_count("1,234"), Some(1234));
        assert_eq!(parse_count("0"), Some(0));
        assert_eq!(parse_count(""), None);
        assert_eq!(parse_count(","), None);
        assert_eq!(parse_count("-3"), None);
        assert_eq!(parse_count("1.5"), None);
    }

    #[test]
    fn test_primary_tier_tokens() {
        let doc = Html::parse_document(BRAZIL);
        let (toks, tier) = stat_tokens(&doc);
        assert_eq!(tier, SelectorTier::Primary);
        assert_eq!(&toks[..2], &["33".to_string(), "Missions".to_string()]);
        assert!(toks.contains(&"TotalChurchMembership".to_string()));
        assert!(toks.contains(&"FamilySearchCenters".to_string()));
    }

    #[test]
    fn test_parse_region_full_page() {
        let record = parse_region(BRAZIL);
        assert_eq!(record.name, "Brazil");
        assert_eq!(record.total_church_membership, 1_545_606);
        assert_eq!(record.stakes, 287);
        assert_eq!(record.congregations, 2_137);
        assert_eq!(record.family_search_centers, 62);
        assert_eq!(record.missions, 33);
        // absent or non-numeric
        assert_eq!(record.districts, 0);
        assert_eq!(record.wards, 0);
        assert_eq!(record.branches, 0);
        assert_eq!(record.temples, 0);
    }

    #[test]
    fn test_stat_line_tier() {
        let html = r#"<html><head><title>Utah - Facts and Statistics</title></head><body>
<p class="stat-line">2,158,000 Total Church Membership</p>
<p class="stat-line">28 Temples</p>
</body></html>"#;
        let doc = Html::parse_document(html);
        let (toks, tier) = stat_tokens(&doc);
        assert_eq!(tier, SelectorTier::StatLine);
        assert_eq!(toks, tokens(&["2,158,000TotalChurchMembership", "28Temples"]));
    }

    #[test]
    fn test_stat_line_tier_with_newlines() {
        let html = "<html><head><title>Utah - Facts</title></head><body>\
<p class=\"stat-line\">2,158,000\nTotal Church Membership</p>\
<p class=\"stat-line\">28\nTemples</p></body></html>";
        let record = parse_region(html);
        assert_eq!(record.name, "Utah");
        assert_eq!(record.total_church_membership, 2_158_000);
        assert_eq!(record.temples, 28);
    }

    #[test]
    fn test_stat_class_tier_case_insensitive() {
        let html = "<html><head><title>Peru - Facts</title></head><body>\
<div class=\"Country-STATS\">\n803,000\nTotal Church Membership\n9\nTemples\n</div></body></html>";
        let doc = Html::parse_document(html);
        let (_, tier) = stat_tokens(&doc);
        assert_eq!(tier, SelectorTier::StatClass);

        let record = parse_region(html);
        assert_eq!(record.total_church_membership, 803_000);
        assert_eq!(record.temples, 9);
    }

    #[test]
    fn test_no_stats_gives_zero_record() {
        let html = "<html><head><title>Nowhere - Facts</title></head><body><p>Coming soon</p></body></html>";
        let doc = Html::parse_document(html);
        let (toks, tier) = stat_tokens(&doc);
        assert!(toks.is_empty());
        assert_eq!(tier, SelectorTier::Empty);

        let record = parse_region(html);
        assert_eq!(record, RegionRecord::new("Nowhere"));
    }
}
