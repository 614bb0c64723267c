//! Temple list scrape.
//!
//! The temple list page is a Next.js app: its last `<script>` holds the page
//! props as JSON, and `props.pageProps.templeList` is an array of temple
//! objects. Each object is flattened into one row with dotted column names
//! for nested fields.

use std::collections::{HashMap, HashSet};

use scraper::{Html, Selector};
use serde_json::{Map, Value};
use thiserror::Error;
use tracing::debug;

const TEMPLE_LIST_POINTER: &str = "/props/pageProps/templeList";

#[derive(Error, Debug)]
pub enum TempleError {
    #[error("fetch failed: {0}")]
    Fetch(#[from] newsroom_api::Error),
    #[error("no <script> element on temple list page")]
    MissingScript,
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("props.pageProps.templeList missing or not an array")]
    MissingTempleList,
}

/// Flattened temple rows with a shared, first-seen column order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TempleTable {
    pub columns: Vec<String>,
    rows: Vec<HashMap<String, String>>,
}

impl TempleTable {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Cell values for row `idx` in column order; missing cells are empty.
    pub fn row(&self, idx: usize) -> Option<Vec<&str>> {
        let row = self.rows.get(idx)?;
        Some(
            self.columns
                .iter()
                .map(|c| row.get(c).map(String::as_str).unwrap_or(""))
                .collect(),
        )
    }

    pub fn rows(&self) -> impl Iterator<Item = Vec<&str>> + '_ {
        (0..self.rows.len()).filter_map(move |i| self.row(i))
    }

    fn push(&mut self, cells: Vec<(String, String)>, seen: &mut HashSet<String>) {
        for (col, _) in &cells {
            if seen.insert(col.clone()) {
                self.columns.push(col.clone());
            }
        }
        self.rows.push(cells.into_iter().collect());
    }
}

/// Parses the temple list page into a table.
pub fn parse_temple_list(html: &str) -> Result<TempleTable, TempleError> {
    let payload = last_script_text(html).ok_or(TempleError::MissingScript)?;
    let value: Value = serde_json::from_str(payload.trim())?;
    let temples = value
        .pointer(TEMPLE_LIST_POINTER)
        .and_then(Value::as_array)
        .ok_or(TempleError::MissingTempleList)?;

    let mut table = TempleTable::default();
    let mut seen = HashSet::new();
    for temple in temples {
        match temple {
            Value::Object(map) => {
                let mut cells = Vec::new();
                flatten("", map, &mut cells);
                table.push(cells, &mut seen);
            }
            other => debug!("Skipping non-object temple entry: {}", other),
        }
    }
    Ok(table)
}

fn last_script_text(html: &str) -> Option<String> {
    let document = Html::parse_document(html);
    let scripts = Selector::parse("script").ok()?;
    document
        .select(&scripts)
        .last()
        .map(|el| el.text().collect())
}

fn flatten(prefix: &str, map: &Map<String, Value>, out: &mut Vec<(String, String)>) {
    for (key, value) in map {
        let column = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{}.{}", prefix, key)
        };
        match value {
            Value::Object(inner) => flatten(&column, inner, out),
            Value::String(s) => out.push((column, s.clone())),
            Value::Null => out.push((column, String::new())),
            Value::Array(_) | Value::Bool(_) | Value::Number(_) => {
                out.push((column, value.to_string()))
            }
        }
    }
}
