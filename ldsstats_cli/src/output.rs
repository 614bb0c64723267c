use anyhow::Result;
use ldsstats_lib::RegionRecord;
use tabled::settings::Style;
use tabled::{Table, Tabled};

#[derive(Clone, Debug)]
pub enum OutputFormat {
    Table,
    Json,
    Csv,
    Markdown,
}

#[derive(Tabled)]
struct RegionRow {
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Members")]
    members: String,
    #[tabled(rename = "Stakes")]
    stakes: u64,
    #[tabled(rename = "Congregations")]
    congregations: u64,
    #[tabled(rename = "Wards")]
    wards: u64,
    #[tabled(rename = "Branches")]
    branches: u64,
    #[tabled(rename = "FamilySearch")]
    family_search_centers: u64,
    #[tabled(rename = "Temples")]
    temples: u64,
    #[tabled(rename = "Missions")]
    missions: u64,
    #[tabled(rename = "Districts")]
    districts: u64,
}

fn build_region_rows(records: &[RegionRecord]) -> Vec<RegionRow> {
    records
        .iter()
        .map(|r| RegionRow {
            name: r.name.clone(),
            members: format_count(r.total_church_membership),
            stakes: r.stakes,
            congregations: r.congregations,
            wards: r.wards,
            branches: r.branches,
            family_search_centers: r.family_search_centers,
            temples: r.temples,
            missions: r.missions,
            districts: r.districts,
        })
        .collect()
}

pub fn print_regions(records: &[RegionRecord], format: &OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Table => print_regions_table(records),
        OutputFormat::Markdown => print_regions_markdown(records),
        OutputFormat::Csv => print_regions_csv(records)?,
        OutputFormat::Json => print_json(&records),
    }
    Ok(())
}

pub fn print_regions_table(records: &[RegionRecord]) {
    println!("{}", Table::new(build_region_rows(records)));
}

pub fn print_regions_markdown(records: &[RegionRecord]) {
    let mut table = Table::new(build_region_rows(records));
    table.with(Style::markdown());
    println!("{}", table);
}

/// CSV to stdout uses the export column names and raw counts.
pub fn print_regions_csv(records: &[RegionRecord]) -> Result<()> {
    crate::export::write_regions(std::io::stdout(), records)
}

pub fn print_json<T: serde::Serialize>(data: &T) {
    match serde_json::to_string_pretty(data) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Failed to serialize to JSON: {}", e),
    }
}

/// Thousands separators for the membership column.
fn format_count(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
