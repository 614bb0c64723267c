//! Dated CSV files: `<dir>/<kind>-YYYY-MM-DD.csv`.

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::NaiveDate;
use ldsstats_lib::{Metric, RegionRecord, TempleTable};

pub const COUNTRY: &str = "country";
pub const STATE: &str = "state";
pub const TEMPLE: &str = "temple";

pub fn dated_path(dir: &Path, kind: &str, date: NaiveDate) -> PathBuf {
    dir.join(format!("{}-{}.csv", kind, date.format("%Y-%m-%d")))
}

/// Region CSV with a header row even when there are no records.
pub fn write_regions<W: Write>(writer: W, records: &[RegionRecord]) -> Result<()> {
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);
    let header = std::iter::once("Name").chain(Metric::ALL.into_iter().map(Metric::label));
    wtr.write_record(header)?;
    for record in records {
        wtr.serialize(record)?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn write_temples<W: Write>(writer: W, table: &TempleTable) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    if !table.columns.is_empty() {
        wtr.write_record(&table.columns)?;
    }
    for row in table.rows() {
        wtr.write_record(row)?;
    }
    wtr.flush()?;
    Ok(())
}

fn create(dir: &Path, kind: &str, date: NaiveDate) -> Result<(PathBuf, File)> {
    fs::create_dir_all(dir)
        .with_context(|| format!("failed to create output directory {}", dir.display()))?;
    let path = dated_path(dir, kind, date);
    let file =
        File::create(&path).with_context(|| format!("failed to create {}", path.display()))?;
    Ok((path, file))
}

pub fn export_regions(
    dir: &Path,
    kind: &str,
    date: NaiveDate,
    records: &[RegionRecord],
) -> Result<PathBuf> {
    let (path, file) = create(dir, kind, date)?;
    write_regions(file, records).with_context(|| format!("failed to write {}", path.display()))?;
    Ok(path)
}

pub fn export_temples(dir: &Path, date: NaiveDate, table: &TempleTable) -> Result<PathBuf> {
    let (path, file) = create(dir, TEMPLE, date)?;
    write_temples(file, table).with_context(|| format!("failed to write {}", path.display()))?;
    Ok(path)
}
