use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use anyhow::{Context, Result, bail};
use tracing::debug;

use crate::caption::CaptionStore;
use crate::config::SIDECAR_FILE_NAME;
use crate::csv::CsvReader;

#[derive(Debug, Default, PartialEq, Eq)]
pub struct ApplyReport {
    pub applied: usize,
    pub skipped: usize,
}

/// Positions of the required columns within a sidecar header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Columns {
    pub filename: usize,
    pub title: usize,
}

impl Columns {
    pub fn from_header(header: &[String]) -> Result<Self> {
        match (header_index(header, "filename"), header_index(header, "title")) {
            (Some(filename), Some(title)) => Ok(Self { filename, title }),
            _ => bail!("csv must include filename and title columns"),
        }
    }
}

fn header_index(header: &[String], name: &str) -> Option<usize> {
    header
        .iter()
        .position(|column| column.trim().eq_ignore_ascii_case(name))
}

/// Writes the title of every row in `dir/bilder.csv` into the named image.
///
/// Rows are applied in order; a failure leaves earlier rows applied.
pub fn apply_titles(dir: &Path, store: &impl CaptionStore) -> Result<ApplyReport> {
    let csv_path = dir.join(SIDECAR_FILE_NAME);
    let file =
        File::open(&csv_path).with_context(|| format!("open csv \"{}\"", csv_path.display()))?;
    let mut reader = CsvReader::new(BufReader::new(file));

    let Some(header) = reader.read_record().context("read header")? else {
        bail!("read header: \"{}\" is empty", csv_path.display());
    };
    let columns = Columns::from_header(&header)?;

    let mut report = ApplyReport::default();

    while let Some(record) = reader.read_record().context("read record")? {
        let Some(filename) = record.get(columns.filename).map(|name| name.trim()) else {
            report.skipped += 1;
            continue;
        };

        if filename.is_empty() {
            report.skipped += 1;
            continue;
        }

        let title = record.get(columns.title).map_or("", String::as_str);

        let path = Path::new(filename);
        let path = if path.is_absolute() {
            path.to_path_buf()
        } else {
            dir.join(path)
        };

        debug!("Applying {:?} to \"{}\"", title, path.display());

        store
            .write_caption(&path, title)
            .with_context(|| format!("apply title for {filename}"))?;
        report.applied += 1;
    }

    Ok(report)
}
