use std::fs::File;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::debug;

use crate::caption::CaptionStore;
use crate::config::{SIDECAR_COLUMNS, SIDECAR_FILE_NAME};
use crate::csv::CsvWriter;
use crate::discover;

#[derive(Debug, Default, PartialEq, Eq)]
pub struct ScanReport {
    pub rows: usize,
    pub skipped: usize,
}

/// Writes `bilder.csv` in `dir` with one row per JPEG and its current caption.
///
/// On error the sidecar may already hold the header and some rows.
pub fn scan_directory(dir: &Path, store: &impl CaptionStore) -> Result<ScanReport> {
    let listing = discover::collect_images(dir)?;

    let csv_path = dir.join(SIDECAR_FILE_NAME);
    let file = File::create(&csv_path)
        .with_context(|| format!("create csv \"{}\"", csv_path.display()))?;
    let mut writer = CsvWriter::new(file);

    writer
        .write_record(&SIDECAR_COLUMNS)
        .context("write header")?;

    let mut report = ScanReport {
        rows: 0,
        skipped: listing.skipped,
    };

    for image in &listing.images {
        let title = store
            .read_caption(&image.path)
            .with_context(|| format!("read caption of {}", image.name))?;

        debug!("Read \"{}\": {:?}", image.name, title);

        writer
            .write_record(&[image.name.as_str(), title.as_str()])
            .with_context(|| format!("write row for {}", image.name))?;
        report.rows += 1;
    }

    writer.flush().context("flush csv")?;
    Ok(report)
}
