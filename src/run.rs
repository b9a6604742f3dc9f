use anyhow::Result;
use tracing::info;

use crate::apply;
use crate::config::{Mode, RunConfig, SIDECAR_FILE_NAME};
use crate::jpeg::JpegExif;
use crate::scan;

pub fn run(config: RunConfig) -> Result<()> {
    let store = JpegExif;

    match config.mode {
        Mode::Scan => {
            let report = scan::scan_directory(&config.dir, &store)?;

            info!(
                "Wrote {} rows to \"{}\" ({} entries skipped).",
                report.rows,
                config.dir.join(SIDECAR_FILE_NAME).display(),
                report.skipped
            );
        }
        Mode::Apply => {
            let report = apply::apply_titles(&config.dir, &store)?;

            info!(
                "Applied {} titles from \"{}\" ({} rows skipped).",
                report.applied,
                config.dir.join(SIDECAR_FILE_NAME).display(),
                report.skipped
            );
        }
    }

    Ok(())
}
