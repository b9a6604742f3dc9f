use std::path::PathBuf;

use anyhow::Result;
use tracing::debug;

use crate::cli;

pub const SIDECAR_FILE_NAME: &str = "bilder.csv";
pub const SIDECAR_COLUMNS: [&str; 2] = ["filename", "title"];

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Mode {
    Scan,
    Apply,
}

#[derive(Debug)]
pub struct RunConfig {
    pub mode: Mode,
    pub dir: PathBuf,
}

impl RunConfig {
    pub fn from_cli(cli: cli::Cli) -> Result<Self> {
        // The required "mode" group guarantees exactly one flag is set.
        let mode = if cli.scan { Mode::Scan } else { Mode::Apply };

        Ok(Self {
            mode,
            dir: cli.dir,
        })
    }

    pub fn print_summary(&self) {
        debug!("Mode: {}", self.mode.as_str());
        debug!("Directory: \"{}\"", self.dir.display());
        debug!("Sidecar: \"{}\"", self.dir.join(SIDECAR_FILE_NAME).display());
    }
}

impl Mode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Scan => "scan",
            Self::Apply => "apply",
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;
    use crate::cli::Cli;

    fn config(args: &[&str]) -> Result<RunConfig> {
        let cli = Cli::try_parse_from(args)?;
        RunConfig::from_cli(cli)
    }

    #[test]
    fn short_and_long_flags_select_the_mode() -> Result<()> {
        assert_eq!(config(&["bilder", "-s", "photos"])?.mode, Mode::Scan);
        assert_eq!(config(&["bilder", "--scan", "photos"])?.mode, Mode::Scan);
        assert_eq!(config(&["bilder", "-a", "photos"])?.mode, Mode::Apply);
        assert_eq!(config(&["bilder", "--apply", "photos"])?.mode, Mode::Apply);
        Ok(())
    }

    #[test]
    fn both_or_neither_mode_is_rejected() {
        assert!(Cli::try_parse_from(["bilder", "-s", "-a", "photos"]).is_err());
        assert!(Cli::try_parse_from(["bilder", "photos"]).is_err());
    }

    #[test]
    fn directory_is_required() {
        assert!(Cli::try_parse_from(["bilder", "--scan"]).is_err());
    }

    #[test]
    fn empty_directory_argument_is_rejected() {
        assert!(Cli::try_parse_from(["bilder", "--scan", ""]).is_err());
    }
}
