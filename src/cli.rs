use std::path::PathBuf;

use clap::builder::{NonEmptyStringValueParser, TypedValueParser};
use clap::{ArgGroup, Parser};

#[derive(Parser, Debug)]
#[command(name = "bilder", version, about = "Sync JPEG captions with a bilder.csv sidecar")]
#[command(group(ArgGroup::new("mode").required(true).args(["scan", "apply"])))]
pub struct Cli {
    /// Scan a directory and create bilder.csv
    #[arg(short = 's', long = "scan")]
    pub scan: bool,

    /// Apply titles from bilder.csv in a directory
    #[arg(short = 'a', long = "apply")]
    pub apply: bool,

    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,

    #[arg(value_name = "DIR", value_parser = NonEmptyStringValueParser::new().map(PathBuf::from))]
    pub dir: PathBuf,
}
