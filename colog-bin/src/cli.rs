use clap::Parser;
use simplelog::LevelFilter;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "colog",
    version,
    about = "Page through multi-line structured log files"
)]
pub struct Cli {
    /// Layout file describing the log format
    #[arg(long, value_name = "PATH")]
    pub layout: Option<PathBuf>,

    /// Write diagnostics to this file; nothing is logged without it
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    #[arg(long, value_name = "LEVEL", default_value = "info")]
    pub log_level: LevelFilter,

    /// Log files or glob patterns, paged in natural order
    #[arg(required = true, value_name = "FILE")]
    pub files: Vec<String>,
}
