use super::app_config::LogLevel;
use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "zoomfeed",
    version,
    about = "A terminal news feed with zoom transitions and drag-to-dismiss",
    long_about = None
)]
pub struct CliArgs {
    /// Configuration file path.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Log file path.
    #[arg(long, value_name = "PATH")]
    pub log_path: Option<PathBuf>,

    /// Log verbosity level.
    #[arg(long, value_enum)]
    pub log_level: Option<LogLevel>,

    /// Enable mouse support.
    #[arg(long)]
    pub mouse: Option<bool>,

    /// Enable `TachyonFX` animations.
    #[arg(long)]
    pub enable_animations: Option<bool>,

    /// Drag distance, in points, past which releasing dismisses the detail view.
    #[arg(long, value_name = "POINTS")]
    pub dismiss_threshold: Option<f32>,

    /// Share one image fetch between all views of the same URL.
    #[arg(long)]
    pub single_flight: Option<bool>,

    /// Maximum number of decoded images kept in memory.
    #[arg(long, value_name = "N")]
    pub cache_capacity: Option<usize>,
}
