//! Application configuration.

use crate::domain::TransitionConfig;
use crate::domain::keybinding::Action;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;
use tracing::warn;

use super::args::CliArgs;

const APP_NAME: &str = "zoomfeed";
const APP_QUALIFIER: &str = "com";
const APP_ORGANIZATION: &str = "zoomfeed";

/// Log level configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Trace level.
    Trace,
    /// Debug level.
    Debug,
    /// Info level.
    #[default]
    Info,
    /// Warning level.
    Warn,
    /// Error level.
    Error,
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Trace => write!(f, "trace"),
            Self::Debug => write!(f, "debug"),
            Self::Info => write!(f, "info"),
            Self::Warn => write!(f, "warn"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// Application configuration.
#[derive(Debug, Serialize, Deserialize)]
pub struct AppConfig {
    /// Configuration file path.
    #[serde(skip)]
    pub config: Option<PathBuf>,

    /// Log file path.
    #[serde(skip)]
    pub log_path: Option<PathBuf>,

    /// Log verbosity level.
    #[serde(default)]
    pub log_level: LogLevel,

    /// Enable mouse support (click to open, drag to dismiss).
    #[serde(default = "default_true")]
    pub mouse: bool,

    /// Custom keybindings.
    #[serde(default)]
    pub keybindings: HashMap<String, Action>,

    /// UI configuration.
    #[serde(default)]
    pub ui: UiConfig,

    /// Image loading configuration.
    #[serde(default)]
    pub images: ImagesConfig,

    /// Zoom and drag-to-dismiss tuning.
    #[serde(default)]
    pub transition: TransitionConfig,
}

/// UI configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Enable `TachyonFX` animations.
    #[serde(default = "default_true")]
    pub enable_animations: bool,

    /// Drag distance, in points, of one terminal row.
    #[serde(default = "default_points_per_row")]
    pub points_per_row: f32,

    /// Frame interval while an animation is running, in milliseconds.
    #[serde(default = "default_frame_interval_ms")]
    pub frame_interval_ms: u64,

    /// Accent color (name or hex code).
    #[serde(default = "default_accent_color")]
    pub accent_color: String,
}

impl UiConfig {
    /// Frame interval as a duration.
    #[must_use]
    pub fn frame_interval(&self) -> Duration {
        Duration::from_millis(self.frame_interval_ms.max(1))
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            enable_animations: true,
            points_per_row: default_points_per_row(),
            frame_interval_ms: default_frame_interval_ms(),
            accent_color: default_accent_color(),
        }
    }
}

/// Image loading configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ImagesConfig {
    /// Share one fetch between every view requesting the same URL.
    #[serde(default)]
    pub single_flight: bool,

    /// Maximum number of decoded images kept in memory. Unbounded if unset.
    #[serde(default)]
    pub cache_capacity: Option<usize>,

    /// Downscale decoded images wider than this.
    #[serde(default)]
    pub max_decode_width: Option<u32>,

    /// Request timeout in seconds. No timeout if unset.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

impl ImagesConfig {
    /// Request timeout as a duration.
    #[must_use]
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

fn default_true() -> bool {
    true
}

fn default_points_per_row() -> f32 {
    20.0
}

fn default_frame_interval_ms() -> u64 {
    16
}

fn default_accent_color() -> String {
    "Cyan".to_string()
}

impl AppConfig {
    /// Merges CLI arguments into the configuration.
    pub fn merge_with_args(&mut self, args: CliArgs) {
        if let Some(config_path) = args.config {
            self.config = Some(config_path);
        }
        if let Some(log_path) = args.log_path {
            self.log_path = Some(log_path);
        }
        if let Some(log_level) = args.log_level {
            self.log_level = log_level;
        }
        if let Some(mouse) = args.mouse {
            self.mouse = mouse;
        }
        if let Some(enable_animations) = args.enable_animations {
            self.ui.enable_animations = enable_animations;
        }
        if let Some(threshold) = args.dismiss_threshold {
            self.transition.dismiss_threshold = threshold;
        }
        if let Some(single_flight) = args.single_flight {
            self.images.single_flight = single_flight;
        }
        if let Some(capacity) = args.cache_capacity {
            self.images.cache_capacity = Some(capacity);
        }
        self.validate();
    }

    /// Replaces values the app cannot run with by their defaults.
    pub fn validate(&mut self) {
        if self.ui.frame_interval_ms == 0 {
            warn!("ui.frame_interval_ms must be at least 1, using default");
            self.ui.frame_interval_ms = default_frame_interval_ms();
        }
        if !(self.ui.points_per_row.is_finite() && self.ui.points_per_row > 0.0) {
            warn!(value = self.ui.points_per_row, "ui.points_per_row must be positive, using default");
            self.ui.points_per_row = default_points_per_row();
        }

        let defaults = TransitionConfig::default();
        let transition = &mut self.transition;
        if !transition.spring_back.is_valid() {
            warn!(spring = ?transition.spring_back, "transition.spring_back cannot settle, using default");
            transition.spring_back = defaults.spring_back;
        }
        if !(transition.dismiss_threshold.is_finite() && transition.dismiss_threshold >= 0.0) {
            warn!(
                value = transition.dismiss_threshold,
                "transition.dismiss_threshold must be non-negative, using default"
            );
            transition.dismiss_threshold = defaults.dismiss_threshold;
        }
    }

    /// Returns default config directory.
    #[must_use]
    pub fn default_config_dir() -> Option<PathBuf> {
        ProjectDirs::from(APP_QUALIFIER, APP_ORGANIZATION, APP_NAME)
            .map(|dirs| dirs.config_dir().to_path_buf())
    }

    /// Returns default log file path.
    #[must_use]
    pub fn default_log_path() -> Option<PathBuf> {
        ProjectDirs::from(APP_QUALIFIER, APP_ORGANIZATION, APP_NAME)
            .map(|dirs| dirs.data_dir().join("zoomfeed.log"))
    }

    /// Returns effective log path.
    #[must_use]
    pub fn effective_log_path(&self) -> Option<PathBuf> {
        self.log_path.clone().or_else(Self::default_log_path)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            config: None,
            log_path: None,
            log_level: LogLevel::Info,
            mouse: true,
            keybindings: HashMap::new(),
            ui: UiConfig::default(),
            images: ImagesConfig::default(),
            transition: TransitionConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use test_case::test_case;

    #[test]
    fn test_parse_config_sections() {
        let toml_content = r#"
            log_level = "debug"

            [ui]
            enable_animations = false

            [images]
            single_flight = true
            cache_capacity = 64

            [transition]
            dismiss_threshold = 150.0

            [keybindings]
            "Ctrl+q" = "Quit"
            "o" = "Open"
        "#;

        let config: AppConfig = toml::from_str(toml_content).expect("Failed to parse config");

        assert_eq!(config.log_level, LogLevel::Debug);
        assert!(!config.ui.enable_animations);
        assert!((config.ui.points_per_row - 20.0).abs() < f32::EPSILON);
        assert!(config.images.single_flight);
        assert_eq!(config.images.cache_capacity, Some(64));
        assert!((config.transition.dismiss_threshold - 150.0).abs() < f32::EPSILON);
        assert!((config.transition.content_fade_distance - 300.0).abs() < f32::EPSILON);

        assert_eq!(config.keybindings.len(), 2);
        assert_eq!(config.keybindings.get("Ctrl+q"), Some(&Action::Quit));
        assert_eq!(config.keybindings.get("o"), Some(&Action::Open));
    }

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();

        assert!(config.keybindings.is_empty());
        assert!(config.mouse);
        assert!(config.ui.enable_animations);
        assert!(!config.images.single_flight);
        assert_eq!(config.images.cache_capacity, None);
        assert_eq!(config.images.timeout(), None);
        assert_eq!(config.transition, TransitionConfig::default());
    }

    #[test]
    fn test_cli_overrides_file() {
        let mut config: AppConfig = toml::from_str(
            r"
            [images]
            single_flight = false
            ",
        )
        .expect("parse");

        let args = CliArgs::parse_from([
            "zoomfeed",
            "--single-flight",
            "true",
            "--dismiss-threshold",
            "80",
            "--cache-capacity",
            "10",
            "--mouse",
            "false",
        ]);
        config.merge_with_args(args);

        assert!(config.images.single_flight);
        assert_eq!(config.images.cache_capacity, Some(10));
        assert!((config.transition.dismiss_threshold - 80.0).abs() < f32::EPSILON);
        assert!(!config.mouse);
        assert!(config.ui.enable_animations);
    }

    #[test_case("[ui]\nframe_interval_ms = 0" ; "zero frame interval")]
    #[test_case("[ui]\npoints_per_row = 0.0" ; "zero points per row")]
    #[test_case("[ui]\npoints_per_row = -5.0" ; "negative points per row")]
    #[test_case("[transition.spring_back]\nresponse = 0.0\ndamping_ratio = 0.8" ; "zero response")]
    #[test_case("[transition.spring_back]\nresponse = -1.0\ndamping_ratio = 0.8" ; "negative response")]
    #[test_case("[transition]\ndismiss_threshold = -10.0" ; "negative threshold")]
    fn test_validate_restores_defaults(toml_content: &str) {
        let mut config: AppConfig = toml::from_str(toml_content).expect("parse");
        config.validate();

        let defaults = AppConfig::default();
        assert_eq!(config.ui.frame_interval(), defaults.ui.frame_interval());
        assert!((config.ui.points_per_row - defaults.ui.points_per_row).abs() < f32::EPSILON);
        assert_eq!(config.transition, defaults.transition);
    }

    #[test]
    fn test_validate_keeps_sane_values() {
        let mut config: AppConfig = toml::from_str(
            "[ui]\nframe_interval_ms = 33\npoints_per_row = 10.0\n[transition]\ndismiss_threshold = 0.0",
        )
        .expect("parse");
        config.validate();

        assert_eq!(config.ui.frame_interval(), Duration::from_millis(33));
        assert!((config.ui.points_per_row - 10.0).abs() < f32::EPSILON);
        assert!(config.transition.dismiss_threshold.abs() < f32::EPSILON);
    }

    #[test]
    fn test_frame_interval_never_zero() {
        let ui = UiConfig {
            frame_interval_ms: 0,
            ..UiConfig::default()
        };
        assert_eq!(ui.frame_interval(), Duration::from_millis(1));
    }

    #[test]
    fn test_cli_threshold_is_validated() {
        let mut config = AppConfig::default();
        config.merge_with_args(CliArgs::parse_from([
            "zoomfeed",
            "--dismiss-threshold=-5",
        ]));
        assert!((config.transition.dismiss_threshold - 100.0).abs() < f32::EPSILON);
    }
}
