//! CLI configuration.
//!
//! Layers, lowest priority first: built-in defaults, an optional TOML file,
//! `BATEMAN_*` environment variables (`__` separates nested keys, e.g.
//! `BATEMAN_SIMULATION__GRID_POINTS=500`), then command-line flags.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use bateman_decay::SimulationConfig;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Log line encoding on stderr.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable lines.
    #[default]
    Text,
    /// One JSON object per event.
    Json,
}

/// Terminal chart dimensions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    /// Plot area width in columns.
    pub width: usize,
    /// Plot area height in rows.
    pub height: usize,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            width: 72,
            height: 20,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    /// Log level filter string (e.g. "info", "debug", "bateman_decay=trace").
    pub log_level: String,
    pub log_format: LogFormat,
    pub chart: ChartConfig,
    pub simulation: SimulationConfig,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            log_level: "warn".to_string(),
            log_format: LogFormat::Text,
            chart: ChartConfig::default(),
            simulation: SimulationConfig::default(),
        }
    }
}

impl CliConfig {
    /// `<config dir>/bateman/config.toml`, if the platform has a config dir.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("bateman").join("config.toml"))
    }

    /// Load configuration from `path` (required when given, optional default
    /// location otherwise) and the process environment.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        Self::load_from(path, None)
    }

    /// As [`load`](Self::load), reading environment variables from `env`
    /// instead of the process environment when provided.
    fn load_from(path: Option<&Path>, env: Option<HashMap<String, String>>) -> Result<Self> {
        let mut builder = config::Config::builder();
        match path {
            Some(p) => builder = builder.add_source(config::File::from(p).required(true)),
            None => {
                if let Some(p) = Self::default_path() {
                    builder = builder.add_source(config::File::from(p).required(false));
                }
            }
        }
        builder = builder.add_source(
            config::Environment::with_prefix("BATEMAN")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true)
                .source(env),
        );

        builder
            .build()
            .context("failed to read configuration")?
            .try_deserialize()
            .context("invalid configuration")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bateman_decay::DegeneratePolicy;

    fn env(pairs: &[(&str, &str)]) -> Option<HashMap<String, String>> {
        Some(
            pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        )
    }

    fn write_config(contents: &str) -> (tempfile::TempDir, PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, contents).unwrap();
        (dir, path)
    }

    #[test]
    fn defaults() {
        let cfg = CliConfig::default();
        assert_eq!(cfg.log_level, "warn");
        assert_eq!(cfg.log_format, LogFormat::Text);
        assert_eq!(cfg.chart, ChartConfig { width: 72, height: 20 });
        assert_eq!(cfg.simulation, SimulationConfig::default());
    }

    #[test]
    fn default_path_ends_with_config_toml() {
        if let Some(p) = CliConfig::default_path() {
            assert!(p.ends_with("bateman/config.toml"), "{p:?}");
        }
    }

    #[test]
    fn empty_sources_give_defaults() {
        let (_dir, path) = write_config("");
        let cfg = CliConfig::load_from(Some(&path), env(&[])).unwrap();
        assert_eq!(cfg, CliConfig::default());
    }

    #[test]
    fn file_overrides_defaults() {
        let (_dir, path) = write_config(
            r#"
log_level = "debug"
log_format = "json"

[chart]
width = 100

[simulation]
grid_points = 500
degenerate_policy = "reject"
"#,
        );
        let cfg = CliConfig::load_from(Some(&path), env(&[])).unwrap();
        assert_eq!(cfg.log_level, "debug");
        assert_eq!(cfg.log_format, LogFormat::Json);
        assert_eq!(cfg.chart.width, 100);
        assert_eq!(cfg.chart.height, 20);
        assert_eq!(cfg.simulation.grid_points, 500);
        assert_eq!(cfg.simulation.degenerate_policy, DegeneratePolicy::Reject);
        assert_eq!(cfg.simulation.horizon_factor, 5.0);
    }

    #[test]
    fn environment_overrides_file() {
        let (_dir, path) = write_config("log_level = \"debug\"\n[simulation]\ngrid_points = 500\n");
        let cfg = CliConfig::load_from(
            Some(&path),
            env(&[
                ("BATEMAN_LOG_LEVEL", "trace"),
                ("BATEMAN_SIMULATION__GRID_POINTS", "1200"),
            ]),
        )
        .unwrap();
        assert_eq!(cfg.log_level, "trace");
        assert_eq!(cfg.simulation.grid_points, 1200);
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.toml");
        assert!(CliConfig::load_from(Some(&path), env(&[])).is_err());
    }

    #[test]
    fn unknown_log_format_is_an_error() {
        let (_dir, path) = write_config("log_format = \"xml\"\n");
        assert!(CliConfig::load_from(Some(&path), env(&[])).is_err());
    }

    #[test]
    fn bad_policy_is_an_error() {
        let (_dir, path) = write_config("[simulation]\ndegenerate_policy = \"ignore\"\n");
        assert!(CliConfig::load_from(Some(&path), env(&[])).is_err());
    }
}
