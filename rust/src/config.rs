//! Runtime settings, read once from the environment.
//!
//! | Variable         | Meaning                          | Default        |
//! |------------------|----------------------------------|----------------|
//! | `TESTLIB_LOG`    | `tracing` filter directive       | `testlib=warn` |
//! | `TESTLIB_REPORT` | perf report format, `text`/`json`| `text`         |

use std::str::FromStr;
use std::sync::OnceLock;

use thiserror::Error;

pub const LOG_ENV: &str = "TESTLIB_LOG";
pub const REPORT_ENV: &str = "TESTLIB_REPORT";
pub const DEFAULT_LOG_FILTER: &str = "testlib=warn";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("unknown report format {0:?} (expected \"text\" or \"json\")")]
    UnknownReportFormat(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReportFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for ReportFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "text" => Ok(ReportFormat::Text),
            "json" => Ok(ReportFormat::Json),
            _ => Err(ConfigError::UnknownReportFormat(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub log_filter: String,
    pub report: ReportFormat,
    /// Why `TESTLIB_REPORT` was ignored, reported once logging is up.
    pub report_error: Option<ConfigError>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            log_filter: DEFAULT_LOG_FILTER.to_string(),
            report: ReportFormat::Text,
            report_error: None,
        }
    }
}

impl Settings {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build settings from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut settings = Settings::default();

        if let Some(filter) = lookup(LOG_ENV).filter(|f| !f.trim().is_empty()) {
            settings.log_filter = filter;
        }

        if let Some(raw) = lookup(REPORT_ENV) {
            match raw.parse() {
                Ok(format) => settings.report = format,
                Err(e) => settings.report_error = Some(e),
            }
        }

        settings
    }
}

static SETTINGS: OnceLock<Settings> = OnceLock::new();

/// Process-wide settings, read from the environment on first use.
pub fn settings() -> &'static Settings {
    SETTINGS.get_or_init(Settings::from_env)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let s = Settings::from_lookup(lookup(&[]));
        assert_eq!(s, Settings::default());
        assert_eq!(s.log_filter, "testlib=warn");
        assert_eq!(s.report, ReportFormat::Text);
    }

    #[test]
    fn test_overrides() {
        let s = Settings::from_lookup(lookup(&[
            (LOG_ENV, "testlib=debug"),
            (REPORT_ENV, "JSON"),
        ]));
        assert_eq!(s.log_filter, "testlib=debug");
        assert_eq!(s.report, ReportFormat::Json);
        assert_eq!(s.report_error, None);
    }

    #[test]
    fn test_unknown_report_falls_back_to_text() {
        let s = Settings::from_lookup(lookup(&[(REPORT_ENV, "yaml")]));
        assert_eq!(s.report, ReportFormat::Text);
        assert_eq!(
            s.report_error,
            Some(ConfigError::UnknownReportFormat("yaml".into()))
        );
        assert_eq!(
            "yaml".parse::<ReportFormat>(),
            Err(ConfigError::UnknownReportFormat("yaml".into()))
        );
    }
}
