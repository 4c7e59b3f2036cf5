//! Runtime configuration read from the environment.

use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use scrollstory_sections::content::PageContent;
use scrollstory_sections::registry::ScrollGeometry;

use crate::error::AppError;

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// One JSON object per line.
    #[default]
    Json,
    /// Multi-line human-readable output.
    Pretty,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "pretty" => Ok(Self::Pretty),
            other => Err(format!("expected json or pretty, got {other:?}")),
        }
    }
}

/// Settings for one page run.
#[derive(Debug, Clone, PartialEq)]
pub struct PageConfig {
    /// YAML page content; the built-in page when unset.
    pub content_path: Option<PathBuf>,
    /// Scroll script to replay; the demo sweep when unset.
    pub script_path: Option<PathBuf>,
    /// Placement of the pinned region.
    pub geometry: ScrollGeometry,
    /// Seed for the loading counter; seeded from the OS when unset.
    pub rng_seed: Option<u64>,
    /// Wait before the page is wired.
    pub init_delay: Duration,
    /// Font files that must exist before the page is wired.
    pub font_paths: Vec<PathBuf>,
    /// Log output format.
    pub log_format: LogFormat,
}

impl PageConfig {
    /// Reads the configuration from process environment variables.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if a variable is set to an invalid value.
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads the configuration through `lookup`, which returns the value of a
    /// variable or `None` when it is unset.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if a variable is set to an invalid value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let pinned_top: f64 = parse(&lookup, "PINNED_TOP", 0.0)?;
        let pinned_height: f64 = parse(&lookup, "PINNED_HEIGHT", 10_000.0)?;
        if !pinned_top.is_finite() {
            return Err(AppError::Config("PINNED_TOP must be finite".into()));
        }
        if !pinned_height.is_finite() || pinned_height <= 0.0 {
            return Err(AppError::Config(
                "PINNED_HEIGHT must be a positive number".into(),
            ));
        }

        let rng_seed = match lookup("RNG_SEED") {
            Some(raw) => Some(
                raw.parse()
                    .map_err(|e| AppError::Config(format!("RNG_SEED must be a valid u64: {e}")))?,
            ),
            None => None,
        };

        let font_paths = lookup("FONT_PATHS")
            .map(|raw| {
                raw.split(',')
                    .map(str::trim)
                    .filter(|p| !p.is_empty())
                    .map(PathBuf::from)
                    .collect()
            })
            .unwrap_or_default();

        Ok(Self {
            content_path: lookup("CONTENT_PATH").map(PathBuf::from),
            script_path: lookup("SCRIPT_PATH").map(PathBuf::from),
            geometry: ScrollGeometry {
                pinned_top,
                pinned_height,
            },
            rng_seed,
            init_delay: Duration::from_millis(parse(&lookup, "INIT_DELAY_MS", 500)?),
            font_paths,
            log_format: parse(&lookup, "LOG_FORMAT", LogFormat::default())?,
        })
    }

    /// Loads the configured page content.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Io` if the content file cannot be read, or
    /// `AppError::Content` if it is not valid page content.
    pub fn load_content(&self) -> Result<PageContent, AppError> {
        match &self.content_path {
            Some(path) => {
                let yaml = std::fs::read_to_string(path)?;
                Ok(PageContent::from_yaml_str(&yaml)?)
            }
            None => Ok(PageContent::builtin()?),
        }
    }
}

fn parse<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> Result<T, AppError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|e| AppError::Config(format!("{key} is invalid: {e}"))),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config_from(vars: &[(&str, &str)]) -> Result<PageConfig, AppError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect();
        PageConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults_apply_when_nothing_is_set() {
        // Act
        let config = config_from(&[]).unwrap();

        // Assert
        assert_eq!(config.content_path, None);
        assert_eq!(config.script_path, None);
        assert!(config.geometry.pinned_top.abs() < f64::EPSILON);
        assert!((config.geometry.pinned_height - 10_000.0).abs() < f64::EPSILON);
        assert_eq!(config.rng_seed, None);
        assert_eq!(config.init_delay, Duration::from_millis(500));
        assert!(config.font_paths.is_empty());
        assert_eq!(config.log_format, LogFormat::Json);
    }

    #[test]
    fn test_every_variable_is_read() {
        let config = config_from(&[
            ("CONTENT_PATH", "pages/creative.yaml"),
            ("SCRIPT_PATH", "scripts/sweep.json"),
            ("PINNED_TOP", "800"),
            ("PINNED_HEIGHT", "5000"),
            ("RNG_SEED", "42"),
            ("INIT_DELAY_MS", "0"),
            ("FONT_PATHS", "fonts/a.woff2, fonts/b.woff2,"),
            ("LOG_FORMAT", "Pretty"),
        ])
        .unwrap();

        assert_eq!(config.content_path, Some(PathBuf::from("pages/creative.yaml")));
        assert_eq!(config.script_path, Some(PathBuf::from("scripts/sweep.json")));
        assert!((config.geometry.pinned_top - 800.0).abs() < f64::EPSILON);
        assert_eq!(config.rng_seed, Some(42));
        assert_eq!(config.init_delay, Duration::ZERO);
        assert_eq!(
            config.font_paths,
            [PathBuf::from("fonts/a.woff2"), PathBuf::from("fonts/b.woff2")]
        );
        assert_eq!(config.log_format, LogFormat::Pretty);
    }

    #[test]
    fn test_invalid_values_are_config_errors() {
        for vars in [
            [("PINNED_HEIGHT", "tall")],
            [("PINNED_HEIGHT", "0")],
            [("RNG_SEED", "-1")],
            [("INIT_DELAY_MS", "soon")],
            [("LOG_FORMAT", "xml")],
        ] {
            let result = config_from(&vars);
            assert!(matches!(result, Err(AppError::Config(_))), "{vars:?}");
        }
    }

    #[test]
    fn test_missing_content_file_is_an_io_error() {
        let config = config_from(&[("CONTENT_PATH", "/nonexistent/page.yaml")]).unwrap();

        assert!(matches!(config.load_content(), Err(AppError::Io(_))));
    }

    #[test]
    fn test_builtin_content_loads_without_a_path() {
        let content = config_from(&[]).unwrap().load_content().unwrap();

        assert_eq!(content.sections.len(), 10);
    }
}
