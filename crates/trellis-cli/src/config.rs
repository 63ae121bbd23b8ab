//! Settings: `trellis.toml`, then `TRELLIS__*` environment overrides.

use std::fs;
use std::path::Path;

use anyhow::Context;
use serde::Deserialize;
use trellis_core::domain::ValidationRules;

pub const DEFAULT_CONFIG_PATH: &str = "trellis.toml";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// `tracing_subscriber::EnvFilter` directive; `RUST_LOG` wins over it.
    pub log_filter: String,
    pub rules: ValidationRules,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            log_filter: "info".into(),
            rules: ValidationRules::default(),
        }
    }
}

/// Reads `path` if it exists and applies environment overrides.
pub fn load_settings(path: &Path) -> anyhow::Result<Settings> {
    let mut settings = if path.exists() {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        toml::from_str::<Settings>(&raw).with_context(|| format!("parsing {}", path.display()))?
    } else {
        Settings::default()
    };

    apply_env(&mut settings, |key| std::env::var(key).ok())?;
    Ok(settings)
}

pub fn apply_env(
    settings: &mut Settings,
    lookup: impl Fn(&str) -> Option<String>,
) -> anyhow::Result<()> {
    if let Some(v) = lookup("TRELLIS__LOG_FILTER") {
        settings.log_filter = v;
    }
    if let Some(v) = lookup("TRELLIS__DESCRIPTION_MIN_LEN") {
        settings.rules.description_min_len =
            v.parse().context("TRELLIS__DESCRIPTION_MIN_LEN must be a number")?;
    }
    if let Some(v) = lookup("TRELLIS__PEOPLE_MIN") {
        settings.rules.people_min = v.parse().context("TRELLIS__PEOPLE_MIN must be a number")?;
    }
    if let Some(v) = lookup("TRELLIS__PEOPLE_MAX") {
        settings.rules.people_max = v.parse().context("TRELLIS__PEOPLE_MAX must be a number")?;
    }
    if settings.rules.people_min > settings.rules.people_max {
        anyhow::bail!(
            "people_min ({}) is greater than people_max ({})",
            settings.rules.people_min,
            settings.rules.people_max
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::io::Write;

    use super::*;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.toml");

        let settings = load_settings(&path).unwrap();

        assert_eq!(settings.rules, ValidationRules::default());
        assert_eq!(settings.rules.people_max, 5);
    }

    #[test]
    fn file_values_are_read() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "log_filter = \"trellis_core=debug\"\n\n[rules]\npeople_max = 9\n"
        )
        .unwrap();

        let settings = load_settings(file.path()).unwrap();

        assert_eq!(settings.rules.people_max, 9);
        assert_eq!(settings.rules.description_min_len, 5);
    }

    #[test]
    fn file_log_filter_is_read() {
        let mut settings: Settings =
            toml::from_str("log_filter = \"trellis_core=debug\"\n").unwrap();
        apply_env(&mut settings, no_env).unwrap();

        assert_eq!(settings.log_filter, "trellis_core=debug");
        assert_eq!(settings.rules, ValidationRules::default());
    }

    #[test]
    fn malformed_file_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "rules = 3").unwrap();

        let err = load_settings(file.path()).unwrap_err();
        assert!(err.to_string().contains("parsing"));
    }

    #[test]
    fn env_overrides_file() {
        let env: HashMap<&str, &str> = [
            ("TRELLIS__LOG_FILTER", "warn"),
            ("TRELLIS__PEOPLE_MAX", "8"),
        ]
        .into_iter()
        .collect();
        let mut settings = Settings::default();

        apply_env(&mut settings, |k| env.get(k).map(|v| v.to_string())).unwrap();

        assert_eq!(settings.log_filter, "warn");
        assert_eq!(settings.rules.people_max, 8);
    }

    #[test]
    fn bad_env_number_is_an_error() {
        let mut settings = Settings::default();
        let err = apply_env(&mut settings, |k| {
            (k == "TRELLIS__PEOPLE_MAX").then(|| "lots".to_string())
        })
        .unwrap_err();
        assert!(err.to_string().contains("TRELLIS__PEOPLE_MAX"));
    }

    #[test]
    fn inverted_range_is_rejected() {
        let mut settings = Settings::default();
        let err = apply_env(&mut settings, |k| {
            (k == "TRELLIS__PEOPLE_MIN").then(|| "7".to_string())
        })
        .unwrap_err();
        assert!(err.to_string().contains("people_min"));
    }
}
