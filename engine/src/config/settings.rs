// Engine settings, loaded from a JSON file or taken from the defaults below.
use crate::error::{EngineError, EngineResult};
use serde::Deserialize;
use std::path::Path;

/// Where rows whose `Data` cell could not be parsed end up after sorting.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum NullDatePolicy {
    First,
    #[default]
    Last,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct EngineSettings {
    pub csv_delimiter: String, // Should be char, but JSON string is easier
    /// chrono format strings tried in order after RFC 3339.
    pub date_formats: Vec<String>,
    /// Formats with no day; such cells are read as the first of the month.
    pub month_formats: Vec<String>,
    pub null_dates: NullDatePolicy,
    /// Shown for card fields the row does not carry.
    pub placeholder: String,
    /// Accepted headers for the revenue curve, first match wins.
    pub revenue_curve_aliases: Vec<String>,
}

impl Default for EngineSettings {
    fn default() -> Self {
        EngineSettings {
            csv_delimiter: ",".to_string(),
            date_formats: [
                "%Y-%m-%d %H:%M:%S%.f",
                "%Y-%m-%dT%H:%M:%S%.f",
                "%Y-%m-%d %H:%M:%S",
                "%Y-%m-%dT%H:%M:%S",
                "%Y-%m-%d %H:%M",
                "%Y-%m-%d",
                "%d/%m/%Y %H:%M:%S",
                "%d/%m/%Y %H:%M",
                "%d/%m/%Y",
                "%Y/%m/%d",
            ]
            .iter()
            .map(|f| f.to_string())
            .collect(),
            month_formats: vec!["%Y-%m".to_string(), "%m/%Y".to_string()],
            null_dates: NullDatePolicy::Last,
            placeholder: "-".to_string(),
            revenue_curve_aliases: vec![
                "Curva Receita do Consultor".to_string(),
                "Curva Receita".to_string(),
            ],
        }
    }
}

impl EngineSettings {
    pub fn from_json_str(raw: &str) -> EngineResult<Self> {
        let settings: EngineSettings = serde_json::from_str(raw)
            .map_err(|e| EngineError::ConfigError(format!("invalid settings JSON: {}", e)))?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> EngineResult<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| {
            EngineError::ConfigError(format!("failed to read '{}': {}", path.display(), e))
        })?;
        tracing::debug!(path = %path.display(), "Loaded engine settings file");
        Self::from_json_str(&raw)
    }

    pub fn validate(&self) -> EngineResult<()> {
        self.delimiter()?;
        if self.revenue_curve_aliases.is_empty() {
            return Err(EngineError::ConfigError(
                "revenue_curve_aliases must list at least one column name".to_string(),
            ));
        }
        Ok(())
    }

    pub fn delimiter(&self) -> EngineResult<u8> {
        match self.csv_delimiter.as_bytes() {
            [b] if b.is_ascii() => Ok(*b),
            _ => Err(EngineError::ConfigError(format!(
                "csv_delimiter must be a single ASCII character, got '{}'",
                self.csv_delimiter
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn defaults_are_valid() {
        let settings = EngineSettings::default();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.delimiter().unwrap(), b',');
        assert_eq!(settings.null_dates, NullDatePolicy::Last);
        assert_eq!(settings.placeholder, "-");
    }

    #[test]
    fn partial_json_keeps_remaining_defaults() {
        let settings =
            EngineSettings::from_json_str(r#"{ "csv_delimiter": ";", "null_dates": "first" }"#)
                .unwrap();
        assert_eq!(settings.delimiter().unwrap(), b';');
        assert_eq!(settings.null_dates, NullDatePolicy::First);
        assert_eq!(settings.revenue_curve_aliases.len(), 2);
    }

    #[test]
    fn rejects_multi_char_delimiter() {
        let result = EngineSettings::from_json_str(r#"{ "csv_delimiter": ";;" }"#);
        assert!(matches!(result, Err(EngineError::ConfigError(_))));
    }

    #[test]
    fn rejects_empty_alias_list() {
        let result = EngineSettings::from_json_str(r#"{ "revenue_curve_aliases": [] }"#);
        assert!(matches!(result, Err(EngineError::ConfigError(_))));
    }

    #[test]
    fn loads_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, r#"{{ "placeholder": "n/a" }}"#).unwrap();
        let settings = EngineSettings::from_json_file(file.path()).unwrap();
        assert_eq!(settings.placeholder, "n/a");
    }

    #[test]
    fn missing_file_is_config_error() {
        let result = EngineSettings::from_json_file("does-not-exist.json");
        assert!(matches!(result, Err(EngineError::ConfigError(_))));
    }
}
