//! Calculator configuration

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::history::History;
use crate::core::number::DEFAULT_PRECISION;
use crate::core::{AngleMode, DivisionByZero};

/// Error marker shown in place of a numeral, in the display language
pub const DEFAULT_ERROR_MARKER: &str = "خطأ";

/// Most decimal places an `f64` can meaningfully round to
pub const MAX_PRECISION: u32 = 15;

/// Errors raised while loading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Reading the file failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The YAML could not be parsed
    #[error("Invalid configuration file: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),

    /// A value is out of range
    #[error("Configuration error: {message}")]
    Invalid {
        /// What is wrong
        message: String,
    },
}

impl ConfigError {
    /// Creates a validation error
    #[must_use]
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::Invalid {
            message: message.into(),
        }
    }
}

/// Calculator settings
///
/// Every field has a default, so a configuration file only needs the keys
/// it changes:
///
/// ```yaml
/// precision: 7
/// error_marker: "Error"
/// division_by_zero: error
/// angle_mode: degrees
/// history_capacity: 50
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalculatorConfig {
    /// Decimal places kept in displayed results
    pub precision: u32,
    /// Text shown when a computation fails
    pub error_marker: String,
    /// Division-by-zero policy
    pub division_by_zero: DivisionByZero,
    /// How trigonometric functions read the display value
    pub angle_mode: AngleMode,
    /// Completed expressions kept in history
    pub history_capacity: usize,
}

impl Default for CalculatorConfig {
    fn default() -> Self {
        Self {
            precision: DEFAULT_PRECISION,
            error_marker: DEFAULT_ERROR_MARKER.to_string(),
            division_by_zero: DivisionByZero::Zero,
            angle_mode: AngleMode::Radians,
            history_capacity: History::DEFAULT_MAX_ENTRIES,
        }
    }
}

impl CalculatorConfig {
    /// Create new default configuration
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set precision, capped at [`MAX_PRECISION`]
    #[must_use]
    pub fn with_precision(mut self, precision: u32) -> Self {
        self.precision = precision.min(MAX_PRECISION);
        self
    }

    /// Set error marker
    #[must_use]
    pub fn with_error_marker(mut self, marker: impl Into<String>) -> Self {
        self.error_marker = marker.into();
        self
    }

    /// Set division-by-zero policy
    #[must_use]
    pub const fn with_division_by_zero(mut self, policy: DivisionByZero) -> Self {
        self.division_by_zero = policy;
        self
    }

    /// Set angle mode
    #[must_use]
    pub const fn with_angle_mode(mut self, mode: AngleMode) -> Self {
        self.angle_mode = mode;
        self
    }

    /// Set history capacity
    #[must_use]
    pub const fn with_history_capacity(mut self, capacity: usize) -> Self {
        self.history_capacity = capacity;
        self
    }

    /// Checks value ranges
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.precision > MAX_PRECISION {
            return Err(ConfigError::invalid(format!(
                "precision must be at most {MAX_PRECISION}, got {}",
                self.precision
            )));
        }
        if self.error_marker.trim().is_empty() {
            return Err(ConfigError::invalid("error_marker must not be empty"));
        }
        if self.history_capacity == 0 {
            return Err(ConfigError::invalid("history_capacity must be at least 1"));
        }
        Ok(())
    }

    /// Parses and validates YAML text
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml_ng::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads and validates a YAML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        let config = Self::from_yaml_str(&text)?;
        tracing::debug!(path = %path.display(), ?config, "loaded calculator config");
        Ok(config)
    }

    /// Serializes to YAML
    pub fn to_yaml(&self) -> Result<String, ConfigError> {
        Ok(serde_yaml_ng::to_string(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = CalculatorConfig::default();
        assert_eq!(config.precision, 7);
        assert_eq!(config.error_marker, DEFAULT_ERROR_MARKER);
        assert_eq!(config.division_by_zero, DivisionByZero::Zero);
        assert_eq!(config.angle_mode, AngleMode::Radians);
        assert_eq!(config.history_capacity, 100);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder() {
        let config = CalculatorConfig::new()
            .with_precision(3)
            .with_error_marker("Error")
            .with_division_by_zero(DivisionByZero::Error)
            .with_angle_mode(AngleMode::Degrees)
            .with_history_capacity(5);
        assert_eq!(config.precision, 3);
        assert_eq!(config.error_marker, "Error");
        assert_eq!(config.division_by_zero, DivisionByZero::Error);
        assert_eq!(config.angle_mode, AngleMode::Degrees);
        assert_eq!(config.history_capacity, 5);
    }

    #[test]
    fn test_builder_caps_precision() {
        let config = CalculatorConfig::new().with_precision(u32::MAX);
        assert_eq!(config.precision, MAX_PRECISION);
        assert!(config.validate().is_ok());

        let mut calc = crate::core::Calculator::with_config(config);
        for label in ["0", ".", "3", "+", "0", ".", "2", "="] {
            calc.handle(label.parse().unwrap());
        }
        assert_eq!(calc.display(), "0.5");
    }

    #[test]
    fn test_partial_yaml_uses_defaults() {
        let config = CalculatorConfig::from_yaml_str("angle_mode: degrees\n").unwrap();
        assert_eq!(config.angle_mode, AngleMode::Degrees);
        assert_eq!(config.precision, 7);
    }

    #[test]
    fn test_yaml_policy_names() {
        let config =
            CalculatorConfig::from_yaml_str("division_by_zero: error\nerror_marker: Error\n")
                .unwrap();
        assert_eq!(config.division_by_zero, DivisionByZero::Error);
        assert_eq!(config.error_marker, "Error");
    }

    #[test]
    fn test_validation_rejects_bad_values() {
        let too_precise = CalculatorConfig {
            precision: 20,
            ..CalculatorConfig::default()
        };
        assert!(matches!(
            too_precise.validate(),
            Err(ConfigError::Invalid { .. })
        ));
        assert!(CalculatorConfig::new().with_error_marker("  ").validate().is_err());
        assert!(CalculatorConfig::new().with_history_capacity(0).validate().is_err());
    }

    #[test]
    fn test_malformed_yaml() {
        assert!(matches!(
            CalculatorConfig::from_yaml_str("precision: [1, 2]"),
            Err(ConfigError::Yaml(_))
        ));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "precision: 4").unwrap();
        writeln!(file, "history_capacity: 10").unwrap();
        let config = CalculatorConfig::load(file.path()).unwrap();
        assert_eq!(config.precision, 4);
        assert_eq!(config.history_capacity, 10);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = CalculatorConfig::load(&dir.path().join("missing.yaml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }

    #[test]
    fn test_yaml_round_trip() {
        let config = CalculatorConfig::new().with_angle_mode(AngleMode::Degrees);
        let yaml = config.to_yaml().unwrap();
        assert_eq!(CalculatorConfig::from_yaml_str(&yaml).unwrap(), config);
    }
}
