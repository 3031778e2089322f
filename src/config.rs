use crate::error::{DashboardError, Result};
use crate::parser::DelimiterMode;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub delimiter: DelimiterMode,
    /// Year the monthly histogram counts.
    pub target_year: i32,
    /// Length of the contact and service rankings.
    pub top_n: usize,
    /// Apply the Portuguese display-name pass after loading.
    pub translate: bool,
    /// Replaces the default free-text search columns.
    pub search_fields: Option<Vec<String>>,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            delimiter: DelimiterMode::Auto,
            target_year: 2025,
            top_n: 10,
            translate: false,
            search_fields: None,
        }
    }
}

impl DashboardConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.top_n == 0 {
            return Err(DashboardError::Config { message: "top_n must be at least 1".to_string() });
        }
        if !(1970..=9999).contains(&self.target_year) {
            return Err(DashboardError::Config {
                message: format!("target_year {} is outside 1970..=9999", self.target_year),
            });
        }
        if let Some(fields) = &self.search_fields {
            if fields.iter().all(|f| f.trim().is_empty()) {
                return Err(DashboardError::Config {
                    message: "search_fields must name at least one column".to_string(),
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_toml_keeps_defaults() {
        let cfg = DashboardConfig::from_toml_str("target_year = 2024\ndelimiter = \"comma\"\n").unwrap();
        assert_eq!(cfg.target_year, 2024);
        assert_eq!(cfg.delimiter, DelimiterMode::Comma);
        assert_eq!(cfg.top_n, 10);
        assert!(!cfg.translate);
    }

    #[test]
    fn zero_top_n_is_rejected() {
        let err = DashboardConfig::from_toml_str("top_n = 0").unwrap_err();
        assert!(matches!(err, DashboardError::Config { .. }));
    }

    #[test]
    fn malformed_toml_is_a_config_error() {
        let err = DashboardConfig::from_toml_str("top_n = [").unwrap_err();
        assert!(err.to_string().starts_with("configuration error"));
    }
}
