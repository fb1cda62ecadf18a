//! Configuration structures for the extraction pipeline.
//!
//! Every heuristic tunable lives here so that behavior differences
//! between deployments are configuration diffs, not code forks.

use serde::{Deserialize, Serialize};

use crate::error::ExtractionError;

/// Main configuration for the cardstmt pipeline.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CardstmtConfig {
    /// PDF processing configuration.
    pub pdf: PdfConfig,

    /// Field extraction configuration.
    pub extraction: ExtractionConfig,
}

/// PDF processing configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PdfConfig {
    /// Minimum extracted-text length (after trimming) before the raw
    /// byte-decode fallback is attempted.
    pub min_text_length: usize,
}

impl Default for PdfConfig {
    fn default() -> Self {
        Self { min_text_length: 1 }
    }
}

/// Field extraction configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Characters scanned to the left of a label anchor for amounts.
    pub amount_window_left: usize,

    /// Characters scanned past the end of a label anchor for amounts.
    pub amount_window_right: usize,

    /// Characters scanned from a due-date label anchor.
    pub date_window_right: usize,

    /// Characters scanned past a statement-period label anchor.
    pub cycle_window_right: usize,

    /// Length of the document prefix scanned for a billing-cycle pair
    /// when no period label is present.
    pub cycle_scan_prefix: usize,

    /// Minimum day-difference for a plausible monthly cycle.
    pub min_cycle_days: i64,

    /// Maximum day-difference for a plausible monthly cycle.
    pub max_cycle_days: i64,

    /// Earliest year accepted for a due date.
    pub due_year_min: i32,

    /// Latest year accepted for a due date.
    pub due_year_max: i32,

    /// Lower bound of the calendar-year range used to reject a bare
    /// 4-digit run as a card suffix.
    pub card_year_min: i32,

    /// Upper bound of the calendar-year range used to reject a bare
    /// 4-digit run as a card suffix.
    pub card_year_max: i32,

    /// Reject documents whose classified issuer is not supported,
    /// instead of returning a partial record tagged UNKNOWN.
    pub reject_unsupported: bool,

    /// Maximum number of transaction preview lines per record.
    pub preview_limit: usize,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            amount_window_left: 100,
            amount_window_right: 250,
            date_window_right: 200,
            cycle_window_right: 300,
            cycle_scan_prefix: 600,
            min_cycle_days: 25,
            max_cycle_days: 35,
            due_year_min: 2020,
            due_year_max: 2100,
            card_year_min: 1900,
            card_year_max: 2100,
            reject_unsupported: true,
            preview_limit: 20,
        }
    }
}

impl ExtractionConfig {
    /// Check internal consistency. Called once at extractor
    /// construction so a bad configuration fails before any document is
    /// processed.
    pub fn validate(&self) -> Result<(), ExtractionError> {
        if self.due_year_min > self.due_year_max {
            return Err(ExtractionError::InvalidYearRange {
                min: self.due_year_min,
                max: self.due_year_max,
            });
        }
        if self.card_year_min > self.card_year_max {
            return Err(ExtractionError::InvalidYearRange {
                min: self.card_year_min,
                max: self.card_year_max,
            });
        }
        if self.min_cycle_days < 1 || self.min_cycle_days > self.max_cycle_days {
            return Err(ExtractionError::InvalidCycleBounds {
                min: self.min_cycle_days,
                max: self.max_cycle_days,
            });
        }
        Ok(())
    }

    /// Whether a parsed date falls in the plausible due-date range.
    pub fn due_year_in_range(&self, year: i32) -> bool {
        (self.due_year_min..=self.due_year_max).contains(&year)
    }

    /// Whether a bare 4-digit run reads as a calendar year.
    pub fn is_plausible_card_year(&self, value: i32) -> bool {
        (self.card_year_min..=self.card_year_max).contains(&value)
    }
}

impl CardstmtConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &std::path::Path) -> Result<Self, std::io::Error> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string()))
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &std::path::Path) -> Result<(), std::io::Error> {
        let content = serde_json::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string()))?;
        std::fs::write(path, content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(ExtractionConfig::default().validate().is_ok());
    }

    #[test]
    fn test_inverted_year_range_rejected() {
        let config = ExtractionConfig {
            due_year_min: 2100,
            due_year_max: 2020,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_inverted_cycle_bounds_rejected() {
        let config = ExtractionConfig {
            min_cycle_days: 40,
            max_cycle_days: 35,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_roundtrip() {
        let config = CardstmtConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        let back: CardstmtConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(
            back.extraction.amount_window_left,
            config.extraction.amount_window_left
        );
        assert_eq!(back.extraction.reject_unsupported, true);
    }
}
