//! Card-suffix resolution.

use super::patterns::LAST4;
use crate::models::config::ExtractionConfig;

/// Resolve the last four digits of the card number.
///
/// Scans matches in document order and returns the first whose digits
/// do not read as a plausible calendar year, so a bare "2024" in a
/// date is never mistaken for a card suffix. Labeled matches ("card
/// ending in 4321") capture through group 1, bare 4-digit runs through
/// group 2.
pub fn resolve_last4(text: &str, config: &ExtractionConfig) -> Option<String> {
    for caps in LAST4.captures_iter(text) {
        let Some(m) = caps.get(1).or_else(|| caps.get(2)) else {
            continue;
        };
        let digits = m.as_str();
        if let Ok(year) = digits.parse::<i32>() {
            if config.is_plausible_card_year(year) {
                continue;
            }
        }
        return Some(digits.to_string());
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolve(text: &str) -> Option<String> {
        resolve_last4(text, &ExtractionConfig::default())
    }

    #[test]
    fn test_labeled_suffix() {
        assert_eq!(
            resolve("Card No: XXXX XXXX XXXX 4321"),
            Some("4321".to_string())
        );
        assert_eq!(
            resolve("card ending in 7845"),
            Some("7845".to_string())
        );
    }

    #[test]
    fn test_bare_year_rejected() {
        assert_eq!(resolve("Statement for April 2024"), None);
        assert_eq!(resolve("since 1999"), None);
    }

    #[test]
    fn test_bare_non_year_accepted() {
        assert_eq!(resolve("ref 8412 enclosed"), Some("8412".to_string()));
    }

    #[test]
    fn test_first_plausible_match_wins() {
        assert_eq!(
            resolve("issued 2023, card number 5566, renewed 2024"),
            Some("5566".to_string())
        );
    }
}
