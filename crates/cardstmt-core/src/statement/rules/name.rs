//! Customer-name resolution.

use super::patterns::{HONORIFIC, NAME_PATTERNS, NAME_STOP};

/// Resolve the cardholder name.
///
/// Tries each label pattern in priority order; the capture is cut at
/// the first stop-word so it does not bleed into an adjacent field,
/// then accepted when its length is plausible (3-59 chars). Falls back
/// to an honorific match ("Mr. First Last"), else unresolved.
pub fn resolve_customer_name(text: &str) -> Option<String> {
    for pattern in NAME_PATTERNS.iter() {
        let Some(caps) = pattern.captures(text) else {
            continue;
        };
        let name = NAME_STOP.replace(&caps[1], "").trim().to_string();
        let len = name.chars().count();
        if len > 2 && len < 60 {
            return Some(name);
        }
    }

    HONORIFIC
        .find(text)
        .map(|m| m.as_str().trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labeled_name() {
        assert_eq!(
            resolve_customer_name("Customer Name: Rahul Sharma Card No: 4321"),
            Some("Rahul Sharma".to_string())
        );
        assert_eq!(
            resolve_customer_name("Statement for Priya Nair Period Mar 2024"),
            Some("Priya Nair".to_string())
        );
    }

    #[test]
    fn test_stop_word_truncation() {
        assert_eq!(
            resolve_customer_name("Cardholder: Anil Kumar Statement Period 01/03/2024"),
            Some("Anil Kumar".to_string())
        );
    }

    #[test]
    fn test_honorific_fallback() {
        assert_eq!(
            resolve_customer_name("issued to Mr. Vikram Singh on request"),
            Some("Mr. Vikram Singh".to_string())
        );
    }

    #[test]
    fn test_unresolved() {
        assert_eq!(resolve_customer_name("no names in this text"), None);
    }

    #[test]
    fn test_label_inside_longer_word_ignored() {
        assert_eq!(resolve_customer_name("surname field left blank"), None);
        assert_eq!(resolve_customer_name("filename holds the export date"), None);
    }

    #[test]
    fn test_too_short_capture_skipped() {
        // A 2-char capture is implausible; the honorific fallback runs.
        assert_eq!(
            resolve_customer_name("Name: Jo Account 123 but see Mr. Arun Mehta"),
            Some("Mr. Arun Mehta".to_string())
        );
    }
}
