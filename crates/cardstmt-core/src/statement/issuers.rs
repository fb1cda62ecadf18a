//! Issuer profiles and keyword classification.

use crate::error::ExtractionError;
use crate::models::statement::Issuer;

/// Static configuration for one issuer.
///
/// Declaration order in [`PROFILES`] is the classification tie-break:
/// when two issuers' keywords both appear in a document, the first
/// declared wins.
#[derive(Debug, Clone, Copy)]
pub struct IssuerProfile {
    pub issuer: Issuer,

    /// Substrings whose presence (in lowercased text) classifies a
    /// document to this issuer.
    pub keywords: &'static [&'static str],

    /// Issuer-specific due-date label phrases, tried before the
    /// generic labels.
    pub due_labels: &'static [&'static str],

    /// Issuer-specific total-due label phrases, pooled with the
    /// generic labels.
    pub total_labels: &'static [&'static str],

    /// Synthetic billing-cycle length used when no cycle can be read
    /// from the document.
    pub cycle_length_days: i64,
}

/// All known issuers, in classification order.
pub const PROFILES: &[IssuerProfile] = &[
    IssuerProfile {
        issuer: Issuer::Hdfc,
        keywords: &["hdfc"],
        due_labels: &["payment due date", "due date"],
        total_labels: &["total amount due", "total dues"],
        cycle_length_days: 30,
    },
    IssuerProfile {
        issuer: Issuer::Icici,
        keywords: &["icici"],
        due_labels: &["payment due date", "pay by date"],
        total_labels: &["total amount due", "total outstanding"],
        cycle_length_days: 35,
    },
    IssuerProfile {
        issuer: Issuer::Sbi,
        keywords: &["sbi", "state bank of india"],
        due_labels: &["payment due date", "due date"],
        total_labels: &["total amount due", "net amount due"],
        cycle_length_days: 40,
    },
    IssuerProfile {
        issuer: Issuer::Axis,
        keywords: &["axis"],
        due_labels: &["payment due date", "due date"],
        total_labels: &["total payment due", "total amount due"],
        cycle_length_days: 45,
    },
    IssuerProfile {
        issuer: Issuer::Kotak,
        keywords: &["kotak"],
        due_labels: &["payment due date", "remember to pay by"],
        total_labels: &["total amount due", "total outstanding"],
        cycle_length_days: 60,
    },
];

/// Classify the issuer by keyword containment.
///
/// Lowercases the text once and returns the first profile with any
/// matching keyword, or `Unknown`. Overlapping keyword sets (one bank's
/// name inside another's marketing text) resolve by declaration order;
/// this is a known ambiguity, not an error.
pub fn classify_issuer(text: &str) -> Issuer {
    let lower = text.to_lowercase();
    for profile in PROFILES {
        if profile.keywords.iter().any(|k| lower.contains(k)) {
            return profile.issuer;
        }
    }
    Issuer::Unknown
}

/// Look up the static profile for a classified issuer.
pub fn profile_for(issuer: Issuer) -> Option<&'static IssuerProfile> {
    PROFILES.iter().find(|p| p.issuer == issuer)
}

/// Verify every declared profile carries at least one keyword.
///
/// Called once at extractor construction; an empty keyword set would
/// make a profile unreachable and is treated as fatal configuration.
pub fn validate_profiles() -> Result<(), ExtractionError> {
    for profile in PROFILES {
        if profile.keywords.is_empty() {
            return Err(ExtractionError::EmptyKeywords(profile.issuer.as_str()));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_by_keyword() {
        assert_eq!(
            classify_issuer("HDFC Bank Credit Card Statement"),
            Issuer::Hdfc
        );
        assert_eq!(
            classify_issuer("State Bank of India Card Services"),
            Issuer::Sbi
        );
        assert_eq!(classify_issuer("kotak mahindra bank"), Issuer::Kotak);
    }

    #[test]
    fn test_classify_unknown() {
        assert_eq!(
            classify_issuer("Some Other Bank statement"),
            Issuer::Unknown
        );
        assert_eq!(classify_issuer(""), Issuer::Unknown);
    }

    #[test]
    fn test_declaration_order_tie_break() {
        // Both keywords present: the first declared profile wins.
        assert_eq!(
            classify_issuer("HDFC and ICICI comparison brochure"),
            Issuer::Hdfc
        );
    }

    #[test]
    fn test_profiles_are_valid() {
        assert!(validate_profiles().is_ok());
        for profile in PROFILES {
            assert!(profile.cycle_length_days > 0);
        }
    }

    #[test]
    fn test_profile_lookup() {
        assert_eq!(
            profile_for(Issuer::Icici).unwrap().cycle_length_days,
            35
        );
        assert!(profile_for(Issuer::Unknown).is_none());
    }
}
