//! Common regex patterns for statement field extraction.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Monetary amount: optional currency marker, digit groups with
    /// comma/space separators, optional 1-2 digit decimal tail.
    /// Whitespace separators keep partially-wrapped numbers like
    /// "12 543.89" as a single token.
    pub static ref AMOUNT: Regex = Regex::new(
        r"(?i)(?:₹|Rs\.?|INR|USD|EUR|[$€£])?\s*\d{1,3}(?:[,\s]\d{3})*(?:\.\d{1,2})?"
    ).unwrap();

    /// Amount token that is unambiguously monetary: either carries a
    /// currency marker or a 2-digit decimal tail. Used by the
    /// transaction-line heuristic, where a bare digit run is too weak
    /// a signal.
    pub static ref AMOUNT_STRICT: Regex = Regex::new(
        r"(?i)(?:₹|Rs\.?|INR|USD|EUR|[$€£])\s*\d|\d(?:[,\s]?\d)*\.\d{2}\b"
    ).unwrap();

    /// Date token: numeric D/M/Y with any of / - . space separators,
    /// or a month-name form ("March 5, 2024", "March 2024"). The
    /// textual branch is anchored to month-name prefixes; an arbitrary
    /// word there would swallow the day digits of a following numeric
    /// date and leave the rest unmatchable.
    pub static ref DATE: Regex = Regex::new(
        r"(?i)\b(?:\d{1,2}[/\-.\s]\d{1,2}[/\-.\s]\d{2,4}|(?:jan|feb|mar|apr|may|jun|jul|aug|sep|oct|nov|dec)[a-z]*\s+\d{1,2},?\s*\d{0,4})\b"
    ).unwrap();

    /// Card suffix: an explicit "card no/number/ending in ####" phrase
    /// (group 1), or a bare 4-digit run (group 2). The bare path is
    /// filtered against the plausible calendar-year range by the
    /// resolver.
    pub static ref LAST4: Regex = Regex::new(
        r"(?i)(?:card\s*(?:no\.?|number|ending|ending\s*in|xx+)\s*[:\-]?\s*(?:x{2,}\s*){0,3}(\d{4})|\b(\d{4})\b)"
    ).unwrap();

    /// Customer-name label phrases, in priority order. The capture is
    /// truncated at the first stop-word by [`NAME_STOP`].
    pub static ref NAME_PATTERNS: Vec<Regex> = vec![
        Regex::new(r"(?i)\bCustomer\s*Name\b\s*[:\-]?\s*([\w\s.']{2,60})").unwrap(),
        Regex::new(r"(?i)\bStatement\s*for\b\s*[:\-]?\s*([\w\s.']{2,60})").unwrap(),
        Regex::new(r"(?i)\bCardholder\b\s*[:\-]?\s*([\w\s.']{2,60})").unwrap(),
        Regex::new(r"(?i)\bName\b\s*[:\-]?\s*([\w\s.']{2,60})").unwrap(),
    ];

    /// Stop-words that end a captured name, so the capture does not
    /// bleed into an adjacent field.
    pub static ref NAME_STOP: Regex = Regex::new(
        r"(?i)\b(?:Card|No|Number|Account|Statement|Period|Details)\b.*"
    ).unwrap();

    /// Honorific name fallback: "Mr./Mrs./Ms. First Last".
    pub static ref HONORIFIC: Regex = Regex::new(
        r"\b(?:Mr\.?|Mrs\.?|Ms\.?)\s+[A-Z][a-zA-Z]+\s+[A-Z][a-zA-Z]+"
    ).unwrap();

    /// First signed number inside a stripped amount token.
    pub(crate) static ref NUMERIC: Regex = Regex::new(r"-?\d+(?:\.\d+)?").unwrap();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_amount_matches_currency_variants() {
        for input in ["₹12,543.89", "Rs. 12,543.89", "INR 500", "$1,000.50", "12 543.89"] {
            let m = AMOUNT.find(input).unwrap();
            assert_eq!(m.start(), 0, "should match from the start: {input}");
        }
    }

    #[test]
    fn test_amount_spans_internal_whitespace() {
        // Pre-repair page-wrap artifact: the separator is a newline.
        let m = AMOUNT.find("12\n543.89").unwrap();
        assert_eq!(m.as_str(), "12\n543.89");
    }

    #[test]
    fn test_date_forms() {
        assert!(DATE.is_match("15/04/2024"));
        assert!(DATE.is_match("15-04-24"));
        assert!(DATE.is_match("March 5, 2024"));
        assert!(DATE.is_match("March 2024"));
        assert!(!DATE.is_match("no dates here"));
    }

    #[test]
    fn test_date_word_prefix_does_not_eat_numeric_date() {
        // A non-month word before a numeric date must not consume its
        // day digits.
        let m = DATE.find("Transactions from 10/03/2024 listed below").unwrap();
        assert_eq!(m.as_str(), "10/03/2024");
        assert!(!DATE.is_match("statement 01 of 2"));
    }

    #[test]
    fn test_last4_labeled_capture() {
        let caps = LAST4.captures("Card No: XXXX XXXX XXXX 4321").unwrap();
        assert_eq!(caps.get(1).unwrap().as_str(), "4321");
    }

    #[test]
    fn test_last4_bare_capture() {
        let caps = LAST4.captures("reference 7845 printed").unwrap();
        assert!(caps.get(1).is_none());
        assert_eq!(caps.get(2).unwrap().as_str(), "7845");
    }

    #[test]
    fn test_strict_amount_rejects_bare_digits() {
        assert!(AMOUNT_STRICT.is_match("₹450"));
        assert!(AMOUNT_STRICT.is_match("1,234.56"));
        assert!(!AMOUNT_STRICT.is_match("row 42 of 90"));
    }
}
