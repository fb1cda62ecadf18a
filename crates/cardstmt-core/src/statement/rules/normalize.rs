//! Text normalization for raw PDF-extracted statement text.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// A decimal amount split by a page wrap: digits, a line break,
    /// then exactly three digits and a 2-digit decimal tail. The
    /// thousands separator was rendered as the break.
    static ref WRAPPED_AMOUNT: Regex = Regex::new(r"(\d+)[ \t]*\n[ \t\n]*(\d{3}\.\d{2})").unwrap();

    static ref WHITESPACE_RUN: Regex = Regex::new(r"\s+").unwrap();

    /// Run of repeated currency symbols, a double-render artifact.
    static ref RUPEE_RUN: Regex = Regex::new(r"₹(?:\s*₹)+").unwrap();
}

/// Collapse raw extracted text to a single normalized line.
///
/// Pure and idempotent: line terminators are unified, page-wrapped
/// amounts are rejoined with a comma, whitespace runs collapse to
/// single spaces, and repeated currency symbols collapse to one.
/// Empty input yields empty output.
pub fn normalize(text: &str) -> String {
    let text = text.replace("\r\n", "\n").replace('\r', "\n");
    let text = WRAPPED_AMOUNT.replace_all(&text, "$1,$2");
    let text = WHITESPACE_RUN.replace_all(&text, " ");
    let text = RUPEE_RUN.replace_all(&text, "₹");
    text.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_empty_input() {
        assert_eq!(normalize(""), "");
    }

    #[test]
    fn test_collapses_whitespace() {
        assert_eq!(normalize("a  b\t c\n\nd"), "a b c d");
    }

    #[test]
    fn test_repairs_wrapped_amount() {
        assert_eq!(
            normalize("Total Amount Due 12\n543.89 by 15/04/2024"),
            "Total Amount Due 12,543.89 by 15/04/2024"
        );
    }

    #[test]
    fn test_carriage_returns_unified() {
        assert_eq!(normalize("12\r\n543.89"), "12,543.89");
    }

    #[test]
    fn test_collapses_repeated_rupee() {
        assert_eq!(normalize("₹ ₹ 500.00"), "₹ 500.00");
        assert_eq!(normalize("₹₹₹500"), "₹500");
    }

    #[test]
    fn test_idempotent() {
        let inputs = [
            "Total 12\n543.89  due\r\nsoon",
            "₹ ₹ ₹ 100",
            "  already clean  ",
            "",
        ];
        for input in inputs {
            let once = normalize(input);
            assert_eq!(normalize(&once), once, "not idempotent for {input:?}");
        }
    }
}
