//! Heuristic field resolvers for statement text.
//!
//! Each resolver shares the same label-anchored algorithm: find every
//! case-insensitive occurrence of a label phrase, open a bounded text
//! window around it, run a pattern family over the window, and rank
//! the pooled candidates. Resolvers are total: they return a value or
//! `None`, never an error, regardless of input.

pub mod amounts;
pub mod card;
pub mod dates;
pub mod name;
pub mod normalize;
pub mod patterns;

pub use amounts::{resolve_total_due, AmountCandidate};
pub use card::resolve_last4;
pub use dates::{resolve_billing_cycle, resolve_due_date, DateCandidate};
pub use name::resolve_customer_name;
pub use normalize::normalize;

/// Generic total-due label phrases, pooled with issuer-specific ones.
pub const GENERIC_TOTAL_LABELS: &[&str] = &[
    "total amount due",
    "amount due",
    "total due",
    "new balance",
    "amount payable",
];

/// Generic due-date label phrases, tried after issuer-specific ones.
pub const GENERIC_DUE_LABELS: &[&str] = &["payment due date", "due date"];

/// Pay-by label phrases, the last labeled stop before the
/// document-wide date fallback.
pub const PAY_BY_LABELS: &[&str] = &["pay by", "payment date"];

/// Statement-period label phrases for billing-cycle resolution.
pub const CYCLE_LABELS: &[&str] = &[
    "statement period",
    "billing period",
    "statement date",
    "statement cycle",
];

/// Byte positions of every occurrence of every label, with label
/// lengths, in encounter order per label.
pub(crate) fn find_label_hits(lower: &str, labels: &[&str]) -> Vec<(usize, usize)> {
    let mut hits = Vec::new();
    for label in labels {
        let mut from = 0;
        while let Some(offset) = lower[from..].find(label) {
            let pos = from + offset;
            hits.push((pos, label.len()));
            from = pos + 1;
        }
    }
    hits
}

/// Merge label lists preserving order, primary first, without
/// duplicates.
pub(crate) fn merge_labels<'a>(primary: &[&'a str], fallback: &[&'a str]) -> Vec<&'a str> {
    let mut merged: Vec<&str> = Vec::with_capacity(primary.len() + fallback.len());
    for label in primary.iter().chain(fallback.iter()) {
        if !merged.contains(label) {
            merged.push(label);
        }
    }
    merged
}

/// Largest char boundary `<= index`.
pub(crate) fn floor_char_boundary(s: &str, mut index: usize) -> usize {
    if index >= s.len() {
        return s.len();
    }
    while index > 0 && !s.is_char_boundary(index) {
        index -= 1;
    }
    index
}

/// Smallest char boundary `>= index`.
pub(crate) fn ceil_char_boundary(s: &str, mut index: usize) -> usize {
    if index >= s.len() {
        return s.len();
    }
    while index < s.len() && !s.is_char_boundary(index) {
        index += 1;
    }
    index
}
