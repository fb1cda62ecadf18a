//! Label-anchored amount resolution.

use rust_decimal::Decimal;
use std::str::FromStr;

use tracing::debug;

use super::patterns::{AMOUNT, NUMERIC};
use super::{ceil_char_boundary, find_label_hits, floor_char_boundary};
use crate::models::config::ExtractionConfig;
use crate::models::statement::{format_inr, AmountValue};

/// A monetary candidate found near a label anchor.
#[derive(Debug, Clone)]
pub struct AmountCandidate {
    /// Matched token as it appeared in the text.
    pub raw: String,
    /// Parsed numeric value. Negative values (credits) are kept;
    /// unparseable tokens never become candidates.
    pub value: Decimal,
    /// Display rendering of `value`.
    pub formatted: String,
    /// Absolute byte offset of the match in the document.
    pub position: usize,
    /// Distance from the anchoring label occurrence.
    pub label_distance: usize,
}

/// Parse a raw amount token into a numeric value and its rendering.
///
/// Strips everything but digits, `.` and `-`, then reads the first
/// signed number. Returns `None` for tokens with no parseable number.
pub fn parse_amount_token(raw: &str) -> Option<(Decimal, String)> {
    let stripped: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
        .collect();
    let m = NUMERIC.find(&stripped)?;
    let value = Decimal::from_str(m.as_str()).ok()?;
    Some((value, format_inr(value)))
}

/// Resolve the total amount due.
///
/// Pools amount candidates from a window around every occurrence of
/// every label, then picks the largest value, breaking ties by the
/// smallest distance to the anchoring label. Statements often print a
/// minimum-due or running-balance figure near the same label; the
/// larger figure near a due/balance label is the total far more often
/// than the nearest one. When no label occurs at all, falls back to
/// the largest amount anywhere in the document.
pub fn resolve_total_due(
    text: &str,
    labels: &[&str],
    config: &ExtractionConfig,
) -> Option<AmountValue> {
    let lower = text.to_lowercase();
    let hits = find_label_hits(&lower, labels);

    if hits.is_empty() {
        debug!("no total-due label found, falling back to document-wide maximum");
        return AMOUNT
            .find_iter(&lower)
            .filter_map(|m| parse_amount_token(m.as_str()))
            .max_by(|a, b| a.0.cmp(&b.0))
            .map(|(value, formatted)| AmountValue { value, formatted });
    }

    let mut candidates: Vec<AmountCandidate> = Vec::new();
    for (pos, label_len) in hits {
        let start = floor_char_boundary(&lower, pos.saturating_sub(config.amount_window_left));
        let end = ceil_char_boundary(&lower, pos + label_len + config.amount_window_right);
        let window = &lower[start..end];

        for m in AMOUNT.find_iter(window) {
            let Some((value, formatted)) = parse_amount_token(m.as_str()) else {
                continue;
            };
            // Zero-valued tokens near a label are page numbers and
            // noise, never the figure the label announces.
            if value.is_zero() {
                continue;
            }
            let position = start + m.start();
            candidates.push(AmountCandidate {
                raw: m.as_str().to_string(),
                value,
                formatted,
                position,
                label_distance: position.abs_diff(pos),
            });
        }
    }

    debug!(candidates = candidates.len(), "pooled amount candidates");

    candidates
        .into_iter()
        .max_by(|a, b| {
            a.value
                .cmp(&b.value)
                .then_with(|| b.label_distance.cmp(&a.label_distance))
        })
        .map(|c| AmountValue {
            value: c.value,
            formatted: c.formatted,
        })
}
