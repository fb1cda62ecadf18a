//! Date parsing and label-anchored due-date / billing-cycle resolution.

use chrono::{Datelike, Duration, NaiveDate};
use lazy_static::lazy_static;
use regex::Regex;
use tracing::debug;

use super::patterns::DATE;
use super::{ceil_char_boundary, find_label_hits, CYCLE_LABELS};
use crate::models::config::ExtractionConfig;
use crate::models::statement::BillingCycle;

lazy_static! {
    static ref NUMERIC_DMY: Regex =
        Regex::new(r"(\d{1,2})[/\-.\s]+(\d{1,2})[/\-.\s]+(\d{2,4})").unwrap();
    static ref MONTH_DAY_YEAR: Regex =
        Regex::new(r"(?i)([A-Za-z]{3,9})\s+(\d{1,2}),?\s+(\d{4})").unwrap();
    static ref MONTH_YEAR: Regex = Regex::new(r"(?i)([A-Za-z]{3,9})\s+(\d{4})").unwrap();
}

/// A date candidate with its document offset.
#[derive(Debug, Clone, Copy)]
pub struct DateCandidate {
    pub date: NaiveDate,
    pub position: usize,
}

const MONTHS: &[&str] = &[
    "january",
    "february",
    "march",
    "april",
    "may",
    "june",
    "july",
    "august",
    "september",
    "october",
    "november",
    "december",
];

/// Resolve a month name or unambiguous prefix ("mar", "sept") to 1-12.
fn month_from_name(name: &str) -> Option<u32> {
    let lower = name.to_lowercase();
    if lower.len() < 3 {
        return None;
    }
    MONTHS
        .iter()
        .position(|m| m.starts_with(&lower))
        .map(|i| i as u32 + 1)
}

fn expand_year(year: i32) -> i32 {
    if year < 100 {
        // Two-digit year: 00-50 are 2000s, 51-99 are 1900s.
        if year <= 50 { 2000 + year } else { 1900 + year }
    } else {
        year
    }
}

/// Parse one matched date token into a calendar date.
///
/// Numeric forms prefer day-first interpretation, swapping only when
/// day-first is impossible. Textual forms accept "March 5, 2024" and
/// "March 2024" (first of month). Tokens without a year are rejected
/// so parsing stays deterministic.
pub fn parse_date_token(raw: &str) -> Option<NaiveDate> {
    let token = raw.trim();

    if let Some(caps) = NUMERIC_DMY.captures(token) {
        let first: u32 = caps[1].parse().ok()?;
        let second: u32 = caps[2].parse().ok()?;
        let year = expand_year(caps[3].parse().ok()?);
        return NaiveDate::from_ymd_opt(year, second, first)
            .or_else(|| NaiveDate::from_ymd_opt(year, first, second));
    }

    if let Some(caps) = MONTH_DAY_YEAR.captures(token) {
        if let Some(month) = month_from_name(&caps[1]) {
            let day: u32 = caps[2].parse().ok()?;
            let year: i32 = caps[3].parse().ok()?;
            if let Some(date) = NaiveDate::from_ymd_opt(year, month, day) {
                return Some(date);
            }
        }
    }

    if let Some(caps) = MONTH_YEAR.captures(token) {
        if let Some(month) = month_from_name(&caps[1]) {
            let year: i32 = caps[2].parse().ok()?;
            return NaiveDate::from_ymd_opt(year, month, 1);
        }
    }

    None
}

/// All parseable date candidates in a span, in document order.
pub fn dates_in(text: &str, base_offset: usize) -> Vec<DateCandidate> {
    DATE.find_iter(text)
        .filter_map(|m| {
            parse_date_token(m.as_str()).map(|date| DateCandidate {
                date,
                position: base_offset + m.start(),
            })
        })
        .collect()
}

/// Resolve the payment due date.
///
/// Label sets are scanned in priority order (issuer-specific due
/// labels, generic due labels, pay-by labels). The first label whose
/// window contains a valid-range date wins; otherwise the first
/// valid-range date anywhere in the document is used.
pub fn resolve_due_date(
    text: &str,
    label_sets: &[&[&str]],
    config: &ExtractionConfig,
) -> Option<NaiveDate> {
    let lower = text.to_lowercase();

    for labels in label_sets {
        for label in labels.iter() {
            let Some(pos) = lower.find(label) else {
                continue;
            };
            let end = ceil_char_boundary(&lower, pos + config.date_window_right);
            let window = &lower[pos..end];
            for candidate in dates_in(window, pos) {
                if config.due_year_in_range(candidate.date.year()) {
                    debug!(label, date = %candidate.date, "due date resolved near label");
                    return Some(candidate.date);
                }
            }
        }
    }

    // Document-wide fallback: first valid-range date anywhere.
    dates_in(&lower, 0)
        .into_iter()
        .map(|c| c.date)
        .find(|d| config.due_year_in_range(d.year()))
}

/// Resolve the billing cycle.
///
/// Tries, in order: the first plausible date pair (day-difference
/// within the configured monthly bounds) in a window after any
/// statement-period label; the same pair search over the document
/// prefix; a synthetic cycle anchored on the due date when the issuer
/// profile defines a cycle length.
pub fn resolve_billing_cycle(
    text: &str,
    due_date: Option<NaiveDate>,
    cycle_length_days: Option<i64>,
    config: &ExtractionConfig,
) -> Option<BillingCycle> {
    let lower = text.to_lowercase();

    for (pos, label_len) in find_label_hits(&lower, CYCLE_LABELS) {
        let end = ceil_char_boundary(&lower, pos + label_len + config.cycle_window_right);
        let window = &lower[pos..end];
        if let Some(cycle) = first_plausible_pair(&dates_in(window, pos), config) {
            debug!(start = %cycle.start, end = %cycle.end, "billing cycle from period label");
            return Some(cycle);
        }
    }

    let prefix_end = ceil_char_boundary(&lower, config.cycle_scan_prefix);
    if let Some(cycle) = first_plausible_pair(&dates_in(&lower[..prefix_end], 0), config) {
        debug!(start = %cycle.start, end = %cycle.end, "billing cycle from document prefix");
        return Some(cycle);
    }

    // Synthetic cycle anchored on the due date.
    if let (Some(due), Some(days)) = (due_date, cycle_length_days) {
        debug!(days, "billing cycle synthesized from due date");
        return Some(BillingCycle {
            start: due - Duration::days(days),
            end: due,
        });
    }

    None
}

/// First candidate pair, in scan order, whose day-difference falls in
/// the plausible monthly range.
fn first_plausible_pair(
    candidates: &[DateCandidate],
    config: &ExtractionConfig,
) -> Option<BillingCycle> {
    for (i, first) in candidates.iter().enumerate() {
        for second in &candidates[i + 1..] {
            let days = second.date.signed_duration_since(first.date).num_days();
            if days >= config.min_cycle_days && days <= config.max_cycle_days {
                return Some(BillingCycle {
                    start: first.date,
                    end: second.date,
                });
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::statement::rules::{GENERIC_DUE_LABELS, PAY_BY_LABELS};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_parse_numeric_day_first() {
        assert_eq!(parse_date_token("15/04/2024"), Some(date(2024, 4, 15)));
        assert_eq!(parse_date_token("15-04-24"), Some(date(2024, 4, 15)));
        assert_eq!(parse_date_token("15.04.2024"), Some(date(2024, 4, 15)));
    }

    #[test]
    fn test_parse_numeric_swaps_when_day_first_impossible() {
        // 04/15 cannot be day-first (no month 15), so month-first wins.
        assert_eq!(parse_date_token("04/15/2024"), Some(date(2024, 4, 15)));
    }

    #[test]
    fn test_parse_textual_forms() {
        assert_eq!(parse_date_token("March 5, 2024"), Some(date(2024, 3, 5)));
        assert_eq!(parse_date_token("March 2024"), Some(date(2024, 3, 1)));
        assert_eq!(parse_date_token("Sep 2024"), Some(date(2024, 9, 1)));
    }

    #[test]
    fn test_parse_rejects_yearless_and_garbage() {
        assert_eq!(parse_date_token("March 5"), None);
        assert_eq!(parse_date_token("not a date"), None);
    }

    #[test]
    fn test_due_date_near_label() {
        let text = "Payment Due Date: 15/04/2024 Statement Date: 20/03/2024";
        let result = resolve_due_date(
            text,
            &[GENERIC_DUE_LABELS, PAY_BY_LABELS],
            &ExtractionConfig::default(),
        );
        assert_eq!(result, Some(date(2024, 4, 15)));
    }

    #[test]
    fn test_due_date_document_wide_fallback() {
        // No due label anywhere, exactly one valid-range date.
        let text = "Transactions from 10/03/2024 listed below";
        let result = resolve_due_date(
            text,
            &[GENERIC_DUE_LABELS, PAY_BY_LABELS],
            &ExtractionConfig::default(),
        );
        assert_eq!(result, Some(date(2024, 3, 10)));
    }

    #[test]
    fn test_due_date_skips_out_of_range_years() {
        // 1998 is outside the plausible range; fallback picks 2024.
        let text = "member since 12/05/1998, pay by 15/04/2024";
        let result = resolve_due_date(
            text,
            &[GENERIC_DUE_LABELS, PAY_BY_LABELS],
            &ExtractionConfig::default(),
        );
        assert_eq!(result, Some(date(2024, 4, 15)));
    }

    #[test]
    fn test_billing_cycle_from_label() {
        let text = "Statement Period: 01/03/2024 to 31/03/2024";
        let cycle =
            resolve_billing_cycle(text, None, None, &ExtractionConfig::default()).unwrap();
        assert_eq!(cycle.start, date(2024, 3, 1));
        assert_eq!(cycle.end, date(2024, 3, 31));
        assert_eq!(cycle.length_days(), 30);
    }

    #[test]
    fn test_billing_cycle_rejects_implausible_pair() {
        // 90 days apart is not a monthly cycle; no synthetic fallback.
        let text = "Statement Period: 01/01/2024 to 31/03/2024";
        assert!(resolve_billing_cycle(text, None, None, &ExtractionConfig::default()).is_none());
    }

    #[test]
    fn test_billing_cycle_from_prefix() {
        let text = "HDFC statement 01/03/2024 - 31/03/2024 for your card";
        let cycle =
            resolve_billing_cycle(text, None, None, &ExtractionConfig::default()).unwrap();
        assert_eq!(cycle.length_days(), 30);
    }

    #[test]
    fn test_billing_cycle_synthetic() {
        let due = date(2024, 4, 15);
        let cycle = resolve_billing_cycle(
            "no dates here",
            Some(due),
            Some(30),
            &ExtractionConfig::default(),
        )
        .unwrap();
        assert_eq!(cycle.end, due);
        assert_eq!(cycle.start, date(2024, 3, 16));
        assert_eq!(cycle.length_days(), 30);
    }
}
