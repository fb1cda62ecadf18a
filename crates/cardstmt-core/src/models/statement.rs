//! Statement data models: the extraction record and its typed fields.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Placeholder rendered by tabular/text exporters for unresolved fields.
///
/// The typed record itself keeps unresolved fields as `None` (JSON
/// `null`); the placeholder is a presentation concern.
pub const PLACEHOLDER: &str = "N/A";

/// Card-issuing bank, classified by keyword containment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Issuer {
    Hdfc,
    Icici,
    Sbi,
    Axis,
    Kotak,
    Unknown,
}

impl Issuer {
    /// Whether this issuer is in the supported set.
    pub fn is_supported(&self) -> bool {
        !matches!(self, Issuer::Unknown)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Issuer::Hdfc => "HDFC",
            Issuer::Icici => "ICICI",
            Issuer::Sbi => "SBI",
            Issuer::Axis => "AXIS",
            Issuer::Kotak => "KOTAK",
            Issuer::Unknown => "UNKNOWN",
        }
    }
}

impl std::fmt::Display for Issuer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Card product tier or network, detected by keyword containment.
///
/// Declaration order is the match priority: a statement mentioning both
/// "Platinum" and "Visa" reports `Platinum`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CardType {
    Platinum,
    Gold,
    Classic,
    Signature,
    World,
    Visa,
    Mastercard,
    Titanium,
    Infinite,
}

impl CardType {
    const KEYWORDS: &'static [(CardType, &'static str)] = &[
        (CardType::Platinum, "platinum"),
        (CardType::Gold, "gold"),
        (CardType::Classic, "classic"),
        (CardType::Signature, "signature"),
        (CardType::World, "world"),
        (CardType::Visa, "visa"),
        (CardType::Mastercard, "mastercard"),
        (CardType::Titanium, "titanium"),
        (CardType::Infinite, "infinite"),
    ];

    /// Detect the card type from statement text, first keyword wins.
    pub fn detect(text: &str) -> Option<CardType> {
        let lower = text.to_lowercase();
        Self::KEYWORDS
            .iter()
            .find(|(_, keyword)| lower.contains(keyword))
            .map(|(card_type, _)| *card_type)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CardType::Platinum => "Platinum",
            CardType::Gold => "Gold",
            CardType::Classic => "Classic",
            CardType::Signature => "Signature",
            CardType::World => "World",
            CardType::Visa => "Visa",
            CardType::Mastercard => "Mastercard",
            CardType::Titanium => "Titanium",
            CardType::Infinite => "Infinite",
        }
    }
}

impl std::fmt::Display for CardType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A monetary value with its display rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AmountValue {
    /// Numeric value. Negative values represent credits.
    pub value: Decimal,
    /// Rupee-formatted rendering with comma grouping, e.g. "₹12,543.89".
    pub formatted: String,
}

impl AmountValue {
    pub fn new(value: Decimal) -> Self {
        Self {
            formatted: format_inr(value),
            value,
        }
    }
}

/// Format an amount in rupee style with comma thousand grouping.
pub fn format_inr(value: Decimal) -> String {
    let rounded = value.round_dp(2);
    let digits = rounded.abs().trunc().to_string();
    let cents = (rounded.abs().fract() * Decimal::new(100, 0))
        .round()
        .to_string();

    let chars: Vec<char> = digits.chars().collect();
    let mut grouped = String::new();
    for (i, c) in chars.iter().enumerate() {
        if i > 0 && (chars.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(*c);
    }

    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    format!("{}₹{}.{:0>2}", sign, grouped, cents)
}

/// Statement period, a (start, end) date pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BillingCycle {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl BillingCycle {
    pub fn length_days(&self) -> i64 {
        self.end.signed_duration_since(self.start).num_days()
    }
}

/// The extraction output record for one statement document.
///
/// Every key is always present; unresolved fields are `None` and
/// serialize as JSON `null`, so a consumer can tell "not extracted"
/// apart from a populated value without string sentinels.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatementRecord {
    /// Name of the source document.
    pub source_file: String,

    /// Classified issuer (UNKNOWN when no keyword matched).
    pub issuer: Issuer,

    /// Cardholder name.
    pub customer_name: Option<String>,

    /// Last four digits of the card number.
    pub card_last4: Option<String>,

    /// Card product tier or network.
    pub card_type: Option<CardType>,

    /// Statement period.
    pub billing_cycle: Option<BillingCycle>,

    /// Payment due date.
    pub payment_due_date: Option<NaiveDate>,

    /// Total amount due.
    pub total_amount_due: Option<AmountValue>,

    /// Raw statement lines that look like transactions (date + amount),
    /// capped by configuration.
    pub transaction_preview: Vec<String>,
}

impl StatementRecord {
    /// A record with every field unresolved, used for empty documents.
    pub fn unresolved(source_file: impl Into<String>) -> Self {
        Self {
            source_file: source_file.into(),
            issuer: Issuer::Unknown,
            customer_name: None,
            card_last4: None,
            card_type: None,
            billing_cycle: None,
            payment_due_date: None,
            total_amount_due: None,
            transaction_preview: Vec::new(),
        }
    }
}

/// Per-document outcome of an extraction run.
///
/// `Unsupported` is a policy rejection (issuer gate enabled, classified
/// issuer outside the supported set); `Failed` records a text-provider
/// failure. Neither aborts a batch.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum DocumentOutcome {
    /// Extraction produced a record (possibly with unresolved fields).
    Extracted { record: StatementRecord },

    /// The issuer gate rejected the document.
    Unsupported { source_file: String, issuer: Issuer },

    /// The document text could not be acquired.
    Failed { source_file: String, error: String },
}

impl DocumentOutcome {
    pub fn source_file(&self) -> &str {
        match self {
            DocumentOutcome::Extracted { record } => &record.source_file,
            DocumentOutcome::Unsupported { source_file, .. } => source_file,
            DocumentOutcome::Failed { source_file, .. } => source_file,
        }
    }

    /// The extracted record, if this outcome carries one.
    pub fn record(&self) -> Option<&StatementRecord> {
        match self {
            DocumentOutcome::Extracted { record } => Some(record),
            _ => None,
        }
    }
}
