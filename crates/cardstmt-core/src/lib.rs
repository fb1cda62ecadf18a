//! Core library for credit-card statement field extraction.
//!
//! This crate provides:
//! - PDF text acquisition (lopdf loading, pdf-extract text runs)
//! - Issuer classification by keyword (HDFC, ICICI, SBI, AXIS, KOTAK)
//! - Label-anchored heuristic field resolvers (amounts, dates, billing
//!   cycle, cardholder name, card suffix) with fallback chains
//! - Statement data models with per-document outcomes

pub mod error;
pub mod models;
pub mod pdf;
pub mod statement;

pub use error::{CardstmtError, Result};
pub use models::config::{CardstmtConfig, ExtractionConfig, PdfConfig};
pub use models::statement::{
    AmountValue, BillingCycle, CardType, DocumentOutcome, Issuer, StatementRecord,
};
pub use pdf::{PdfExtractor, PdfProcessor};
pub use statement::{classify_issuer, IssuerProfile, StatementExtractor};
