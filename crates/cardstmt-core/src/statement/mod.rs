//! Credit-card statement field extraction.
//!
//! The pipeline is: normalize text, classify the issuer by keyword,
//! then resolve each target field with label-anchored pattern matching
//! and a fallback chain, assembling one [`StatementRecord`] per
//! document.
//!
//! [`StatementRecord`]: crate::models::statement::StatementRecord

pub mod extractor;
pub mod issuers;
pub mod rules;

pub use extractor::StatementExtractor;
pub use issuers::{classify_issuer, IssuerProfile};
