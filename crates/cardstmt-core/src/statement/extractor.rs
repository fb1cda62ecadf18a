//! The statement extraction pipeline.

use tracing::{debug, info, warn};

use super::issuers::{self, classify_issuer};
use super::rules::{
    self, merge_labels, normalize, patterns, resolve_billing_cycle, resolve_customer_name,
    resolve_due_date, resolve_last4, resolve_total_due,
};
use crate::error::Result;
use crate::models::config::ExtractionConfig;
use crate::models::statement::{CardType, DocumentOutcome, StatementRecord};

/// Field extractor for credit-card statement text.
///
/// Construction validates the configuration and issuer profiles, so a
/// built extractor never fails per document; every document yields a
/// [`DocumentOutcome`].
#[derive(Debug, Clone)]
pub struct StatementExtractor {
    config: ExtractionConfig,
}

impl StatementExtractor {
    pub fn new(config: ExtractionConfig) -> Result<Self> {
        config.validate()?;
        issuers::validate_profiles()?;
        Ok(Self { config })
    }

    /// Enable or disable the issuer gate.
    pub fn with_issuer_gate(mut self, enabled: bool) -> Self {
        self.config.reject_unsupported = enabled;
        self
    }

    pub fn config(&self) -> &ExtractionConfig {
        &self.config
    }

    /// Extract a statement record from one document's raw text.
    ///
    /// The pipeline: normalize the text, classify the issuer, apply the
    /// issuer gate, then resolve each field independently. Resolvers
    /// never abort the document; an unresolvable field stays `None`.
    pub fn extract(&self, source_file: &str, raw_text: &str) -> DocumentOutcome {
        let text = normalize(raw_text);
        if text.is_empty() {
            warn!(source_file, "document has no extractable text");
            return DocumentOutcome::Extracted {
                record: StatementRecord::unresolved(source_file),
            };
        }

        let issuer = classify_issuer(&text);
        debug!(source_file, %issuer, "issuer classified");

        if self.config.reject_unsupported && !issuer.is_supported() {
            info!(source_file, %issuer, "issuer gate rejected document");
            return DocumentOutcome::Unsupported {
                source_file: source_file.to_string(),
                issuer,
            };
        }

        let profile = issuers::profile_for(issuer);

        let due_label_sets: Vec<&[&str]> = profile
            .map(|p| p.due_labels)
            .into_iter()
            .chain([rules::GENERIC_DUE_LABELS, rules::PAY_BY_LABELS])
            .collect();
        let payment_due_date = resolve_due_date(&text, &due_label_sets, &self.config);

        let total_labels = merge_labels(
            profile.map(|p| p.total_labels).unwrap_or_default(),
            rules::GENERIC_TOTAL_LABELS,
        );
        let total_amount_due = resolve_total_due(&text, &total_labels, &self.config);

        let billing_cycle = resolve_billing_cycle(
            &text,
            payment_due_date,
            profile.map(|p| p.cycle_length_days),
            &self.config,
        );

        let record = StatementRecord {
            source_file: source_file.to_string(),
            issuer,
            customer_name: resolve_customer_name(&text),
            card_last4: resolve_last4(&text, &self.config),
            card_type: CardType::detect(&text),
            billing_cycle,
            payment_due_date,
            total_amount_due,
            transaction_preview: self.preview_lines(raw_text),
        };

        info!(
            source_file,
            %issuer,
            due_date = record.payment_due_date.is_some(),
            total = record.total_amount_due.is_some(),
            "statement extracted"
        );
        DocumentOutcome::Extracted { record }
    }

    /// Process many documents, one outcome per input, in order.
    ///
    /// Each item pairs a source name with either its raw text or a
    /// text-provider error message; errors become `Failed` outcomes
    /// without aborting the rest of the batch.
    pub fn extract_batch<I>(&self, documents: I) -> Vec<DocumentOutcome>
    where
        I: IntoIterator<Item = (String, std::result::Result<String, String>)>,
    {
        documents
            .into_iter()
            .map(|(source_file, text)| match text {
                Ok(text) => self.extract(&source_file, &text),
                Err(error) => {
                    warn!(source_file, error, "document text unavailable");
                    DocumentOutcome::Failed { source_file, error }
                }
            })
            .collect()
    }

    /// Raw lines that read like transaction rows: a parseable date
    /// token and a money-looking token on the same line.
    fn preview_lines(&self, raw_text: &str) -> Vec<String> {
        raw_text
            .replace('\r', "\n")
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .filter(|line| {
                patterns::AMOUNT_STRICT.is_match(line)
                    && patterns::DATE
                        .find_iter(line)
                        .any(|m| rules::dates::parse_date_token(m.as_str()).is_some())
            })
            .map(str::to_string)
            .take(self.config.preview_limit)
            .collect()
    }
}
