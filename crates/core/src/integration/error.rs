//! Integration error types.

use thiserror::Error;

use super::rules::PostingEvent;
use super::types::DocumentKind;

/// Errors that can occur while building accounting for a source document.
#[derive(Debug, Error)]
pub enum IntegrationError {
    /// No account code is configured for a posting event.
    #[error("No account configured for posting event {0:?}")]
    MissingRule(PostingEvent),

    /// The document totals do not fit the document kind.
    #[error("Document kind {kind:?} does not accept the given totals")]
    TotalsMismatch {
        /// The offending document kind.
        kind: DocumentKind,
    },

    /// The document already has a generated voucher.
    #[error("Document {0} already has accounting generated")]
    AlreadyGenerated(String),
}

impl IntegrationError {
    /// Returns the stable error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::MissingRule(_) => "MISSING_POSTING_RULE",
            Self::TotalsMismatch { .. } => "DOCUMENT_TOTALS_MISMATCH",
            Self::AlreadyGenerated(_) => "ALREADY_GENERATED",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(
            IntegrationError::MissingRule(PostingEvent::SalesRevenue).error_code(),
            "MISSING_POSTING_RULE"
        );
        assert_eq!(
            IntegrationError::TotalsMismatch { kind: DocumentKind::PayrollReceipt }.error_code(),
            "DOCUMENT_TOTALS_MISMATCH"
        );
        assert_eq!(
            IntegrationError::AlreadyGenerated("FV-001".into()).error_code(),
            "ALREADY_GENERATED"
        );
    }
}
