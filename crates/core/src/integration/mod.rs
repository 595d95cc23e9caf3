//! Integration contract for external document modules.
//!
//! Invoicing, purchasing, payroll and credit/debit note modules do not write
//! ledger entries themselves: they hand the adapter a source document and
//! get back a posted voucher id, at most once per document. This module owns
//! the pure half of that contract - the tenant-configurable posting rules
//! (business event -> account code) and the entry-set builders per document
//! kind. Idempotency tracking lives in the store.

pub mod builder;
pub mod error;
pub mod rules;
pub mod types;

pub use builder::build_voucher_input;
pub use error::IntegrationError;
pub use rules::{PostingEvent, PostingRules};
pub use types::{DocumentKind, DocumentTotals, SourceDocument};
