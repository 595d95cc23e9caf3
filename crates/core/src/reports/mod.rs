//! Financial report generation.
//!
//! Five reports, all derived from the same posted-entry set:
//! - Journal: chronological listing of every posting in a period
//! - General ledger: single-account statement with running balance
//! - Trial balance: per-account gross movement and nature-split net balance
//! - Balance sheet: assets / liabilities / equity sections by code range
//! - Income statement: income, cost and expense ranges with derived margins
//!
//! Generators are pure functions over account and entry slices; the store
//! supplies consistent snapshots of POSTED entries.

pub mod error;
pub mod service;
pub mod types;

#[cfg(test)]
mod service_props;

pub use error::ReportError;
pub use service::ReportService;
pub use types::*;
