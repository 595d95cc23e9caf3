//! Chart of accounts classification.
//!
//! This module owns the static account model: hierarchical codes, account
//! types, debit/credit natures, and the rules that decide which accounts may
//! receive postings.

pub mod account;
pub mod error;

pub use account::{Account, AccountNature, AccountType, CodeRange, POSTABLE_LEVEL};
pub use error::ChartError;
