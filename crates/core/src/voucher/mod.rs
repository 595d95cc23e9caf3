//! Voucher lifecycle: creation, validation, posting, voiding.
//!
//! A voucher is a transaction header owning a set of entries. This module
//! implements the state machine (DRAFT -> POSTED -> VOID), the balance and
//! entry invariants, totals computation and sequential numbering. All
//! transition preconditions live in [`VoucherService`], not on the data
//! records, so they are centrally testable.

pub mod entry;
pub mod error;
pub mod numbering;
pub mod record;
pub mod service;
pub mod types;

#[cfg(test)]
mod service_props;

pub use entry::Entry;
pub use error::VoucherError;
pub use numbering::{format_number, next_number, parse_number};
pub use record::Voucher;
pub use service::{AccountRef, VoucherService};
pub use types::{CreateVoucherInput, EntryInput, VoucherStatus, VoucherTotals, VoucherType};
