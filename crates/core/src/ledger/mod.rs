//! Ledger aggregation engine.
//!
//! Pure read-side algorithms over the set of POSTED entries: running
//! balances, point-in-time balances and gross period movement. The store
//! feeds these functions already-filtered tenant entries; voided vouchers
//! never appear here because every query filters on `status == Posted`.

pub mod aggregation;
pub mod types;

#[cfg(test)]
mod aggregation_props;

pub use aggregation::{
    balance_as_of, initial_balance, movement_through, period_movement, running_balances,
    sort_chronological, window,
};
pub use types::{Movement, PostedEntry};
