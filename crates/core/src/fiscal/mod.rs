//! Fiscal period model and posting gates.

pub mod period;

pub use period::{FiscalPeriod, PeriodStatus, validate_period_for_posting};
