//! Fiscal period types.
//!
//! Periods are (year, month) buckets per tenant. The voucher lifecycle
//! consults the period of the voucher date before allowing a post; periods
//! that were never opened explicitly are treated as open.

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use partida_shared::types::{FiscalPeriodId, TenantId};

use crate::voucher::VoucherError;

/// Status of a fiscal period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PeriodStatus {
    /// Period is open for posting.
    Open,
    /// Period is closed; it can be reopened.
    Closed,
    /// Period is definitively closed and cannot be reopened.
    Locked,
}

impl PeriodStatus {
    /// Returns true if vouchers may be posted into the period.
    #[must_use]
    pub fn allows_posting(self) -> bool {
        matches!(self, Self::Open)
    }
}

/// A fiscal period: one calendar month of one tenant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FiscalPeriod {
    /// Unique identifier.
    pub id: FiscalPeriodId,
    /// Tenant this period belongs to.
    pub tenant_id: TenantId,
    /// Calendar year.
    pub year: i32,
    /// Calendar month (1-12).
    pub month: u32,
    /// Current status.
    pub status: PeriodStatus,
    /// When the period was closed, if it was.
    pub closed_at: Option<DateTime<Utc>>,
}

impl FiscalPeriod {
    /// Returns true if the given date falls within this period.
    #[must_use]
    pub fn contains_date(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }
}

/// Validates that a voucher dated inside the given period may be posted.
///
/// A `None` period means no period row was ever created for that month,
/// which counts as open.
///
/// # Errors
///
/// Returns [`VoucherError::PeriodNotOpen`] when the period is closed or
/// locked.
pub fn validate_period_for_posting(
    date: NaiveDate,
    period: Option<&FiscalPeriod>,
) -> Result<(), VoucherError> {
    match period {
        None => Ok(()),
        Some(p) if p.status.allows_posting() => Ok(()),
        Some(p) => Err(VoucherError::PeriodNotOpen {
            year: p.year,
            month: p.month,
            date,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_period(status: PeriodStatus) -> FiscalPeriod {
        FiscalPeriod {
            id: FiscalPeriodId::new(),
            tenant_id: TenantId::new(),
            year: 2026,
            month: 3,
            status,
            closed_at: None,
        }
    }

    #[test]
    fn test_status_allows_posting() {
        assert!(PeriodStatus::Open.allows_posting());
        assert!(!PeriodStatus::Closed.allows_posting());
        assert!(!PeriodStatus::Locked.allows_posting());
    }

    #[test]
    fn test_contains_date() {
        let period = make_period(PeriodStatus::Open);
        assert!(period.contains_date(NaiveDate::from_ymd_opt(2026, 3, 1).unwrap()));
        assert!(period.contains_date(NaiveDate::from_ymd_opt(2026, 3, 31).unwrap()));
        assert!(!period.contains_date(NaiveDate::from_ymd_opt(2026, 4, 1).unwrap()));
        assert!(!period.contains_date(NaiveDate::from_ymd_opt(2025, 3, 1).unwrap()));
    }

    #[test]
    fn test_missing_period_counts_as_open() {
        let date = NaiveDate::from_ymd_opt(2026, 3, 15).unwrap();
        assert!(validate_period_for_posting(date, None).is_ok());
    }

    #[test]
    fn test_open_period_allows_posting() {
        let date = NaiveDate::from_ymd_opt(2026, 3, 15).unwrap();
        let period = make_period(PeriodStatus::Open);
        assert!(validate_period_for_posting(date, Some(&period)).is_ok());
    }

    #[test]
    fn test_closed_and_locked_periods_reject_posting() {
        let date = NaiveDate::from_ymd_opt(2026, 3, 15).unwrap();
        for status in [PeriodStatus::Closed, PeriodStatus::Locked] {
            let period = make_period(status);
            assert!(matches!(
                validate_period_for_posting(date, Some(&period)),
                Err(VoucherError::PeriodNotOpen { year: 2026, month: 3, .. })
            ));
        }
    }
}
