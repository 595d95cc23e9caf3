//! Voucher service: validation and state transitions.
//!
//! All lifecycle preconditions live here, decoupled from persistence through
//! a caller-supplied account lookup. The store calls these functions inside
//! its transactions; nothing is written when any of them fails.

use rust_decimal::Decimal;
use chrono::NaiveDate;

use super::entry::Entry;
use super::error::VoucherError;
use super::types::{EntryInput, VoucherStatus, VoucherTotals};
use crate::chart::{AccountNature, POSTABLE_LEVEL};
use crate::fiscal::{FiscalPeriod, validate_period_for_posting};

/// The slice of account data entry validation needs.
///
/// Lookups return this instead of a full [`crate::chart::Account`] so the
/// store can answer from a narrow query.
#[derive(Debug, Clone)]
pub struct AccountRef {
    /// Account code.
    pub code: String,
    /// Hierarchy level.
    pub level: i16,
    /// Whether the account is active.
    pub is_active: bool,
    /// Account nature, used by the aggregation engine.
    pub nature: AccountNature,
}

/// Voucher service holding the lifecycle rules.
///
/// Stateless; functions take everything they need as arguments.
pub struct VoucherService;

impl VoucherService {
    /// Validates an entry set for creation or replacement.
    ///
    /// Checks, per entry: amounts non-negative, exactly one of debit/credit
    /// non-zero, and the account exists, is active and is postable
    /// (level 4). Balance is NOT checked here; an unbalanced draft is a
    /// legitimate work in progress.
    ///
    /// # Errors
    ///
    /// Returns the first violated rule as a [`VoucherError`].
    pub fn validate_entries<A>(entries: &[EntryInput], account_lookup: A) -> Result<(), VoucherError>
    where
        A: Fn(&str) -> Option<AccountRef>,
    {
        for (index, entry) in entries.iter().enumerate() {
            let line = index + 1;

            if entry.debit < Decimal::ZERO || entry.credit < Decimal::ZERO {
                return Err(VoucherError::NegativeAmount { line });
            }

            let has_debit = entry.debit > Decimal::ZERO;
            let has_credit = entry.credit > Decimal::ZERO;
            if has_debit == has_credit {
                return Err(VoucherError::EntryNotExclusive { line });
            }

            let account = account_lookup(&entry.account_code)
                .ok_or_else(|| VoucherError::AccountNotFound(entry.account_code.clone()))?;
            if !account.is_active {
                return Err(VoucherError::AccountInactive(account.code));
            }
            if account.level != POSTABLE_LEVEL {
                return Err(VoucherError::AccountNotPostable(account.code));
            }
        }

        Ok(())
    }

    /// Computes voucher totals from entry inputs.
    ///
    /// The single owner of "recompute totals from lines"; stored totals are
    /// caches of this result.
    #[must_use]
    pub fn calculate_totals(entries: &[EntryInput]) -> VoucherTotals {
        let total_debit: Decimal = entries.iter().map(|e| e.debit).sum();
        let total_credit: Decimal = entries.iter().map(|e| e.credit).sum();
        VoucherTotals::new(total_debit, total_credit)
    }

    /// Computes voucher totals from persisted entries.
    #[must_use]
    pub fn calculate_totals_from_entries(entries: &[Entry]) -> VoucherTotals {
        let total_debit: Decimal = entries.iter().map(|e| e.debit).sum();
        let total_credit: Decimal = entries.iter().map(|e| e.credit).sum();
        VoucherTotals::new(total_debit, total_credit)
    }

    /// Validates that a voucher in `status` may be modified or have its
    /// entries replaced.
    ///
    /// # Errors
    ///
    /// Returns `InvalidState` unless the voucher is a draft.
    pub fn validate_can_modify(status: VoucherStatus) -> Result<(), VoucherError> {
        if status.is_editable() {
            Ok(())
        } else {
            Err(VoucherError::InvalidState { actual: status })
        }
    }

    /// Validates that a voucher in `status` may be deleted.
    ///
    /// # Errors
    ///
    /// Returns `InvalidState` unless the voucher is a draft.
    pub fn validate_can_delete(status: VoucherStatus) -> Result<(), VoucherError> {
        Self::validate_can_modify(status)
    }

    /// Validates the draft -> posted transition.
    ///
    /// The balance check runs against totals recomputed at transition time,
    /// and the fiscal period of the voucher date must allow posting. This is
    /// the only transition that makes entries visible to the aggregation
    /// engine.
    ///
    /// # Errors
    ///
    /// `InvalidState` when not a draft, `Unbalanced` when debits differ from
    /// credits, `PeriodNotOpen` when the period is closed or locked.
    pub fn validate_can_post(
        status: VoucherStatus,
        totals: VoucherTotals,
        date: NaiveDate,
        period: Option<&FiscalPeriod>,
    ) -> Result<(), VoucherError> {
        if status != VoucherStatus::Draft {
            return Err(VoucherError::InvalidState { actual: status });
        }
        if !totals.is_balanced {
            return Err(VoucherError::Unbalanced {
                debit: totals.total_debit,
                credit: totals.total_credit,
            });
        }
        validate_period_for_posting(date, period)
    }

    /// Validates the posted -> void transition.
    ///
    /// Voiding never deletes entries; voided vouchers drop out of balances
    /// because every aggregate filters on `status == Posted`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidState` unless the voucher is posted.
    pub fn validate_can_void(status: VoucherStatus) -> Result<(), VoucherError> {
        if status == VoucherStatus::Posted {
            Ok(())
        } else {
            Err(VoucherError::InvalidState { actual: status })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use partida_shared::types::{FiscalPeriodId, TenantId};

    use crate::fiscal::PeriodStatus;

    fn leaf_account(code: &str) -> AccountRef {
        AccountRef {
            code: code.to_string(),
            level: 4,
            is_active: true,
            nature: AccountNature::Debit,
        }
    }

    fn ok_lookup(code: &str) -> Option<AccountRef> {
        Some(leaf_account(code))
    }

    fn period(status: PeriodStatus) -> FiscalPeriod {
        FiscalPeriod {
            id: FiscalPeriodId::new(),
            tenant_id: TenantId::new(),
            year: 2026,
            month: 1,
            status,
            closed_at: None,
        }
    }

    fn sample_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 1, 15).unwrap()
    }

    #[test]
    fn test_validate_entries_ok() {
        let entries = vec![
            EntryInput::debit("130505", dec!(119000)),
            EntryInput::credit("413501", dec!(100000)),
            EntryInput::credit("240801", dec!(19000)),
        ];
        assert!(VoucherService::validate_entries(&entries, ok_lookup).is_ok());
    }

    #[test]
    fn test_validate_entries_rejects_both_sides() {
        let mut entry = EntryInput::debit("130505", dec!(100));
        entry.credit = dec!(100);
        assert!(matches!(
            VoucherService::validate_entries(&[entry], ok_lookup),
            Err(VoucherError::EntryNotExclusive { line: 1 })
        ));
    }

    #[test]
    fn test_validate_entries_rejects_neither_side() {
        let entry = EntryInput::debit("130505", Decimal::ZERO);
        assert!(matches!(
            VoucherService::validate_entries(&[entry], ok_lookup),
            Err(VoucherError::EntryNotExclusive { line: 1 })
        ));
    }

    #[test]
    fn test_validate_entries_rejects_negative() {
        let entry = EntryInput::debit("130505", dec!(-5));
        assert!(matches!(
            VoucherService::validate_entries(&[entry], ok_lookup),
            Err(VoucherError::NegativeAmount { line: 1 })
        ));
    }

    #[test]
    fn test_validate_entries_reports_offending_line() {
        let entries = vec![
            EntryInput::debit("130505", dec!(100)),
            EntryInput::credit("413501", dec!(-100)),
        ];
        assert!(matches!(
            VoucherService::validate_entries(&entries, ok_lookup),
            Err(VoucherError::NegativeAmount { line: 2 })
        ));
    }

    #[test]
    fn test_validate_entries_unknown_account() {
        let entry = EntryInput::debit("999999", dec!(100));
        let lookup = |_: &str| None;
        assert!(matches!(
            VoucherService::validate_entries(&[entry], lookup),
            Err(VoucherError::AccountNotFound(code)) if code == "999999"
        ));
    }

    #[test]
    fn test_validate_entries_inactive_account() {
        let entry = EntryInput::debit("130505", dec!(100));
        let lookup = |code: &str| {
            let mut account = leaf_account(code);
            account.is_active = false;
            Some(account)
        };
        assert!(matches!(
            VoucherService::validate_entries(&[entry], lookup),
            Err(VoucherError::AccountInactive(_))
        ));
    }

    #[test]
    fn test_validate_entries_non_leaf_account() {
        let entry = EntryInput::debit("1305", dec!(100));
        let lookup = |code: &str| {
            let mut account = leaf_account(code);
            account.level = 3;
            Some(account)
        };
        assert!(matches!(
            VoucherService::validate_entries(&[entry], lookup),
            Err(VoucherError::AccountNotPostable(_))
        ));
    }

    #[test]
    fn test_calculate_totals() {
        let entries = vec![
            EntryInput::debit("130505", dec!(119000)),
            EntryInput::credit("413501", dec!(100000)),
            EntryInput::credit("240801", dec!(19000)),
        ];
        let totals = VoucherService::calculate_totals(&entries);
        assert_eq!(totals.total_debit, dec!(119000));
        assert_eq!(totals.total_credit, dec!(119000));
        assert!(totals.is_balanced);
    }

    #[test]
    fn test_can_modify_only_draft() {
        assert!(VoucherService::validate_can_modify(VoucherStatus::Draft).is_ok());
        assert!(matches!(
            VoucherService::validate_can_modify(VoucherStatus::Posted),
            Err(VoucherError::InvalidState { actual: VoucherStatus::Posted })
        ));
        assert!(matches!(
            VoucherService::validate_can_modify(VoucherStatus::Void),
            Err(VoucherError::InvalidState { actual: VoucherStatus::Void })
        ));
    }

    #[test]
    fn test_can_post_balanced_draft() {
        let totals = VoucherTotals::new(dec!(100), dec!(100));
        let result = VoucherService::validate_can_post(
            VoucherStatus::Draft,
            totals,
            sample_date(),
            Some(&period(PeriodStatus::Open)),
        );
        assert!(result.is_ok());
    }

    #[test]
    fn test_can_post_rejects_unbalanced() {
        let totals = VoucherTotals::new(dec!(100), dec!(90));
        let result =
            VoucherService::validate_can_post(VoucherStatus::Draft, totals, sample_date(), None);
        assert!(matches!(result, Err(VoucherError::Unbalanced { .. })));
    }

    #[test]
    fn test_can_post_rejects_non_draft() {
        let totals = VoucherTotals::new(dec!(100), dec!(100));
        for status in [VoucherStatus::Posted, VoucherStatus::Void] {
            let result =
                VoucherService::validate_can_post(status, totals, sample_date(), None);
            assert!(matches!(result, Err(VoucherError::InvalidState { .. })));
        }
    }

    #[test]
    fn test_can_post_rejects_closed_period() {
        let totals = VoucherTotals::new(dec!(100), dec!(100));
        let result = VoucherService::validate_can_post(
            VoucherStatus::Draft,
            totals,
            sample_date(),
            Some(&period(PeriodStatus::Closed)),
        );
        assert!(matches!(result, Err(VoucherError::PeriodNotOpen { .. })));
    }

    #[test]
    fn test_can_void_only_posted() {
        assert!(VoucherService::validate_can_void(VoucherStatus::Posted).is_ok());
        assert!(matches!(
            VoucherService::validate_can_void(VoucherStatus::Draft),
            Err(VoucherError::InvalidState { actual: VoucherStatus::Draft })
        ));
        assert!(matches!(
            VoucherService::validate_can_void(VoucherStatus::Void),
            Err(VoucherError::InvalidState { actual: VoucherStatus::Void })
        ));
    }

    #[test]
    fn test_empty_entry_set_is_trivially_balanced() {
        let totals = VoucherService::calculate_totals(&[]);
        assert!(totals.is_balanced);
        assert_eq!(totals.total_debit, Decimal::ZERO);
    }
}
