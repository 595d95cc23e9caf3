//! Property tests for voucher validation and totals.

use proptest::prelude::*;
use rust_decimal::Decimal;

use super::service::{AccountRef, VoucherService};
use super::types::{EntryInput, VoucherStatus, VoucherTotals};
use crate::chart::AccountNature;

/// Strategy for positive amounts with two decimal places.
fn amount_strategy() -> impl Strategy<Value = Decimal> {
    (1i64..10_000_000i64).prop_map(|n| Decimal::new(n, 2))
}

/// Strategy for a balanced entry set: random debit lines, credited back
/// either as a single line for the total or as an exact mirror.
fn balanced_entries_strategy() -> impl Strategy<Value = Vec<EntryInput>> {
    (prop::collection::vec(amount_strategy(), 1..5), any::<bool>()).prop_map(|(debits, mirror)| {
        let total: Decimal = debits.iter().copied().sum();
        let mut entries: Vec<EntryInput> = debits
            .iter()
            .map(|&amount| EntryInput::debit("110505", amount))
            .collect();
        if mirror {
            entries.extend(debits.iter().map(|&amount| EntryInput::credit("413501", amount)));
        } else {
            entries.push(EntryInput::credit("413501", total));
        }
        entries
    })
}

fn ok_lookup(code: &str) -> Option<AccountRef> {
    Some(AccountRef {
        code: code.to_string(),
        level: 4,
        is_active: true,
        nature: AccountNature::Debit,
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// However a total is split across lines, debits equal credits.
    #[test]
    fn prop_balanced_split_stays_balanced(entries in balanced_entries_strategy()) {
        let totals = VoucherService::calculate_totals(&entries);
        prop_assert!(totals.is_balanced);
        prop_assert_eq!(totals.difference(), Decimal::ZERO);
    }

    /// A balanced entry set passes validation.
    #[test]
    fn prop_balanced_entries_validate(entries in balanced_entries_strategy()) {
        prop_assert!(VoucherService::validate_entries(&entries, ok_lookup).is_ok());
    }

    /// Adding one extra debit line to a balanced set always produces
    /// unbalanced totals that fail the post gate.
    #[test]
    fn prop_extra_line_breaks_balance(
        entries in balanced_entries_strategy(),
        extra in amount_strategy(),
    ) {
        let mut entries = entries;
        entries.push(EntryInput::debit("130505", extra));
        let totals = VoucherService::calculate_totals(&entries);
        prop_assert!(!totals.is_balanced);

        let result = VoucherService::validate_can_post(
            VoucherStatus::Draft,
            totals,
            chrono::NaiveDate::from_ymd_opt(2026, 1, 15).unwrap(),
            None,
        );
        prop_assert!(result.is_err());
    }

    /// Totals are order-independent: reversing lines never changes them.
    #[test]
    fn prop_totals_order_independent(entries in balanced_entries_strategy()) {
        let forward = VoucherService::calculate_totals(&entries);
        let mut reversed = entries;
        reversed.reverse();
        let backward = VoucherService::calculate_totals(&reversed);
        prop_assert_eq!(forward.total_debit, backward.total_debit);
        prop_assert_eq!(forward.total_credit, backward.total_credit);
    }

    /// An entry with both sides set is rejected no matter the amounts.
    #[test]
    fn prop_both_sides_rejected(debit in amount_strategy(), credit in amount_strategy()) {
        let mut entry = EntryInput::debit("110505", debit);
        entry.credit = credit;
        let result = VoucherService::validate_entries(std::slice::from_ref(&entry), ok_lookup);
        prop_assert!(result.is_err());
    }

    /// The totals difference is exactly the sum of signed line amounts.
    #[test]
    fn prop_difference_is_signed_sum(entries in balanced_entries_strategy()) {
        let totals = VoucherService::calculate_totals(&entries);
        let signed: Decimal = entries.iter().map(|e| e.debit - e.credit).sum();
        prop_assert_eq!(totals.difference(), signed);
    }
}

#[test]
fn test_totals_new_balanced_flag() {
    use rust_decimal_macros::dec;
    assert!(VoucherTotals::new(dec!(5), dec!(5)).is_balanced);
    assert!(!VoucherTotals::new(dec!(5), dec!(4)).is_balanced);
}
