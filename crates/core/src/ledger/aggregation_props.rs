//! Property tests for the aggregation engine.

use chrono::NaiveDate;
use proptest::prelude::*;
use rust_decimal::Decimal;
use partida_shared::types::VoucherId;

use super::aggregation::{
    balance_as_of, initial_balance, period_movement, running_balances, sort_chronological, window,
};
use super::types::PostedEntry;
use crate::chart::AccountNature;
use crate::voucher::VoucherType;

const ACCOUNT: &str = "110505";

fn date(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 1, day).unwrap()
}

fn make_entry(id: u128, day: u32, line: i32, debit: Decimal, credit: Decimal) -> PostedEntry {
    PostedEntry {
        voucher_id: VoucherId::from_uuid(uuid_from(id)),
        voucher_number: format!("ING-{:04}", id),
        voucher_type: VoucherType::Income,
        date: date(day),
        line_number: line,
        account_code: ACCOUNT.to_string(),
        description: None,
        third_party_id: None,
        debit,
        credit,
    }
}

fn uuid_from(n: u128) -> uuid::Uuid {
    uuid::Uuid::from_u128(n)
}

/// Strategy for an arbitrary month of postings on one account.
fn entries_strategy() -> impl Strategy<Value = Vec<PostedEntry>> {
    prop::collection::vec(
        (1u32..29, 1i64..1_000_000i64, any::<bool>()),
        1..40,
    )
    .prop_map(|raw| {
        raw.into_iter()
            .enumerate()
            .map(|(index, (day, amount, is_debit))| {
                let amount = Decimal::new(amount, 2);
                let (debit, credit) = if is_debit {
                    (amount, Decimal::ZERO)
                } else {
                    (Decimal::ZERO, amount)
                };
                make_entry(index as u128 + 1, day, 1, debit, credit)
            })
            .collect()
    })
}

fn nature_strategy() -> impl Strategy<Value = AccountNature> {
    prop_oneof![Just(AccountNature::Debit), Just(AccountNature::Credit)]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Splitting a range at any midpoint and composing the pieces yields
    /// the same final balance as computing the whole range at once.
    #[test]
    fn prop_balance_composes_across_range_split(
        entries in entries_strategy(),
        nature in nature_strategy(),
        split_day in 2u32..28,
    ) {
        let full = balance_as_of(ACCOUNT, nature, &entries, date(28));

        // First chunk: everything through the split day.
        let first = balance_as_of(ACCOUNT, nature, &entries, date(split_day));
        // Second chunk: the rest, accumulated on top of the first.
        let tail = window(ACCOUNT, &entries, date(split_day + 1), date(28));
        let composed = running_balances(nature, first, &tail)
            .last()
            .copied()
            .unwrap_or(first);

        prop_assert_eq!(full, composed);
    }

    /// The general-ledger identity: final balance equals initial balance
    /// plus the nature-signed period movement.
    #[test]
    fn prop_final_equals_initial_plus_movement(
        entries in entries_strategy(),
        nature in nature_strategy(),
        from_day in 1u32..28,
    ) {
        let from = date(from_day);
        let to = date(28);

        let initial = initial_balance(ACCOUNT, nature, &entries, from);
        let movement = period_movement(ACCOUNT, &entries, from, to);
        let expected = initial + nature.balance_change(movement.debit, movement.credit);

        prop_assert_eq!(balance_as_of(ACCOUNT, nature, &entries, to), expected);
    }

    /// Sorting is deterministic: sorting any permutation of the same
    /// entries produces the same sequence of running balances.
    #[test]
    fn prop_running_balance_deterministic(
        entries in entries_strategy(),
        nature in nature_strategy(),
    ) {
        let mut forward = entries.clone();
        sort_chronological(&mut forward);
        let mut backward = entries;
        backward.reverse();
        sort_chronological(&mut backward);

        let balances_fwd = running_balances(nature, Decimal::ZERO, &forward);
        let balances_bwd = running_balances(nature, Decimal::ZERO, &backward);
        prop_assert_eq!(balances_fwd, balances_bwd);
    }

    /// Removing a voucher's entries from the input is exactly what voiding
    /// does to balances: the result matches a history where the voucher
    /// never existed.
    #[test]
    fn prop_excluded_voucher_never_contributes(
        entries in entries_strategy(),
        nature in nature_strategy(),
    ) {
        let voided_id = entries[0].voucher_id;
        let surviving: Vec<PostedEntry> = entries
            .iter()
            .filter(|e| e.voucher_id != voided_id)
            .cloned()
            .collect();

        let with_void = balance_as_of(ACCOUNT, nature, &surviving, date(28));
        let direct = surviving
            .iter()
            .fold(Decimal::ZERO, |acc, e| acc + nature.balance_change(e.debit, e.credit));
        prop_assert_eq!(with_void, direct);
    }

    /// Opposite natures see opposite balances.
    #[test]
    fn prop_natures_are_mirror_images(entries in entries_strategy()) {
        let debit_view = balance_as_of(ACCOUNT, AccountNature::Debit, &entries, date(28));
        let credit_view = balance_as_of(ACCOUNT, AccountNature::Credit, &entries, date(28));
        prop_assert_eq!(debit_view, -credit_view);
    }

    /// The movement split is gross: debits and credits never cancel.
    #[test]
    fn prop_movement_is_gross(entries in entries_strategy()) {
        let movement = period_movement(ACCOUNT, &entries, date(1), date(28));
        let debit_sum: Decimal = entries.iter().map(|e| e.debit).sum();
        let credit_sum: Decimal = entries.iter().map(|e| e.credit).sum();
        prop_assert_eq!(movement.debit, debit_sum);
        prop_assert_eq!(movement.credit, credit_sum);
    }
}
