//! Balance and movement computations.
//!
//! The nature-signed accumulation rule lives in
//! [`AccountNature::balance_change`]; everything here folds it over entries
//! in the deterministic (date, voucher id, line number) order. Date windows
//! are inclusive of both endpoints; "initial balance at `from`" covers
//! entries strictly before `from`.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::types::{Movement, PostedEntry};
use crate::chart::AccountNature;

/// Sorts entries into the canonical ledger order.
///
/// Within a date, entries are ordered by their owning voucher's id
/// (insertion order, since ids are UUID v7) and then by line number. Every
/// derived running balance depends on this order being reproducible.
pub fn sort_chronological(entries: &mut [PostedEntry]) {
    entries.sort_by(|a, b| {
        a.date
            .cmp(&b.date)
            .then_with(|| a.voucher_id.cmp(&b.voucher_id))
            .then_with(|| a.line_number.cmp(&b.line_number))
    });
}

/// Collects the account's entries within `[from, to]`, in canonical order.
#[must_use]
pub fn window(
    account_code: &str,
    entries: &[PostedEntry],
    from: NaiveDate,
    to: NaiveDate,
) -> Vec<PostedEntry> {
    let mut selected: Vec<PostedEntry> = entries
        .iter()
        .filter(|e| e.account_code == account_code && e.date >= from && e.date <= to)
        .cloned()
        .collect();
    sort_chronological(&mut selected);
    selected
}

/// Accumulates the nature-signed balance over an entry iterator.
fn accumulate<'a>(
    nature: AccountNature,
    start: Decimal,
    entries: impl Iterator<Item = &'a PostedEntry>,
) -> Decimal {
    entries.fold(start, |balance, entry| {
        balance + nature.balance_change(entry.debit, entry.credit)
    })
}

/// Balance of an account over all entries strictly before `as_of`.
///
/// Used as the opening balance for ledger and report windows.
#[must_use]
pub fn initial_balance(
    account_code: &str,
    nature: AccountNature,
    entries: &[PostedEntry],
    as_of: NaiveDate,
) -> Decimal {
    accumulate(
        nature,
        Decimal::ZERO,
        entries
            .iter()
            .filter(|e| e.account_code == account_code && e.date < as_of),
    )
}

/// Balance of an account including entries dated `as_of` itself.
#[must_use]
pub fn balance_as_of(
    account_code: &str,
    nature: AccountNature,
    entries: &[PostedEntry],
    as_of: NaiveDate,
) -> Decimal {
    accumulate(
        nature,
        Decimal::ZERO,
        entries
            .iter()
            .filter(|e| e.account_code == account_code && e.date <= as_of),
    )
}

/// Gross debit/credit sums for an account within `[from, to]`.
#[must_use]
pub fn period_movement(
    account_code: &str,
    entries: &[PostedEntry],
    from: NaiveDate,
    to: NaiveDate,
) -> Movement {
    let mut movement = Movement::default();
    for entry in entries
        .iter()
        .filter(|e| e.account_code == account_code && e.date >= from && e.date <= to)
    {
        movement.add(entry.debit, entry.credit);
    }
    movement
}

/// Gross debit/credit sums for an account up to and including `as_of`.
///
/// Trial-balance semantics: all history through the end of the day.
#[must_use]
pub fn movement_through(account_code: &str, entries: &[PostedEntry], as_of: NaiveDate) -> Movement {
    let mut movement = Movement::default();
    for entry in entries
        .iter()
        .filter(|e| e.account_code == account_code && e.date <= as_of)
    {
        movement.add(entry.debit, entry.credit);
    }
    movement
}

/// Computes the running balance after each entry of an ordered window.
///
/// `ordered` must already be in canonical order (see [`window`]); the result
/// has one balance per entry.
#[must_use]
pub fn running_balances(
    nature: AccountNature,
    initial: Decimal,
    ordered: &[PostedEntry],
) -> Vec<Decimal> {
    let mut balances = Vec::with_capacity(ordered.len());
    let mut balance = initial;
    for entry in ordered {
        balance += nature.balance_change(entry.debit, entry.credit);
        balances.push(balance);
    }
    balances
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use partida_shared::types::VoucherId;

    use crate::voucher::VoucherType;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    /// Fixed voucher ids whose byte order follows `n`, so ordering
    /// assertions do not depend on id generation timing.
    fn vid(n: u32) -> VoucherId {
        format!("00000000-0000-0000-0000-0000000000{n:02}")
            .parse()
            .unwrap()
    }

    fn entry(
        voucher_id: VoucherId,
        day: u32,
        line: i32,
        account: &str,
        debit: Decimal,
        credit: Decimal,
    ) -> PostedEntry {
        PostedEntry {
            voucher_id,
            voucher_number: "ING-0001".to_string(),
            voucher_type: VoucherType::Income,
            date: date(2026, 1, day),
            line_number: line,
            account_code: account.to_string(),
            description: None,
            third_party_id: None,
            debit,
            credit,
        }
    }

    #[test]
    fn test_sort_orders_by_date_then_voucher_then_line() {
        let v1 = vid(1);
        let v2 = vid(2);
        let mut entries = vec![
            entry(v2, 2, 1, "110505", dec!(30), dec!(0)),
            entry(v1, 2, 2, "110505", dec!(20), dec!(0)),
            entry(v1, 2, 1, "110505", dec!(10), dec!(0)),
            entry(v2, 1, 1, "110505", dec!(5), dec!(0)),
        ];
        sort_chronological(&mut entries);

        assert_eq!(entries[0].debit, dec!(5));
        assert_eq!(entries[1].debit, dec!(10));
        assert_eq!(entries[2].debit, dec!(20));
        assert_eq!(entries[3].debit, dec!(30));
    }

    #[test]
    fn test_initial_balance_is_strictly_before() {
        let v = vid(1);
        let entries = vec![
            entry(v, 10, 1, "110505", dec!(100), dec!(0)),
            entry(v, 15, 2, "110505", dec!(50), dec!(0)),
        ];
        // The entry dated the 15th is not part of the opening balance at the 15th.
        assert_eq!(
            initial_balance("110505", AccountNature::Debit, &entries, date(2026, 1, 15)),
            dec!(100)
        );
        assert_eq!(
            balance_as_of("110505", AccountNature::Debit, &entries, date(2026, 1, 15)),
            dec!(150)
        );
    }

    #[test]
    fn test_balance_respects_nature() {
        let v = vid(1);
        let entries = vec![
            entry(v, 5, 1, "413501", dec!(0), dec!(100)),
            entry(v, 6, 2, "413501", dec!(30), dec!(0)),
        ];
        assert_eq!(
            balance_as_of("413501", AccountNature::Credit, &entries, date(2026, 1, 31)),
            dec!(70)
        );
        assert_eq!(
            balance_as_of("413501", AccountNature::Debit, &entries, date(2026, 1, 31)),
            dec!(-70)
        );
    }

    #[test]
    fn test_balance_filters_by_account() {
        let v = vid(1);
        let entries = vec![
            entry(v, 5, 1, "110505", dec!(100), dec!(0)),
            entry(v, 5, 2, "413501", dec!(0), dec!(100)),
        ];
        assert_eq!(
            balance_as_of("110505", AccountNature::Debit, &entries, date(2026, 1, 31)),
            dec!(100)
        );
    }

    #[test]
    fn test_period_movement_not_netted() {
        let v = vid(1);
        let entries = vec![
            entry(v, 5, 1, "110505", dec!(100), dec!(0)),
            entry(v, 6, 2, "110505", dec!(0), dec!(40)),
            entry(v, 7, 3, "110505", dec!(10), dec!(0)),
        ];
        let movement = period_movement("110505", &entries, date(2026, 1, 5), date(2026, 1, 6));
        assert_eq!(movement.debit, dec!(100));
        assert_eq!(movement.credit, dec!(40));
    }

    #[test]
    fn test_movement_through_includes_day() {
        let v = vid(1);
        let entries = vec![
            entry(v, 5, 1, "110505", dec!(100), dec!(0)),
            entry(v, 6, 2, "110505", dec!(0), dec!(40)),
        ];
        let movement = movement_through("110505", &entries, date(2026, 1, 6));
        assert_eq!(movement.debit, dec!(100));
        assert_eq!(movement.credit, dec!(40));
    }

    #[test]
    fn test_running_balances() {
        let v = vid(1);
        let ordered = vec![
            entry(v, 5, 1, "110505", dec!(100), dec!(0)),
            entry(v, 6, 2, "110505", dec!(0), dec!(30)),
            entry(v, 7, 3, "110505", dec!(15), dec!(0)),
        ];
        let balances = running_balances(AccountNature::Debit, dec!(10), &ordered);
        assert_eq!(balances, vec![dec!(110), dec!(80), dec!(95)]);
    }

    #[test]
    fn test_window_selects_and_orders() {
        let v1 = vid(1);
        let v2 = vid(2);
        let entries = vec![
            entry(v2, 6, 1, "110505", dec!(20), dec!(0)),
            entry(v1, 6, 1, "110505", dec!(10), dec!(0)),
            entry(v1, 1, 1, "110505", dec!(1), dec!(0)),
            entry(v1, 6, 1, "413501", dec!(0), dec!(10)),
        ];
        let selected = window("110505", &entries, date(2026, 1, 5), date(2026, 1, 10));
        assert_eq!(selected.len(), 2);
        assert_eq!(selected[0].debit, dec!(10));
        assert_eq!(selected[1].debit, dec!(20));
    }
}
