//! Property tests for report generation.
//!
//! The central property: for ANY sequence of posted balanced vouchers, the
//! trial balance's debit-balance and credit-balance columns sum to the same
//! total.

use chrono::{NaiveDate, Utc};
use proptest::prelude::*;
use rust_decimal::Decimal;
use partida_shared::types::{AccountId, TenantId, VoucherId};

use super::service::ReportService;
use crate::chart::{Account, AccountType};
use crate::ledger::PostedEntry;
use crate::voucher::VoucherType;

/// A chart spanning every account class the generators classify.
fn chart() -> Vec<Account> {
    let make = |code: &str, account_type: AccountType| Account {
        id: AccountId::new(),
        tenant_id: TenantId::new(),
        code: code.to_string(),
        name: code.to_string(),
        account_type,
        nature: account_type.default_nature(),
        level: 4,
        parent_code: None,
        requires_third_party: false,
        requires_cost_center: false,
        is_active: true,
        is_system: false,
        created_at: Utc::now(),
    };
    vec![
        make("110505", AccountType::Asset),
        make("130505", AccountType::Asset),
        make("152405", AccountType::Asset),
        make("220505", AccountType::Liability),
        make("240801", AccountType::Liability),
        make("310505", AccountType::Equity),
        make("413501", AccountType::Income),
        make("510501", AccountType::Expense),
        make("613501", AccountType::Cost),
    ]
}

const CODES: [&str; 9] = [
    "110505", "130505", "152405", "220505", "240801", "310505", "413501", "510501", "613501",
];

fn date(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 3, day).unwrap()
}

/// Builds one posted balanced voucher: a debit line and a credit line of
/// the same amount against two (possibly equal) accounts.
fn build_voucher(
    id: u128,
    debit_idx: usize,
    credit_idx: usize,
    amount: Decimal,
    day: u32,
) -> Vec<PostedEntry> {
    let voucher_id = VoucherId::from_uuid(uuid::Uuid::from_u128(id));
    let number = format!("NOT-{id:04}");
    let line = |line_number: i32, code: &str, debit: Decimal, credit: Decimal| PostedEntry {
        voucher_id,
        voucher_number: number.clone(),
        voucher_type: VoucherType::Note,
        date: date(day),
        line_number,
        account_code: code.to_string(),
        description: None,
        third_party_id: None,
        debit,
        credit,
    };
    vec![
        line(1, CODES[debit_idx], amount, Decimal::ZERO),
        line(2, CODES[credit_idx], Decimal::ZERO, amount),
    ]
}

/// A random ledger: 1..20 posted balanced vouchers.
fn ledger_strategy() -> impl Strategy<Value = Vec<PostedEntry>> {
    prop::collection::vec(
        (0usize..CODES.len(), 0usize..CODES.len(), 1i64..5_000_000i64, 1u32..29),
        1..20,
    )
    .prop_map(|raw| {
        raw.into_iter()
            .enumerate()
            .flat_map(|(index, (debit_idx, credit_idx, amount, day))| {
                build_voucher(
                    index as u128 + 1,
                    debit_idx,
                    credit_idx,
                    Decimal::new(amount, 2),
                    day,
                )
            })
            .collect()
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Trial balance global identity: for any set of balanced vouchers,
    /// sum(debit balances) == sum(credit balances).
    #[test]
    fn prop_trial_balance_columns_agree(entries in ledger_strategy()) {
        let report = ReportService::trial_balance(date(28), &chart(), &entries);
        prop_assert_eq!(report.total_debit_balance, report.total_credit_balance);
        prop_assert!(report.is_balanced);
    }

    /// Gross movement totals also agree for balanced vouchers.
    #[test]
    fn prop_trial_balance_gross_movement_agrees(entries in ledger_strategy()) {
        let report = ReportService::trial_balance(date(28), &chart(), &entries);
        prop_assert_eq!(report.total_debit, report.total_credit);
    }

    /// The general ledger reconstructs: final balance equals initial
    /// balance plus the nature-signed period totals, for every account.
    #[test]
    fn prop_general_ledger_reconstructs(entries in ledger_strategy(), from_day in 1u32..28) {
        let accounts = chart();
        for account in &accounts {
            let report = ReportService::general_ledger(
                account,
                date(from_day),
                date(28),
                &entries,
            ).unwrap();

            let expected = report.initial_balance
                + account.nature.balance_change(report.total_debit, report.total_credit);
            prop_assert_eq!(report.final_balance, expected);
        }
    }

    /// The journal's period totals agree with each other for balanced
    /// vouchers covering the whole period.
    #[test]
    fn prop_journal_totals_agree(entries in ledger_strategy()) {
        let report = ReportService::journal(date(1), date(28), None, &chart(), &entries).unwrap();
        prop_assert_eq!(report.total_debit, report.total_credit);
        prop_assert_eq!(report.rows.len(), entries.len());
    }

    /// Journal rows never leave the requested window.
    #[test]
    fn prop_journal_respects_window(
        entries in ledger_strategy(),
        from_day in 1u32..15,
        to_day in 15u32..29,
    ) {
        let report = ReportService::journal(
            date(from_day),
            date(to_day),
            None,
            &chart(),
            &entries,
        ).unwrap();
        let within_window = report.rows.iter().all(|r| {
            r.date >= date(from_day) && r.date <= date(to_day)
        });
        prop_assert!(within_window);
    }
}
