//! Report generation service.
//!
//! Each generator composes the aggregation engine with a selection policy.
//! Inputs are the tenant's chart of accounts and a consistent snapshot of
//! POSTED entries; outputs are the typed reports in
//! [`super::types`].

use std::collections::HashMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::error::ReportError;
use super::types::{
    BalanceSheetAccount, BalanceSheetReport, BalanceSheetSection, GeneralLedgerReport,
    GeneralLedgerRow, IncomeStatementReport, JournalReport, JournalRow, TrialBalanceReport,
    TrialBalanceRow,
};
use crate::chart::{Account, AccountType, CodeRange, POSTABLE_LEVEL};
use crate::ledger::{
    PostedEntry, balance_as_of, initial_balance, movement_through, period_movement,
    running_balances, window,
};
use crate::voucher::VoucherType;

// Balance sheet section ranges (PUC classes 1-3).
const CURRENT_ASSETS: CodeRange = CodeRange::new("11", "139999");
const NON_CURRENT_ASSETS: CodeRange = CodeRange::new("14", "199999");
const CURRENT_LIABILITIES: CodeRange = CodeRange::new("21", "259999");
const NON_CURRENT_LIABILITIES: CodeRange = CodeRange::new("26", "299999");
const EQUITY: CodeRange = CodeRange::new("31", "399999");

// Income statement ranges (PUC classes 4-6).
const OPERATING_INCOME: CodeRange = CodeRange::new("41", "479999");
const NON_OPERATING_INCOME: CodeRange = CodeRange::new("48", "499999");
const OPERATING_EXPENSES: CodeRange = CodeRange::new("51", "549999");
const NON_OPERATING_EXPENSES: CodeRange = CodeRange::new("55", "599999");
const COST_OF_SALES: CodeRange = CodeRange::new("61", "699999");

/// Service for generating financial reports.
///
/// Stateless; every generator is a pure function of its arguments.
pub struct ReportService;

impl ReportService {
    /// Generates the journal: every posting in `[from, to]`, chronological.
    ///
    /// # Errors
    ///
    /// Returns `InvalidDateRange` when `from` is after `to`.
    pub fn journal(
        from: NaiveDate,
        to: NaiveDate,
        voucher_type: Option<VoucherType>,
        accounts: &[Account],
        entries: &[PostedEntry],
    ) -> Result<JournalReport, ReportError> {
        validate_range(from, to)?;

        let names: HashMap<&str, &str> = accounts
            .iter()
            .map(|a| (a.code.as_str(), a.name.as_str()))
            .collect();

        let mut selected: Vec<&PostedEntry> = entries
            .iter()
            .filter(|e| e.date >= from && e.date <= to)
            .filter(|e| voucher_type.is_none_or(|t| e.voucher_type == t))
            .collect();
        selected.sort_by(|a, b| {
            a.date
                .cmp(&b.date)
                .then_with(|| a.voucher_number.cmp(&b.voucher_number))
                .then_with(|| a.line_number.cmp(&b.line_number))
        });

        let mut total_debit = Decimal::ZERO;
        let mut total_credit = Decimal::ZERO;
        let rows: Vec<JournalRow> = selected
            .into_iter()
            .map(|entry| {
                total_debit += entry.debit;
                total_credit += entry.credit;
                JournalRow {
                    date: entry.date,
                    voucher_type: entry.voucher_type,
                    voucher_number: entry.voucher_number.clone(),
                    voucher_id: entry.voucher_id,
                    account_code: entry.account_code.clone(),
                    account_name: names
                        .get(entry.account_code.as_str())
                        .copied()
                        .unwrap_or_default()
                        .to_string(),
                    third_party_id: entry.third_party_id,
                    description: entry.description.clone(),
                    debit: entry.debit,
                    credit: entry.credit,
                }
            })
            .collect();

        Ok(JournalReport {
            from,
            to,
            voucher_type,
            rows,
            total_debit,
            total_credit,
        })
    }

    /// Generates a single-account ledger statement over `[from, to]`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidDateRange` when `from` is after `to`.
    pub fn general_ledger(
        account: &Account,
        from: NaiveDate,
        to: NaiveDate,
        entries: &[PostedEntry],
    ) -> Result<GeneralLedgerReport, ReportError> {
        validate_range(from, to)?;

        let opening = initial_balance(&account.code, account.nature, entries, from);
        let ordered = window(&account.code, entries, from, to);
        let balances = running_balances(account.nature, opening, &ordered);

        let mut total_debit = Decimal::ZERO;
        let mut total_credit = Decimal::ZERO;
        let rows: Vec<GeneralLedgerRow> = ordered
            .iter()
            .zip(balances.iter())
            .map(|(entry, balance)| {
                total_debit += entry.debit;
                total_credit += entry.credit;
                GeneralLedgerRow {
                    date: entry.date,
                    voucher_type: entry.voucher_type,
                    voucher_number: entry.voucher_number.clone(),
                    voucher_id: entry.voucher_id,
                    description: entry.description.clone(),
                    third_party_id: entry.third_party_id,
                    debit: entry.debit,
                    credit: entry.credit,
                    balance: *balance,
                }
            })
            .collect();

        let final_balance = balances.last().copied().unwrap_or(opening);

        Ok(GeneralLedgerReport {
            account_code: account.code.clone(),
            account_name: account.name.clone(),
            nature: account.nature,
            from,
            to,
            initial_balance: opening,
            rows,
            total_debit,
            total_credit,
            final_balance,
        })
    }

    /// Generates the trial balance as of a date (inclusive).
    ///
    /// Accounts with zero movement are excluded. For each included account
    /// the nature-adjusted net balance lands in the debit or credit column;
    /// a negative net flips to the opposite column. Equal column totals are
    /// the ledger-wide consistency check.
    #[must_use]
    pub fn trial_balance(
        as_of: NaiveDate,
        accounts: &[Account],
        entries: &[PostedEntry],
    ) -> TrialBalanceReport {
        let mut rows = Vec::new();
        let mut total_debit = Decimal::ZERO;
        let mut total_credit = Decimal::ZERO;
        let mut total_debit_balance = Decimal::ZERO;
        let mut total_credit_balance = Decimal::ZERO;

        let mut sorted: Vec<&Account> = accounts.iter().filter(|a| a.is_active).collect();
        sorted.sort_by(|a, b| a.code.cmp(&b.code));

        for account in sorted {
            let movement = movement_through(&account.code, entries, as_of);
            if movement.is_zero() {
                continue;
            }

            let net = account.nature.balance_change(movement.debit, movement.credit);
            let (debit_balance, credit_balance) = split_by_nature(account, net);

            total_debit += movement.debit;
            total_credit += movement.credit;
            total_debit_balance += debit_balance;
            total_credit_balance += credit_balance;

            rows.push(TrialBalanceRow {
                account_code: account.code.clone(),
                account_name: account.name.clone(),
                account_type: account.account_type,
                nature: account.nature,
                level: account.level,
                debit_movement: movement.debit,
                credit_movement: movement.credit,
                debit_balance,
                credit_balance,
            });
        }

        TrialBalanceReport {
            as_of,
            rows,
            total_debit,
            total_credit,
            total_debit_balance,
            total_credit_balance,
            is_balanced: total_debit_balance == total_credit_balance,
        }
    }

    /// Generates the balance sheet at a date (inclusive).
    ///
    /// Level-4 accounts are bucketed into five fixed sections by account
    /// type and code range; zero-balance accounts are skipped. The
    /// assets = liabilities + equity cross-check is reported, not enforced.
    #[must_use]
    pub fn balance_sheet(
        as_of: NaiveDate,
        accounts: &[Account],
        entries: &[PostedEntry],
    ) -> BalanceSheetReport {
        let mut balances: HashMap<&str, Decimal> = HashMap::new();
        for account in accounts.iter().filter(|a| a.level == POSTABLE_LEVEL && a.is_active) {
            balances.insert(
                account.code.as_str(),
                balance_as_of(&account.code, account.nature, entries, as_of),
            );
        }

        let section = |name: &str, account_type: AccountType, range: &CodeRange| {
            build_section(name, account_type, range, accounts, &balances)
        };

        let current_assets = section("Current assets", AccountType::Asset, &CURRENT_ASSETS);
        let non_current_assets =
            section("Non-current assets", AccountType::Asset, &NON_CURRENT_ASSETS);
        let current_liabilities =
            section("Current liabilities", AccountType::Liability, &CURRENT_LIABILITIES);
        let non_current_liabilities = section(
            "Non-current liabilities",
            AccountType::Liability,
            &NON_CURRENT_LIABILITIES,
        );
        let equity = section("Equity", AccountType::Equity, &EQUITY);

        let total_assets = current_assets.total + non_current_assets.total;
        let total_liabilities = current_liabilities.total + non_current_liabilities.total;
        let total_equity = equity.total;

        BalanceSheetReport {
            as_of,
            current_assets,
            non_current_assets,
            current_liabilities,
            non_current_liabilities,
            equity,
            total_assets,
            total_liabilities,
            total_equity,
            is_balanced: total_assets == total_liabilities + total_equity,
        }
    }

    /// Generates the income statement over `[from, to]`.
    ///
    /// Income ranges contribute credit - debit; cost and expense ranges
    /// contribute debit - credit. Margins are derived arithmetic, never
    /// stored.
    ///
    /// # Errors
    ///
    /// Returns `InvalidDateRange` when `from` is after `to`.
    pub fn income_statement(
        from: NaiveDate,
        to: NaiveDate,
        accounts: &[Account],
        entries: &[PostedEntry],
    ) -> Result<IncomeStatementReport, ReportError> {
        validate_range(from, to)?;

        let sum_range = |range: &CodeRange, credit_natured: bool| -> Decimal {
            accounts
                .iter()
                .filter(|a| a.level == POSTABLE_LEVEL && a.is_active && range.contains(&a.code))
                .map(|account| {
                    let movement = period_movement(&account.code, entries, from, to);
                    if credit_natured {
                        movement.credit - movement.debit
                    } else {
                        movement.debit - movement.credit
                    }
                })
                .sum()
        };

        let operating_income = sum_range(&OPERATING_INCOME, true);
        let non_operating_income = sum_range(&NON_OPERATING_INCOME, true);
        let total_income = operating_income + non_operating_income;

        let cost_of_sales = sum_range(&COST_OF_SALES, false);
        let gross_margin = total_income - cost_of_sales;

        let operating_expenses = sum_range(&OPERATING_EXPENSES, false);
        let non_operating_expenses = sum_range(&NON_OPERATING_EXPENSES, false);
        let total_expenses = operating_expenses + non_operating_expenses;

        Ok(IncomeStatementReport {
            from,
            to,
            operating_income,
            non_operating_income,
            total_income,
            cost_of_sales,
            gross_margin,
            operating_expenses,
            non_operating_expenses,
            total_expenses,
            net_result: gross_margin - total_expenses,
        })
    }
}

fn validate_range(from: NaiveDate, to: NaiveDate) -> Result<(), ReportError> {
    if from > to {
        return Err(ReportError::InvalidDateRange { start: from, end: to });
    }
    Ok(())
}

/// Splits a nature-adjusted net balance into trial balance columns.
///
/// A positive net sits in the account's natural column; a negative net
/// flips to the opposite column as its absolute value.
fn split_by_nature(account: &Account, net: Decimal) -> (Decimal, Decimal) {
    use crate::chart::AccountNature;

    if net.is_zero() {
        return (Decimal::ZERO, Decimal::ZERO);
    }
    let natural_debit = account.nature == AccountNature::Debit;
    if (net > Decimal::ZERO) == natural_debit {
        (net.abs(), Decimal::ZERO)
    } else {
        (Decimal::ZERO, net.abs())
    }
}

fn build_section(
    name: &str,
    account_type: AccountType,
    range: &CodeRange,
    accounts: &[Account],
    balances: &HashMap<&str, Decimal>,
) -> BalanceSheetSection {
    let mut selected: Vec<&Account> = accounts
        .iter()
        .filter(|a| a.account_type == account_type && range.contains(&a.code))
        .filter(|a| {
            balances
                .get(a.code.as_str())
                .is_some_and(|balance| !balance.is_zero())
        })
        .collect();
    selected.sort_by(|a, b| a.code.cmp(&b.code));

    let accounts: Vec<BalanceSheetAccount> = selected
        .into_iter()
        .map(|account| BalanceSheetAccount {
            code: account.code.clone(),
            name: account.name.clone(),
            level: account.level,
            balance: balances[account.code.as_str()],
        })
        .collect();

    let total = accounts.iter().map(|a| a.balance).sum();

    BalanceSheetSection {
        name: name.to_string(),
        accounts,
        total,
    }
}
