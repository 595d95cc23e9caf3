//! Report data types.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use partida_shared::types::{ThirdPartyId, VoucherId};

use crate::chart::{AccountNature, AccountType};
use crate::voucher::VoucherType;

// ============================================================================
// Journal
// ============================================================================

/// One posting line of the journal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JournalRow {
    /// Voucher date.
    pub date: NaiveDate,
    /// Voucher type.
    pub voucher_type: VoucherType,
    /// Voucher number.
    pub voucher_number: String,
    /// Voucher id.
    pub voucher_id: VoucherId,
    /// Account code.
    pub account_code: String,
    /// Account name (empty when the account is unknown to the chart).
    pub account_name: String,
    /// Third party, if any.
    pub third_party_id: Option<ThirdPartyId>,
    /// Line description.
    pub description: Option<String>,
    /// Debit amount.
    pub debit: Decimal,
    /// Credit amount.
    pub credit: Decimal,
}

/// Chronological listing of all postings in a period.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JournalReport {
    /// Period start.
    pub from: NaiveDate,
    /// Period end.
    pub to: NaiveDate,
    /// Voucher type filter, if one was applied.
    pub voucher_type: Option<VoucherType>,
    /// Rows ordered by date, then voucher number, then line.
    pub rows: Vec<JournalRow>,
    /// Sum of all debit amounts in the period.
    pub total_debit: Decimal,
    /// Sum of all credit amounts in the period.
    pub total_credit: Decimal,
}

// ============================================================================
// General ledger
// ============================================================================

/// One movement row of a single-account ledger statement.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralLedgerRow {
    /// Voucher date.
    pub date: NaiveDate,
    /// Voucher type.
    pub voucher_type: VoucherType,
    /// Voucher number.
    pub voucher_number: String,
    /// Voucher id.
    pub voucher_id: VoucherId,
    /// Line description.
    pub description: Option<String>,
    /// Third party, if any.
    pub third_party_id: Option<ThirdPartyId>,
    /// Debit amount.
    pub debit: Decimal,
    /// Credit amount.
    pub credit: Decimal,
    /// Running balance after this row.
    pub balance: Decimal,
}

/// Single-account statement over a period.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralLedgerReport {
    /// Account code.
    pub account_code: String,
    /// Account name.
    pub account_name: String,
    /// Account nature driving the running-balance sign.
    pub nature: AccountNature,
    /// Period start.
    pub from: NaiveDate,
    /// Period end.
    pub to: NaiveDate,
    /// Balance carried in from before the period.
    pub initial_balance: Decimal,
    /// Movement rows with running balances.
    pub rows: Vec<GeneralLedgerRow>,
    /// Period debit total.
    pub total_debit: Decimal,
    /// Period credit total.
    pub total_credit: Decimal,
    /// Balance after the last row (equals `initial_balance` when empty).
    pub final_balance: Decimal,
}

// ============================================================================
// Trial balance
// ============================================================================

/// One account row of the trial balance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrialBalanceRow {
    /// Account code.
    pub account_code: String,
    /// Account name.
    pub account_name: String,
    /// Account classification.
    pub account_type: AccountType,
    /// Account nature.
    pub nature: AccountNature,
    /// Hierarchy level.
    pub level: i16,
    /// Gross debit movement through the report date.
    pub debit_movement: Decimal,
    /// Gross credit movement through the report date.
    pub credit_movement: Decimal,
    /// Net balance when it falls on the debit side, else zero.
    pub debit_balance: Decimal,
    /// Net balance when it falls on the credit side, else zero.
    pub credit_balance: Decimal,
}

/// Per-account net balances; the global debit/credit identity check.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrialBalanceReport {
    /// Report date (inclusive).
    pub as_of: NaiveDate,
    /// Accounts with movement, ordered by code.
    pub rows: Vec<TrialBalanceRow>,
    /// Sum of gross debit movements.
    pub total_debit: Decimal,
    /// Sum of gross credit movements.
    pub total_credit: Decimal,
    /// Sum of the debit-balance column.
    pub total_debit_balance: Decimal,
    /// Sum of the credit-balance column.
    pub total_credit_balance: Decimal,
    /// Whether the two balance columns agree - the ledger-wide consistency
    /// check, independent of any single voucher.
    pub is_balanced: bool,
}

// ============================================================================
// Balance sheet
// ============================================================================

/// One account of a balance sheet section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BalanceSheetAccount {
    /// Account code.
    pub code: String,
    /// Account name.
    pub name: String,
    /// Hierarchy level.
    pub level: i16,
    /// Nature-signed balance as of the report date.
    pub balance: Decimal,
}

/// A fixed section of the balance sheet.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BalanceSheetSection {
    /// Section name.
    pub name: String,
    /// Accounts with a non-zero balance, ordered by code.
    pub accounts: Vec<BalanceSheetAccount>,
    /// Section total.
    pub total: Decimal,
}

/// Statement of financial position at a date.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BalanceSheetReport {
    /// Report date (inclusive).
    pub as_of: NaiveDate,
    /// Current assets (codes 11-139999).
    pub current_assets: BalanceSheetSection,
    /// Non-current assets (codes 14-199999).
    pub non_current_assets: BalanceSheetSection,
    /// Current liabilities (codes 21-259999).
    pub current_liabilities: BalanceSheetSection,
    /// Non-current liabilities (codes 26-299999).
    pub non_current_liabilities: BalanceSheetSection,
    /// Equity (codes 31-399999).
    pub equity: BalanceSheetSection,
    /// Total assets.
    pub total_assets: Decimal,
    /// Total liabilities.
    pub total_liabilities: Decimal,
    /// Total equity.
    pub total_equity: Decimal,
    /// Whether assets equal liabilities plus equity. A sanity flag, not an
    /// enforced invariant: it only holds once the result of the period has
    /// been closed into equity.
    pub is_balanced: bool,
}

// ============================================================================
// Income statement
// ============================================================================

/// Profit and loss over a period.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IncomeStatementReport {
    /// Period start.
    pub from: NaiveDate,
    /// Period end.
    pub to: NaiveDate,
    /// Operating income (codes 41-47), as credit - debit.
    pub operating_income: Decimal,
    /// Non-operating income (codes 48-49), as credit - debit.
    pub non_operating_income: Decimal,
    /// Total income.
    pub total_income: Decimal,
    /// Cost of sales (codes 61-69), as debit - credit.
    pub cost_of_sales: Decimal,
    /// Gross margin: income minus cost of sales.
    pub gross_margin: Decimal,
    /// Operating expenses (codes 51-54), as debit - credit.
    pub operating_expenses: Decimal,
    /// Non-operating expenses (codes 55-59), as debit - credit.
    pub non_operating_expenses: Decimal,
    /// Total expenses.
    pub total_expenses: Decimal,
    /// Net result: gross margin minus expenses.
    pub net_result: Decimal,
}
