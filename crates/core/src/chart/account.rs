//! Account domain types.
//!
//! Accounts follow a hierarchical numbering plan (the Colombian PUC in the
//! demo data): level 1 is a class ("1"), level 2 a group ("11"), level 3 an
//! account ("1105") and level 4 a subaccount ("110505"). Only level-4
//! accounts may receive postings.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use partida_shared::types::{AccountId, TenantId};

/// The hierarchy level at which accounts become postable.
pub const POSTABLE_LEVEL: i16 = 4;

/// Account classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccountType {
    /// Assets (class 1).
    Asset,
    /// Liabilities (class 2).
    Liability,
    /// Equity (class 3).
    Equity,
    /// Income (class 4).
    Income,
    /// Expenses (class 5).
    Expense,
    /// Cost of sales (class 6).
    Cost,
}

impl AccountType {
    /// Returns the conventional nature for this account type.
    ///
    /// Assets, expenses and costs are debit-normal; liabilities, equity and
    /// income are credit-normal.
    #[must_use]
    pub const fn default_nature(self) -> AccountNature {
        match self {
            Self::Asset | Self::Expense | Self::Cost => AccountNature::Debit,
            Self::Liability | Self::Equity | Self::Income => AccountNature::Credit,
        }
    }
}

/// Whether an account's normal balance grows with debits or credits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountNature {
    /// Debit-normal: balance accumulates as `+ debit - credit`.
    Debit,
    /// Credit-normal: balance accumulates as `- debit + credit`.
    Credit,
}

impl AccountNature {
    /// Calculates the balance change contributed by one entry.
    ///
    /// This sign convention is the single place where nature meets amounts;
    /// every derived balance in the engine goes through it.
    #[must_use]
    pub fn balance_change(self, debit: Decimal, credit: Decimal) -> Decimal {
        match self {
            Self::Debit => debit - credit,
            Self::Credit => credit - debit,
        }
    }
}

/// A chart of accounts entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    /// Unique identifier.
    pub id: AccountId,
    /// Tenant this account belongs to.
    pub tenant_id: TenantId,
    /// Hierarchical account code, unique per tenant (e.g. "110505").
    pub code: String,
    /// Account name (e.g. "Caja general").
    pub name: String,
    /// Account classification.
    pub account_type: AccountType,
    /// Debit- or credit-normal. Never changes once postings exist.
    pub nature: AccountNature,
    /// Hierarchy level: 1 = class, 2 = group, 3 = account, 4 = subaccount.
    pub level: i16,
    /// Parent account code, informational for rollups.
    pub parent_code: Option<String>,
    /// Whether postings must carry a third party.
    pub requires_third_party: bool,
    /// Whether postings must carry a cost center.
    pub requires_cost_center: bool,
    /// Inactive accounts cannot receive new postings.
    pub is_active: bool,
    /// System accounts cannot be updated or deleted.
    pub is_system: bool,
    /// When the account was created.
    pub created_at: DateTime<Utc>,
}

impl Account {
    /// Returns true if this account may receive postings.
    #[must_use]
    pub fn is_postable(&self) -> bool {
        self.level == POSTABLE_LEVEL && self.is_active
    }

    /// Returns the account code with its name, for display.
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} - {}", self.code, self.name)
    }
}

/// An inclusive range of account codes, compared lexicographically.
///
/// Code ranges drive report classification: e.g. current assets are the
/// accounts with type `Asset` and code in `"11"..="139999"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodeRange {
    /// Lower bound (inclusive).
    pub start: &'static str,
    /// Upper bound (inclusive).
    pub end: &'static str,
}

impl CodeRange {
    /// Creates a new code range.
    #[must_use]
    pub const fn new(start: &'static str, end: &'static str) -> Self {
        Self { start, end }
    }

    /// Returns true if the code falls inside the range.
    #[must_use]
    pub fn contains(&self, code: &str) -> bool {
        code >= self.start && code <= self.end
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal_macros::dec;

    fn make_account(code: &str, level: i16, active: bool) -> Account {
        Account {
            id: AccountId::new(),
            tenant_id: TenantId::new(),
            code: code.to_string(),
            name: "Test".to_string(),
            account_type: AccountType::Asset,
            nature: AccountNature::Debit,
            level,
            parent_code: None,
            requires_third_party: false,
            requires_cost_center: false,
            is_active: active,
            is_system: false,
            created_at: Utc::now(),
        }
    }

    #[rstest]
    #[case(AccountType::Asset, AccountNature::Debit)]
    #[case(AccountType::Expense, AccountNature::Debit)]
    #[case(AccountType::Cost, AccountNature::Debit)]
    #[case(AccountType::Liability, AccountNature::Credit)]
    #[case(AccountType::Equity, AccountNature::Credit)]
    #[case(AccountType::Income, AccountNature::Credit)]
    fn test_default_nature(#[case] account_type: AccountType, #[case] nature: AccountNature) {
        assert_eq!(account_type.default_nature(), nature);
    }

    #[test]
    fn test_debit_nature_balance_change() {
        let nature = AccountNature::Debit;
        assert_eq!(nature.balance_change(dec!(100), dec!(0)), dec!(100));
        assert_eq!(nature.balance_change(dec!(0), dec!(40)), dec!(-40));
        assert_eq!(nature.balance_change(dec!(100), dec!(40)), dec!(60));
    }

    #[test]
    fn test_credit_nature_balance_change() {
        let nature = AccountNature::Credit;
        assert_eq!(nature.balance_change(dec!(0), dec!(100)), dec!(100));
        assert_eq!(nature.balance_change(dec!(40), dec!(0)), dec!(-40));
        assert_eq!(nature.balance_change(dec!(40), dec!(100)), dec!(60));
    }

    #[test]
    fn test_postable_only_at_level_four() {
        assert!(make_account("110505", 4, true).is_postable());
        assert!(!make_account("1105", 3, true).is_postable());
        assert!(!make_account("11", 2, true).is_postable());
        assert!(!make_account("110505", 4, false).is_postable());
    }

    #[test]
    fn test_code_range_contains() {
        let range = CodeRange::new("11", "139999");
        assert!(range.contains("11"));
        assert!(range.contains("110505"));
        assert!(range.contains("130505"));
        assert!(range.contains("139999"));
        assert!(!range.contains("14"));
        assert!(!range.contains("1050"));
    }

    #[test]
    fn test_full_name() {
        let account = make_account("110505", 4, true);
        assert_eq!(account.full_name(), "110505 - Test");
    }
}
