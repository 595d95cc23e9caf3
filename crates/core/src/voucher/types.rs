//! Voucher domain types for creation and validation.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use partida_shared::types::{CostCenterId, TenantId, ThirdPartyId};

/// Voucher type classification.
///
/// The type determines the numbering prefix and groups vouchers for the
/// journal report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VoucherType {
    /// Income voucher (sales, collections).
    Income,
    /// Expense voucher (purchases, payments, payroll).
    Expense,
    /// Accounting note (adjustments, credit/debit notes).
    Note,
    /// Opening balances voucher.
    Opening,
    /// Year-end closing voucher.
    Closing,
}

impl VoucherType {
    /// Returns the numbering prefix for this voucher type.
    #[must_use]
    pub const fn prefix(self) -> &'static str {
        match self {
            Self::Income => "ING",
            Self::Expense => "EGR",
            Self::Note => "NOT",
            Self::Opening => "APE",
            Self::Closing => "CIE",
        }
    }
}

/// Voucher status state machine.
///
/// `Draft` is the only mutable state; `Posted` entries are authoritative for
/// balances; `Void` is terminal and excluded from balances.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VoucherStatus {
    /// Voucher is being drafted and can be modified or deleted.
    Draft,
    /// Voucher has been posted to the ledger (immutable).
    Posted,
    /// Voucher has been voided (immutable, excluded from balances).
    Void,
}

impl VoucherStatus {
    /// Returns true if the voucher can be modified or deleted.
    #[must_use]
    pub fn is_editable(self) -> bool {
        matches!(self, Self::Draft)
    }

    /// Returns true if the voucher is immutable.
    #[must_use]
    pub fn is_immutable(self) -> bool {
        matches!(self, Self::Posted | Self::Void)
    }
}

/// Input for a single entry line.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntryInput {
    /// Code of the (level-4) account to post to.
    pub account_code: String,
    /// Optional third party (customer, supplier, employee).
    pub third_party_id: Option<ThirdPartyId>,
    /// Optional cost center.
    pub cost_center_id: Option<CostCenterId>,
    /// Optional line description.
    pub description: Option<String>,
    /// Debit amount (zero when the line is a credit).
    pub debit: Decimal,
    /// Credit amount (zero when the line is a debit).
    pub credit: Decimal,
    /// Optional withholding base.
    pub base_value: Option<Decimal>,
    /// Optional tax amount (VAT etc.).
    pub tax_value: Option<Decimal>,
}

impl EntryInput {
    /// Creates a debit line against an account.
    #[must_use]
    pub fn debit(account_code: impl Into<String>, amount: Decimal) -> Self {
        Self {
            account_code: account_code.into(),
            third_party_id: None,
            cost_center_id: None,
            description: None,
            debit: amount,
            credit: Decimal::ZERO,
            base_value: None,
            tax_value: None,
        }
    }

    /// Creates a credit line against an account.
    #[must_use]
    pub fn credit(account_code: impl Into<String>, amount: Decimal) -> Self {
        Self {
            account_code: account_code.into(),
            third_party_id: None,
            cost_center_id: None,
            description: None,
            debit: Decimal::ZERO,
            credit: amount,
            base_value: None,
            tax_value: None,
        }
    }

    /// Sets the line description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Input for creating a new voucher.
#[derive(Debug, Clone)]
pub struct CreateVoucherInput {
    /// The tenant this voucher belongs to.
    pub tenant_id: TenantId,
    /// The voucher type.
    pub voucher_type: VoucherType,
    /// The voucher date; fiscal year and period derive from it.
    pub date: NaiveDate,
    /// Free-text description.
    pub description: String,
    /// External reference (invoice number, receipt, ...).
    pub reference: Option<String>,
    /// The entry lines. Balance is NOT required at creation time.
    pub entries: Vec<EntryInput>,
}

/// Derived voucher totals.
///
/// These are cached on the voucher record but never authoritative: they are
/// recomputed from the entry lines at every mutation boundary.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct VoucherTotals {
    /// Sum of all debit amounts.
    pub total_debit: Decimal,
    /// Sum of all credit amounts.
    pub total_credit: Decimal,
    /// Whether debits equal credits.
    pub is_balanced: bool,
}

impl VoucherTotals {
    /// Creates totals from debit and credit sums.
    #[must_use]
    pub fn new(total_debit: Decimal, total_credit: Decimal) -> Self {
        Self {
            total_debit,
            total_credit,
            is_balanced: total_debit == total_credit,
        }
    }

    /// Returns the difference between debits and credits.
    #[must_use]
    pub fn difference(&self) -> Decimal {
        self.total_debit - self.total_credit
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal_macros::dec;

    #[rstest]
    #[case(VoucherType::Income, "ING")]
    #[case(VoucherType::Expense, "EGR")]
    #[case(VoucherType::Note, "NOT")]
    #[case(VoucherType::Opening, "APE")]
    #[case(VoucherType::Closing, "CIE")]
    fn test_voucher_type_prefix(#[case] voucher_type: VoucherType, #[case] prefix: &str) {
        assert_eq!(voucher_type.prefix(), prefix);
    }

    #[test]
    fn test_status_editable() {
        assert!(VoucherStatus::Draft.is_editable());
        assert!(!VoucherStatus::Posted.is_editable());
        assert!(!VoucherStatus::Void.is_editable());
    }

    #[test]
    fn test_status_immutable() {
        assert!(!VoucherStatus::Draft.is_immutable());
        assert!(VoucherStatus::Posted.is_immutable());
        assert!(VoucherStatus::Void.is_immutable());
    }

    #[test]
    fn test_totals_balanced() {
        let totals = VoucherTotals::new(dec!(119000), dec!(119000));
        assert!(totals.is_balanced);
        assert_eq!(totals.difference(), Decimal::ZERO);
    }

    #[test]
    fn test_totals_unbalanced() {
        let totals = VoucherTotals::new(dec!(119000), dec!(100000));
        assert!(!totals.is_balanced);
        assert_eq!(totals.difference(), dec!(19000));
    }

    #[test]
    fn test_entry_input_builders() {
        let debit = EntryInput::debit("130505", dec!(119000)).with_description("CxC cliente");
        assert_eq!(debit.debit, dec!(119000));
        assert_eq!(debit.credit, Decimal::ZERO);
        assert_eq!(debit.description.as_deref(), Some("CxC cliente"));

        let credit = EntryInput::credit("413501", dec!(100000));
        assert_eq!(credit.debit, Decimal::ZERO);
        assert_eq!(credit.credit, dec!(100000));
    }
}
