//! Database enum types, mirroring the PostgreSQL enums.
//!
//! Each enum converts to and from its `partida-core` counterpart; the core
//! crate stays free of database dependencies.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use partida_core::chart;
use partida_core::fiscal;
use partida_core::integration;
use partida_core::voucher;

/// Account classification (`account_type`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "account_type")]
#[serde(rename_all = "snake_case")]
pub enum AccountType {
    /// Assets.
    #[sea_orm(string_value = "asset")]
    Asset,
    /// Liabilities.
    #[sea_orm(string_value = "liability")]
    Liability,
    /// Equity.
    #[sea_orm(string_value = "equity")]
    Equity,
    /// Income.
    #[sea_orm(string_value = "income")]
    Income,
    /// Expenses.
    #[sea_orm(string_value = "expense")]
    Expense,
    /// Cost of sales.
    #[sea_orm(string_value = "cost")]
    Cost,
}

impl From<chart::AccountType> for AccountType {
    fn from(value: chart::AccountType) -> Self {
        match value {
            chart::AccountType::Asset => Self::Asset,
            chart::AccountType::Liability => Self::Liability,
            chart::AccountType::Equity => Self::Equity,
            chart::AccountType::Income => Self::Income,
            chart::AccountType::Expense => Self::Expense,
            chart::AccountType::Cost => Self::Cost,
        }
    }
}

impl From<AccountType> for chart::AccountType {
    fn from(value: AccountType) -> Self {
        match value {
            AccountType::Asset => Self::Asset,
            AccountType::Liability => Self::Liability,
            AccountType::Equity => Self::Equity,
            AccountType::Income => Self::Income,
            AccountType::Expense => Self::Expense,
            AccountType::Cost => Self::Cost,
        }
    }
}

/// Account nature (`account_nature`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "account_nature")]
#[serde(rename_all = "lowercase")]
pub enum AccountNature {
    /// Debit-normal.
    #[sea_orm(string_value = "debit")]
    Debit,
    /// Credit-normal.
    #[sea_orm(string_value = "credit")]
    Credit,
}

impl From<chart::AccountNature> for AccountNature {
    fn from(value: chart::AccountNature) -> Self {
        match value {
            chart::AccountNature::Debit => Self::Debit,
            chart::AccountNature::Credit => Self::Credit,
        }
    }
}

impl From<AccountNature> for chart::AccountNature {
    fn from(value: AccountNature) -> Self {
        match value {
            AccountNature::Debit => Self::Debit,
            AccountNature::Credit => Self::Credit,
        }
    }
}

/// Voucher type (`voucher_type`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "voucher_type")]
#[serde(rename_all = "snake_case")]
pub enum VoucherType {
    /// Income voucher.
    #[sea_orm(string_value = "income")]
    Income,
    /// Expense voucher.
    #[sea_orm(string_value = "expense")]
    Expense,
    /// Accounting note.
    #[sea_orm(string_value = "note")]
    Note,
    /// Opening balances.
    #[sea_orm(string_value = "opening")]
    Opening,
    /// Year-end closing.
    #[sea_orm(string_value = "closing")]
    Closing,
}

impl From<voucher::VoucherType> for VoucherType {
    fn from(value: voucher::VoucherType) -> Self {
        match value {
            voucher::VoucherType::Income => Self::Income,
            voucher::VoucherType::Expense => Self::Expense,
            voucher::VoucherType::Note => Self::Note,
            voucher::VoucherType::Opening => Self::Opening,
            voucher::VoucherType::Closing => Self::Closing,
        }
    }
}

impl From<VoucherType> for voucher::VoucherType {
    fn from(value: VoucherType) -> Self {
        match value {
            VoucherType::Income => Self::Income,
            VoucherType::Expense => Self::Expense,
            VoucherType::Note => Self::Note,
            VoucherType::Opening => Self::Opening,
            VoucherType::Closing => Self::Closing,
        }
    }
}

/// Voucher status (`voucher_status`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "voucher_status")]
#[serde(rename_all = "lowercase")]
pub enum VoucherStatus {
    /// Draft, mutable.
    #[sea_orm(string_value = "draft")]
    Draft,
    /// Posted, authoritative for balances.
    #[sea_orm(string_value = "posted")]
    Posted,
    /// Voided, excluded from balances.
    #[sea_orm(string_value = "void")]
    Void,
}

impl From<voucher::VoucherStatus> for VoucherStatus {
    fn from(value: voucher::VoucherStatus) -> Self {
        match value {
            voucher::VoucherStatus::Draft => Self::Draft,
            voucher::VoucherStatus::Posted => Self::Posted,
            voucher::VoucherStatus::Void => Self::Void,
        }
    }
}

impl From<VoucherStatus> for voucher::VoucherStatus {
    fn from(value: VoucherStatus) -> Self {
        match value {
            VoucherStatus::Draft => Self::Draft,
            VoucherStatus::Posted => Self::Posted,
            VoucherStatus::Void => Self::Void,
        }
    }
}

/// Fiscal period status (`period_status`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "period_status")]
#[serde(rename_all = "lowercase")]
pub enum PeriodStatus {
    /// Open for posting.
    #[sea_orm(string_value = "open")]
    Open,
    /// Closed; can be reopened.
    #[sea_orm(string_value = "closed")]
    Closed,
    /// Definitively closed.
    #[sea_orm(string_value = "locked")]
    Locked,
}

impl From<fiscal::PeriodStatus> for PeriodStatus {
    fn from(value: fiscal::PeriodStatus) -> Self {
        match value {
            fiscal::PeriodStatus::Open => Self::Open,
            fiscal::PeriodStatus::Closed => Self::Closed,
            fiscal::PeriodStatus::Locked => Self::Locked,
        }
    }
}

impl From<PeriodStatus> for fiscal::PeriodStatus {
    fn from(value: PeriodStatus) -> Self {
        match value {
            PeriodStatus::Open => Self::Open,
            PeriodStatus::Closed => Self::Closed,
            PeriodStatus::Locked => Self::Locked,
        }
    }
}

/// Source document kind (`document_kind`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "document_kind")]
#[serde(rename_all = "snake_case")]
pub enum DocumentKind {
    /// Sales invoice.
    #[sea_orm(string_value = "invoice")]
    Invoice,
    /// Support document.
    #[sea_orm(string_value = "support_document")]
    SupportDocument,
    /// Payroll receipt.
    #[sea_orm(string_value = "payroll_receipt")]
    PayrollReceipt,
    /// Credit note.
    #[sea_orm(string_value = "credit_note")]
    CreditNote,
    /// Debit note.
    #[sea_orm(string_value = "debit_note")]
    DebitNote,
}

impl From<integration::DocumentKind> for DocumentKind {
    fn from(value: integration::DocumentKind) -> Self {
        match value {
            integration::DocumentKind::Invoice => Self::Invoice,
            integration::DocumentKind::SupportDocument => Self::SupportDocument,
            integration::DocumentKind::PayrollReceipt => Self::PayrollReceipt,
            integration::DocumentKind::CreditNote => Self::CreditNote,
            integration::DocumentKind::DebitNote => Self::DebitNote,
        }
    }
}

impl From<DocumentKind> for integration::DocumentKind {
    fn from(value: DocumentKind) -> Self {
        match value {
            DocumentKind::Invoice => Self::Invoice,
            DocumentKind::SupportDocument => Self::SupportDocument,
            DocumentKind::PayrollReceipt => Self::PayrollReceipt,
            DocumentKind::CreditNote => Self::CreditNote,
            DocumentKind::DebitNote => Self::DebitNote,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enum_roundtrips() {
        assert_eq!(
            chart::AccountType::from(AccountType::from(chart::AccountType::Cost)),
            chart::AccountType::Cost
        );
        assert_eq!(
            voucher::VoucherStatus::from(VoucherStatus::from(voucher::VoucherStatus::Void)),
            voucher::VoucherStatus::Void
        );
        assert_eq!(
            fiscal::PeriodStatus::from(PeriodStatus::from(fiscal::PeriodStatus::Locked)),
            fiscal::PeriodStatus::Locked
        );
        assert_eq!(
            integration::DocumentKind::from(DocumentKind::from(
                integration::DocumentKind::CreditNote
            )),
            integration::DocumentKind::CreditNote
        );
    }
}
