//! Source document types.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use partida_shared::types::TenantId;

use crate::voucher::VoucherType;

/// The kinds of source documents that generate accounting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentKind {
    /// Sales invoice.
    Invoice,
    /// Support document (purchase from a non-invoicing supplier).
    SupportDocument,
    /// Payroll receipt.
    PayrollReceipt,
    /// Credit note (reverses an invoice).
    CreditNote,
    /// Debit note (increases a receivable).
    DebitNote,
}

impl DocumentKind {
    /// Returns the voucher type generated for this document kind.
    #[must_use]
    pub const fn voucher_type(self) -> VoucherType {
        match self {
            Self::Invoice => VoucherType::Income,
            Self::SupportDocument | Self::PayrollReceipt => VoucherType::Expense,
            Self::CreditNote | Self::DebitNote => VoucherType::Note,
        }
    }
}

/// Monetary totals of a source document.
///
/// Commercial documents carry subtotal/tax/total; payroll receipts carry
/// gross/deductions/net. The builder rejects a kind/totals mismatch.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "shape")]
pub enum DocumentTotals {
    /// Invoice-shaped totals: `total = subtotal + tax`.
    Commercial {
        /// Net amount before tax.
        subtotal: Decimal,
        /// Tax amount (VAT).
        tax: Decimal,
        /// Grand total.
        total: Decimal,
    },
    /// Payroll-shaped totals: `net = gross - deductions`.
    Payroll {
        /// Total perceptions (gross pay).
        gross: Decimal,
        /// Total deductions withheld.
        deductions: Decimal,
        /// Net pay.
        net: Decimal,
    },
}

/// A normalized source document handed to the integration adapter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceDocument {
    /// Tenant the document belongs to.
    pub tenant_id: TenantId,
    /// Document kind.
    pub kind: DocumentKind,
    /// The document's own number ("FV-2026-001", "NOM-0042", ...). Together
    /// with tenant and kind, this is the idempotency key.
    pub reference: String,
    /// Document date; becomes the voucher date.
    pub date: NaiveDate,
    /// Description for the generated voucher.
    pub description: String,
    /// Monetary totals.
    pub totals: DocumentTotals,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_kind_voucher_type() {
        assert_eq!(DocumentKind::Invoice.voucher_type(), VoucherType::Income);
        assert_eq!(DocumentKind::SupportDocument.voucher_type(), VoucherType::Expense);
        assert_eq!(DocumentKind::PayrollReceipt.voucher_type(), VoucherType::Expense);
        assert_eq!(DocumentKind::CreditNote.voucher_type(), VoucherType::Note);
        assert_eq!(DocumentKind::DebitNote.voucher_type(), VoucherType::Note);
    }
}
