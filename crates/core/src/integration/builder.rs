//! Entry-set builders per document kind.
//!
//! Each builder translates a document's totals into balanced voucher lines
//! using the tenant's posting rules. Zero components (e.g. a tax-free
//! invoice) are skipped rather than posted as zero lines. The builders do
//! NOT validate that totals add up; inconsistent caller totals surface as an
//! unbalanced voucher when the adapter tries to post, and the whole request
//! fails - a caller bug, not a ledger bug.

use rust_decimal::Decimal;

use super::error::IntegrationError;
use super::rules::{PostingEvent, PostingRules};
use super::types::{DocumentKind, DocumentTotals, SourceDocument};
use crate::voucher::{CreateVoucherInput, EntryInput};

/// Builds the voucher creation input for a source document.
///
/// # Errors
///
/// Returns `TotalsMismatch` when the totals shape does not fit the document
/// kind, or `MissingRule` when the tenant's rules lack a required account.
pub fn build_voucher_input(
    document: &SourceDocument,
    rules: &PostingRules,
) -> Result<CreateVoucherInput, IntegrationError> {
    let entries = build_entries(document, rules)?;

    Ok(CreateVoucherInput {
        tenant_id: document.tenant_id,
        voucher_type: document.kind.voucher_type(),
        date: document.date,
        description: document.description.clone(),
        reference: Some(document.reference.clone()),
        entries,
    })
}

fn build_entries(
    document: &SourceDocument,
    rules: &PostingRules,
) -> Result<Vec<EntryInput>, IntegrationError> {
    match (document.kind, document.totals) {
        (DocumentKind::Invoice, DocumentTotals::Commercial { subtotal, tax, total }) => {
            invoice_entries(&document.reference, rules, subtotal, tax, total)
        }
        (DocumentKind::DebitNote, DocumentTotals::Commercial { subtotal, tax, total }) => {
            // A debit note increases the receivable; same shape as an invoice.
            invoice_entries(&document.reference, rules, subtotal, tax, total)
        }
        (DocumentKind::CreditNote, DocumentTotals::Commercial { subtotal, tax, total }) => {
            credit_note_entries(&document.reference, rules, subtotal, tax, total)
        }
        (DocumentKind::SupportDocument, DocumentTotals::Commercial { subtotal, tax: _, total }) => {
            support_document_entries(&document.reference, rules, subtotal, total)
        }
        (DocumentKind::PayrollReceipt, DocumentTotals::Payroll { gross, deductions, net }) => {
            payroll_entries(&document.reference, rules, gross, deductions, net)
        }
        (kind, _) => Err(IntegrationError::TotalsMismatch { kind }),
    }
}

/// Invoice: debit receivable for the total, credit revenue for the
/// subtotal, credit VAT for the tax.
fn invoice_entries(
    reference: &str,
    rules: &PostingRules,
    subtotal: Decimal,
    tax: Decimal,
    total: Decimal,
) -> Result<Vec<EntryInput>, IntegrationError> {
    let mut entries = vec![
        EntryInput::debit(rules.account_for(PostingEvent::AccountsReceivable)?, total)
            .with_description(format!("CxC cliente {reference}")),
        EntryInput::credit(rules.account_for(PostingEvent::SalesRevenue)?, subtotal)
            .with_description("Ingreso venta"),
    ];
    if tax > Decimal::ZERO {
        entries.push(
            EntryInput::credit(rules.account_for(PostingEvent::VatPayable)?, tax)
                .with_description("IVA generado"),
        );
    }
    Ok(entries)
}

/// Credit note: the mirror of the invoice - revenue and VAT debited back,
/// receivable credited.
fn credit_note_entries(
    reference: &str,
    rules: &PostingRules,
    subtotal: Decimal,
    tax: Decimal,
    total: Decimal,
) -> Result<Vec<EntryInput>, IntegrationError> {
    let mut entries = vec![
        EntryInput::debit(rules.account_for(PostingEvent::SalesRevenue)?, subtotal)
            .with_description(format!("Devolución venta {reference}")),
    ];
    if tax > Decimal::ZERO {
        entries.push(
            EntryInput::debit(rules.account_for(PostingEvent::VatPayable)?, tax)
                .with_description("Devolución IVA"),
        );
    }
    entries.push(
        EntryInput::credit(rules.account_for(PostingEvent::AccountsReceivable)?, total)
            .with_description(format!("Nota crédito cliente {reference}")),
    );
    Ok(entries)
}

/// Support document: expense debited for the subtotal, supplier payable
/// credited for the total.
fn support_document_entries(
    reference: &str,
    rules: &PostingRules,
    subtotal: Decimal,
    total: Decimal,
) -> Result<Vec<EntryInput>, IntegrationError> {
    Ok(vec![
        EntryInput::debit(rules.account_for(PostingEvent::ServiceExpense)?, subtotal)
            .with_description(format!("Gasto doc soporte {reference}")),
        EntryInput::credit(rules.account_for(PostingEvent::SuppliersPayable)?, total)
            .with_description("CxP proveedor"),
    ])
}

/// Payroll: gross expense debited, net pay and withholdings credited.
fn payroll_entries(
    reference: &str,
    rules: &PostingRules,
    gross: Decimal,
    deductions: Decimal,
    net: Decimal,
) -> Result<Vec<EntryInput>, IntegrationError> {
    let mut entries = vec![
        EntryInput::debit(rules.account_for(PostingEvent::PayrollExpense)?, gross)
            .with_description(format!("Gasto nómina {reference}")),
        EntryInput::credit(rules.account_for(PostingEvent::SalariesPayable)?, net)
            .with_description("Neto a pagar"),
    ];
    if deductions > Decimal::ZERO {
        entries.push(
            EntryInput::credit(rules.account_for(PostingEvent::PayrollWithholdings)?, deductions)
                .with_description("Deducciones nómina"),
        );
    }
    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;
    use partida_shared::types::TenantId;

    use crate::voucher::{VoucherService, VoucherType};

    fn document(kind: DocumentKind, totals: DocumentTotals) -> SourceDocument {
        SourceDocument {
            tenant_id: TenantId::new(),
            kind,
            reference: "FV-2026-001".to_string(),
            date: NaiveDate::from_ymd_opt(2026, 5, 10).unwrap(),
            description: "Factura venta FV-2026-001".to_string(),
            totals,
        }
    }

    fn commercial(subtotal: Decimal, tax: Decimal, total: Decimal) -> DocumentTotals {
        DocumentTotals::Commercial { subtotal, tax, total }
    }

    #[test]
    fn test_invoice_entries() {
        let doc = document(DocumentKind::Invoice, commercial(dec!(100000), dec!(19000), dec!(119000)));
        let input = build_voucher_input(&doc, &PostingRules::colombian_demo()).unwrap();

        assert_eq!(input.voucher_type, VoucherType::Income);
        assert_eq!(input.reference.as_deref(), Some("FV-2026-001"));
        assert_eq!(input.entries.len(), 3);
        assert_eq!(input.entries[0].account_code, "130505");
        assert_eq!(input.entries[0].debit, dec!(119000));
        assert_eq!(input.entries[1].account_code, "413501");
        assert_eq!(input.entries[1].credit, dec!(100000));
        assert_eq!(input.entries[2].account_code, "240801");
        assert_eq!(input.entries[2].credit, dec!(19000));

        let totals = VoucherService::calculate_totals(&input.entries);
        assert!(totals.is_balanced);
    }

    #[test]
    fn test_invoice_without_tax_skips_vat_line() {
        let doc = document(DocumentKind::Invoice, commercial(dec!(100000), dec!(0), dec!(100000)));
        let input = build_voucher_input(&doc, &PostingRules::colombian_demo()).unwrap();
        assert_eq!(input.entries.len(), 2);
        assert!(VoucherService::calculate_totals(&input.entries).is_balanced);
    }

    #[test]
    fn test_credit_note_mirrors_invoice() {
        let doc = document(DocumentKind::CreditNote, commercial(dec!(20000), dec!(3800), dec!(23800)));
        let input = build_voucher_input(&doc, &PostingRules::colombian_demo()).unwrap();

        assert_eq!(input.voucher_type, VoucherType::Note);
        assert_eq!(input.entries[0].account_code, "413501");
        assert_eq!(input.entries[0].debit, dec!(20000));
        assert_eq!(input.entries[1].account_code, "240801");
        assert_eq!(input.entries[1].debit, dec!(3800));
        assert_eq!(input.entries[2].account_code, "130505");
        assert_eq!(input.entries[2].credit, dec!(23800));
        assert!(VoucherService::calculate_totals(&input.entries).is_balanced);
    }

    #[test]
    fn test_support_document_entries() {
        // Subtotal != total here (withholding difference): the builder does
        // not paper over it, the voucher simply will not balance.
        let doc = document(
            DocumentKind::SupportDocument,
            commercial(dec!(50000), dec!(0), dec!(50000)),
        );
        let input = build_voucher_input(&doc, &PostingRules::colombian_demo()).unwrap();

        assert_eq!(input.voucher_type, VoucherType::Expense);
        assert_eq!(input.entries[0].account_code, "513501");
        assert_eq!(input.entries[1].account_code, "220505");
        assert!(VoucherService::calculate_totals(&input.entries).is_balanced);
    }

    #[test]
    fn test_payroll_entries() {
        let doc = document(
            DocumentKind::PayrollReceipt,
            DocumentTotals::Payroll {
                gross: dec!(3000000),
                deductions: dec!(240000),
                net: dec!(2760000),
            },
        );
        let input = build_voucher_input(&doc, &PostingRules::colombian_demo()).unwrap();

        assert_eq!(input.voucher_type, VoucherType::Expense);
        assert_eq!(input.entries[0].account_code, "510501");
        assert_eq!(input.entries[0].debit, dec!(3000000));
        assert_eq!(input.entries[1].account_code, "250501");
        assert_eq!(input.entries[1].credit, dec!(2760000));
        assert_eq!(input.entries[2].account_code, "237005");
        assert_eq!(input.entries[2].credit, dec!(240000));
        assert!(VoucherService::calculate_totals(&input.entries).is_balanced);
    }

    #[test]
    fn test_payroll_totals_on_invoice_rejected() {
        let doc = document(
            DocumentKind::Invoice,
            DocumentTotals::Payroll {
                gross: dec!(1),
                deductions: dec!(0),
                net: dec!(1),
            },
        );
        assert!(matches!(
            build_voucher_input(&doc, &PostingRules::colombian_demo()),
            Err(IntegrationError::TotalsMismatch { kind: DocumentKind::Invoice })
        ));
    }

    #[test]
    fn test_inconsistent_totals_produce_unbalanced_entries() {
        // Caller bug: total does not equal subtotal + tax. The entries come
        // back unbalanced and the post step will reject the voucher.
        let doc = document(DocumentKind::Invoice, commercial(dec!(100000), dec!(19000), dec!(120000)));
        let input = build_voucher_input(&doc, &PostingRules::colombian_demo()).unwrap();
        assert!(!VoucherService::calculate_totals(&input.entries).is_balanced);
    }
}
