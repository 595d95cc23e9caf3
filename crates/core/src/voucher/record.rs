//! Voucher aggregate.

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use partida_shared::types::{TenantId, VoucherId};

use super::entry::Entry;
use super::types::{VoucherStatus, VoucherType};

/// A transaction header grouping one or more posting lines.
///
/// The voucher owns its entries: entries cannot outlive it, and deleting a
/// draft deletes them. Status transitions are performed by
/// [`super::VoucherService`]; the record itself is a plain value.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Voucher {
    /// Unique identifier.
    pub id: VoucherId,
    /// Tenant this voucher belongs to.
    pub tenant_id: TenantId,
    /// Voucher type.
    pub voucher_type: VoucherType,
    /// Sequential number per (tenant, type), e.g. "ING-0042".
    pub voucher_number: String,
    /// Voucher date.
    pub date: NaiveDate,
    /// Free-text description.
    pub description: String,
    /// External reference (invoice number, receipt, ...).
    pub reference: Option<String>,
    /// Current status.
    pub status: VoucherStatus,
    /// Fiscal year, derived from the date.
    pub fiscal_year: i32,
    /// Fiscal period (month 1-12), derived from the date.
    pub fiscal_period: u32,
    /// Cached sum of debit lines; recomputed at every mutation.
    pub total_debit: Decimal,
    /// Cached sum of credit lines; recomputed at every mutation.
    pub total_credit: Decimal,
    /// When the voucher was created.
    pub created_at: DateTime<Utc>,
    /// When the voucher was posted, if it was.
    pub posted_at: Option<DateTime<Utc>>,
    /// Entry lines, in line-number order.
    #[serde(default)]
    pub entries: Vec<Entry>,
}

impl Voucher {
    /// Returns true if debits equal credits.
    #[must_use]
    pub fn is_balanced(&self) -> bool {
        self.total_debit == self.total_credit
    }

    /// Derives the (fiscal year, fiscal period) pair from a voucher date.
    #[must_use]
    pub fn fiscal_period_of(date: NaiveDate) -> (i32, u32) {
        (date.year(), date.month())
    }
}
