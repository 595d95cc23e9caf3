//! `SeaORM` Entity for the vouchers table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::sea_orm_active_enums::{VoucherStatus, VoucherType};

/// A voucher header. The (tenant_id, voucher_type, voucher_number) triple
/// is unique.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "vouchers")]
pub struct Model {
    /// Primary key (UUID v7; byte order is insertion order).
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    /// Owning tenant.
    pub tenant_id: Uuid,
    /// Voucher type.
    pub voucher_type: VoucherType,
    /// Sequential number, e.g. "ING-0042".
    pub voucher_number: String,
    /// Voucher date.
    pub date: Date,
    /// Description.
    pub description: String,
    /// External reference.
    pub reference: Option<String>,
    /// Status.
    pub status: VoucherStatus,
    /// Fiscal year derived from the date.
    pub fiscal_year: i32,
    /// Fiscal period (month) derived from the date.
    pub fiscal_period: i32,
    /// Cached debit total.
    pub total_debit: Decimal,
    /// Cached credit total.
    pub total_credit: Decimal,
    /// Creation timestamp.
    pub created_at: DateTimeWithTimeZone,
    /// Posting timestamp.
    pub posted_at: Option<DateTimeWithTimeZone>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::voucher_entries::Entity")]
    VoucherEntries,
}

impl Related<super::voucher_entries::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::VoucherEntries.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
