//! `SeaORM` Entity for the voucher_sequences table.
//!
//! One row per (tenant, voucher type); the atomic counter behind voucher
//! numbering. Updated with an upsert inside the voucher insert's
//! transaction, so two concurrent creates can never observe the same value.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::sea_orm_active_enums::VoucherType;

/// A numbering sequence row.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "voucher_sequences")]
pub struct Model {
    /// Owning tenant.
    #[sea_orm(primary_key, auto_increment = false)]
    pub tenant_id: Uuid,
    /// Voucher type the sequence numbers.
    #[sea_orm(primary_key, auto_increment = false)]
    pub voucher_type: VoucherType,
    /// Last issued sequence value; the first voucher gets 1.
    pub last_number: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
