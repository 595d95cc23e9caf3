//! `SeaORM` Entity for the voucher_entries table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// One posting line. Lines are owned by their voucher and deleted with it.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "voucher_entries")]
pub struct Model {
    /// Primary key.
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    /// Owning voucher.
    pub voucher_id: Uuid,
    /// 1-based display order within the voucher.
    pub line_number: i32,
    /// Account code posted to.
    pub account_code: String,
    /// Optional third party.
    pub third_party_id: Option<Uuid>,
    /// Optional cost center.
    pub cost_center_id: Option<Uuid>,
    /// Line description.
    pub description: Option<String>,
    /// Debit amount.
    pub debit_amount: Decimal,
    /// Credit amount.
    pub credit_amount: Decimal,
    /// Withholding base.
    pub base_value: Option<Decimal>,
    /// Tax amount.
    pub tax_value: Option<Decimal>,
    /// Creation timestamp.
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::vouchers::Entity",
        from = "Column::VoucherId",
        to = "super::vouchers::Column::Id"
    )]
    Vouchers,
}

impl Related<super::vouchers::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Vouchers.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
