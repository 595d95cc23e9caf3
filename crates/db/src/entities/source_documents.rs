//! `SeaORM` Entity for the source_documents table.
//!
//! The integration adapter's idempotency record: one row per
//! (tenant_id, kind, reference). The accounting_generated flag and the
//! voucher link are flipped in the same transaction that creates and posts
//! the voucher.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::sea_orm_active_enums::DocumentKind;

/// A source document link.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "source_documents")]
pub struct Model {
    /// Primary key.
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    /// Owning tenant.
    pub tenant_id: Uuid,
    /// Document kind.
    pub kind: DocumentKind,
    /// The document's own number; unique with tenant and kind.
    pub reference: String,
    /// The generated voucher, once accounting exists.
    pub voucher_id: Option<Uuid>,
    /// Whether accounting has been generated.
    pub accounting_generated: bool,
    /// Creation timestamp.
    pub created_at: DateTimeWithTimeZone,
    /// Last update timestamp.
    pub updated_at: DateTimeWithTimeZone,
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
