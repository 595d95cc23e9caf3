//! `SeaORM` Entity for the chart_of_accounts table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::sea_orm_active_enums::{AccountNature, AccountType};

/// A chart of accounts row, unique per (tenant_id, code).
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "chart_of_accounts")]
pub struct Model {
    /// Primary key.
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    /// Owning tenant.
    pub tenant_id: Uuid,
    /// Hierarchical account code.
    pub code: String,
    /// Account name.
    pub name: String,
    /// Classification.
    pub account_type: AccountType,
    /// Debit- or credit-normal.
    pub nature: AccountNature,
    /// Hierarchy level (1-4).
    pub level: i16,
    /// Parent account code.
    pub parent_code: Option<String>,
    /// Postings must carry a third party.
    pub requires_third_party: bool,
    /// Postings must carry a cost center.
    pub requires_cost_center: bool,
    /// Active flag.
    pub is_active: bool,
    /// System accounts cannot be modified.
    pub is_system: bool,
    /// Creation timestamp.
    pub created_at: DateTimeWithTimeZone,
    /// Last update timestamp.
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
