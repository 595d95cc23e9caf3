//! `SeaORM` entity definitions.

pub mod chart_of_accounts;
pub mod fiscal_periods;
pub mod sea_orm_active_enums;
pub mod source_documents;
pub mod voucher_entries;
pub mod voucher_sequences;
pub mod vouchers;
