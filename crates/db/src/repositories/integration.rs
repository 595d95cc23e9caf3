//! Integration adapter: voucher generation for external source documents.
//!
//! The at-most-once guarantee lives here. The idempotency check, the
//! create+post, and the flag update all run in ONE database transaction:
//! - a replay finds the locked link row with `accounting_generated` set and
//!   returns the existing voucher id without touching the ledger;
//! - a failed post rolls back the whole transaction, so no orphaned DRAFT
//!   and no half-set flag survive;
//! - two concurrent first calls race on the (tenant, kind, reference)
//!   uniqueness constraint, and the loser's transaction rolls back.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
    QuerySelect, Set, TransactionTrait,
};
use tracing::info;
use partida_core::integration::{IntegrationError, PostingRules, SourceDocument, build_voucher_input};
use partida_shared::types::{SourceDocumentId, VoucherId};

use crate::entities::{sea_orm_active_enums, source_documents};
use crate::repositories::voucher::{VoucherRepoError, VoucherRepository};

/// Error type for integration requests.
#[derive(Debug, thiserror::Error)]
pub enum IntegrationRepoError {
    /// Building the entry set failed.
    #[error(transparent)]
    Integration(#[from] IntegrationError),

    /// The voucher could not be created or posted; propagated to the
    /// calling module, whose own transaction must not commit.
    #[error(transparent)]
    Voucher(#[from] VoucherRepoError),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Result of a voucher request.
#[derive(Debug, Clone, Copy)]
pub struct RequestVoucherOutcome {
    /// The voucher linked to the source document.
    pub voucher_id: VoucherId,
    /// False when the call was an idempotent replay.
    pub created: bool,
}

/// Integration repository.
#[derive(Debug, Clone)]
pub struct IntegrationRepository {
    db: DatabaseConnection,
}

impl IntegrationRepository {
    /// Creates a new integration repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Requests accounting for a source document: create-then-post as one
    /// logical operation, at most once per (tenant, kind, reference).
    ///
    /// # Errors
    ///
    /// Unbalanced postings (a caller bug) surface as
    /// `Voucher(Unbalanced)`; nothing is persisted in that case.
    pub async fn request_voucher(
        &self,
        document: &SourceDocument,
        rules: &PostingRules,
    ) -> Result<RequestVoucherOutcome, IntegrationRepoError> {
        let txn = self.db.begin().await?;

        let kind = sea_orm_active_enums::DocumentKind::from(document.kind);
        let existing = source_documents::Entity::find()
            .filter(source_documents::Column::TenantId.eq(document.tenant_id.into_inner()))
            .filter(source_documents::Column::Kind.eq(kind))
            .filter(source_documents::Column::Reference.eq(document.reference.clone()))
            .lock_exclusive()
            .one(&txn)
            .await?;

        if let Some(link) = &existing {
            if link.accounting_generated {
                if let Some(voucher_id) = link.voucher_id {
                    txn.commit().await?;
                    info!(
                        document = %document.reference,
                        voucher = %voucher_id,
                        "Accounting already generated, returning existing voucher"
                    );
                    return Ok(RequestVoucherOutcome {
                        voucher_id: VoucherId::from_uuid(voucher_id),
                        created: false,
                    });
                }
            }
        }

        let input = build_voucher_input(document, rules)?;
        let draft = VoucherRepository::insert_draft_tx(&txn, &input).await?;
        let posted = VoucherRepository::post_tx(&txn, VoucherId::from_uuid(draft.id)).await?;

        let now = Utc::now();
        match existing {
            Some(link) => {
                let mut active: source_documents::ActiveModel = link.into();
                active.voucher_id = Set(Some(posted.id));
                active.accounting_generated = Set(true);
                active.updated_at = Set(now.into());
                active.update(&txn).await?;
            }
            None => {
                let link = source_documents::ActiveModel {
                    id: Set(SourceDocumentId::new().into_inner()),
                    tenant_id: Set(document.tenant_id.into_inner()),
                    kind: Set(kind),
                    reference: Set(document.reference.clone()),
                    voucher_id: Set(Some(posted.id)),
                    accounting_generated: Set(true),
                    created_at: Set(now.into()),
                    updated_at: Set(now.into()),
                };
                link.insert(&txn).await?;
            }
        }

        txn.commit().await?;
        info!(
            document = %document.reference,
            voucher = %posted.voucher_number,
            "Accounting generated for source document"
        );
        Ok(RequestVoucherOutcome {
            voucher_id: VoucherId::from_uuid(posted.id),
            created: true,
        })
    }
}
