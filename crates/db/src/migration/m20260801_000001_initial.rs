//! Initial database migration.
//!
//! Creates the enums, tables and indexes for the ledger engine.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();

        // ============================================================
        // PART 1: ENUMS
        // ============================================================
        db.execute_unprepared(ENUMS_SQL).await?;

        // ============================================================
        // PART 2: CHART OF ACCOUNTS
        // ============================================================
        db.execute_unprepared(CHART_OF_ACCOUNTS_SQL).await?;

        // ============================================================
        // PART 3: FISCAL PERIODS
        // ============================================================
        db.execute_unprepared(FISCAL_PERIODS_SQL).await?;

        // ============================================================
        // PART 4: VOUCHERS & ENTRIES
        // ============================================================
        db.execute_unprepared(VOUCHERS_SQL).await?;
        db.execute_unprepared(VOUCHER_ENTRIES_SQL).await?;
        db.execute_unprepared(VOUCHER_SEQUENCES_SQL).await?;

        // ============================================================
        // PART 5: INTEGRATION LINKS
        // ============================================================
        db.execute_unprepared(SOURCE_DOCUMENTS_SQL).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(DROP_ALL_SQL).await?;
        Ok(())
    }
}

// ============================================================
// SQL CONSTANTS
// ============================================================

const ENUMS_SQL: &str = r"
-- Account classification
CREATE TYPE account_type AS ENUM (
    'asset',
    'liability',
    'equity',
    'income',
    'expense',
    'cost'
);

-- Account nature
CREATE TYPE account_nature AS ENUM ('debit', 'credit');

-- Voucher types
CREATE TYPE voucher_type AS ENUM (
    'income',
    'expense',
    'note',
    'opening',
    'closing'
);

-- Voucher lifecycle
CREATE TYPE voucher_status AS ENUM ('draft', 'posted', 'void');

-- Fiscal period status
CREATE TYPE period_status AS ENUM ('open', 'closed', 'locked');

-- Integration source document kinds
CREATE TYPE document_kind AS ENUM (
    'invoice',
    'support_document',
    'payroll_receipt',
    'credit_note',
    'debit_note'
);
";

const CHART_OF_ACCOUNTS_SQL: &str = r"
CREATE TABLE chart_of_accounts (
    id UUID PRIMARY KEY,
    tenant_id UUID NOT NULL,
    code VARCHAR(10) NOT NULL,
    name VARCHAR(255) NOT NULL,
    account_type account_type NOT NULL,
    nature account_nature NOT NULL,
    level SMALLINT NOT NULL CHECK (level BETWEEN 1 AND 4),
    parent_code VARCHAR(10),
    requires_third_party BOOLEAN NOT NULL DEFAULT FALSE,
    requires_cost_center BOOLEAN NOT NULL DEFAULT FALSE,
    is_active BOOLEAN NOT NULL DEFAULT TRUE,
    is_system BOOLEAN NOT NULL DEFAULT FALSE,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),

    CONSTRAINT uq_accounts_tenant_code UNIQUE (tenant_id, code)
);

CREATE INDEX idx_accounts_tenant_type ON chart_of_accounts (tenant_id, account_type);
CREATE INDEX idx_accounts_tenant_level ON chart_of_accounts (tenant_id, level) WHERE is_active;
";

const FISCAL_PERIODS_SQL: &str = r"
CREATE TABLE fiscal_periods (
    id UUID PRIMARY KEY,
    tenant_id UUID NOT NULL,
    year INTEGER NOT NULL,
    month INTEGER NOT NULL CHECK (month BETWEEN 1 AND 12),
    status period_status NOT NULL DEFAULT 'open',
    closed_at TIMESTAMPTZ,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),

    CONSTRAINT uq_periods_tenant_year_month UNIQUE (tenant_id, year, month)
);
";

const VOUCHERS_SQL: &str = r"
CREATE TABLE vouchers (
    id UUID PRIMARY KEY,
    tenant_id UUID NOT NULL,
    voucher_type voucher_type NOT NULL,
    voucher_number VARCHAR(20) NOT NULL,
    date DATE NOT NULL,
    description TEXT NOT NULL,
    reference VARCHAR(100),
    status voucher_status NOT NULL DEFAULT 'draft',
    fiscal_year INTEGER NOT NULL,
    fiscal_period INTEGER NOT NULL,
    total_debit NUMERIC(15, 2) NOT NULL DEFAULT 0,
    total_credit NUMERIC(15, 2) NOT NULL DEFAULT 0,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    posted_at TIMESTAMPTZ,

    CONSTRAINT uq_vouchers_tenant_type_number UNIQUE (tenant_id, voucher_type, voucher_number)
);

CREATE INDEX idx_vouchers_tenant_date ON vouchers (tenant_id, date);
CREATE INDEX idx_vouchers_tenant_status ON vouchers (tenant_id, status);
";

const VOUCHER_ENTRIES_SQL: &str = r"
CREATE TABLE voucher_entries (
    id UUID PRIMARY KEY,
    voucher_id UUID NOT NULL REFERENCES vouchers (id) ON DELETE CASCADE,
    line_number INTEGER NOT NULL,
    account_code VARCHAR(10) NOT NULL,
    third_party_id UUID,
    cost_center_id UUID,
    description VARCHAR(255),
    debit_amount NUMERIC(15, 2) NOT NULL DEFAULT 0,
    credit_amount NUMERIC(15, 2) NOT NULL DEFAULT 0,
    base_value NUMERIC(15, 2),
    tax_value NUMERIC(15, 2),
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),

    -- Amounts are non-negative and exactly one side is set
    CONSTRAINT ck_entries_amounts_non_negative
        CHECK (debit_amount >= 0 AND credit_amount >= 0),
    CONSTRAINT ck_entries_single_side
        CHECK ((debit_amount > 0) <> (credit_amount > 0))
);

CREATE INDEX idx_entries_voucher ON voucher_entries (voucher_id, line_number);
CREATE INDEX idx_entries_account ON voucher_entries (account_code);
";

const VOUCHER_SEQUENCES_SQL: &str = r"
CREATE TABLE voucher_sequences (
    tenant_id UUID NOT NULL,
    voucher_type voucher_type NOT NULL,
    last_number BIGINT NOT NULL DEFAULT 0,

    PRIMARY KEY (tenant_id, voucher_type)
);
";

const SOURCE_DOCUMENTS_SQL: &str = r"
CREATE TABLE source_documents (
    id UUID PRIMARY KEY,
    tenant_id UUID NOT NULL,
    kind document_kind NOT NULL,
    reference VARCHAR(100) NOT NULL,
    voucher_id UUID REFERENCES vouchers (id),
    accounting_generated BOOLEAN NOT NULL DEFAULT FALSE,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),

    CONSTRAINT uq_source_documents_tenant_kind_ref UNIQUE (tenant_id, kind, reference)
);
";

const DROP_ALL_SQL: &str = r"
DROP TABLE IF EXISTS source_documents;
DROP TABLE IF EXISTS voucher_sequences;
DROP TABLE IF EXISTS voucher_entries;
DROP TABLE IF EXISTS vouchers;
DROP TABLE IF EXISTS fiscal_periods;
DROP TABLE IF EXISTS chart_of_accounts;

DROP TYPE IF EXISTS document_kind;
DROP TYPE IF EXISTS period_status;
DROP TYPE IF EXISTS voucher_status;
DROP TYPE IF EXISTS voucher_type;
DROP TYPE IF EXISTS account_nature;
DROP TYPE IF EXISTS account_type;
";
