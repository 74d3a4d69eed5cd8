//! Initial database migration.
//!
//! Creates the chat, user, bill and bank account tables.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();

        db.execute_unprepared(ENUMS_SQL).await?;
        db.execute_unprepared(GROUPS_SQL).await?;
        db.execute_unprepared(USERS_SQL).await?;
        db.execute_unprepared(BILLS_SQL).await?;
        db.execute_unprepared(BILL_PARTICIPANTS_SQL).await?;
        db.execute_unprepared(GROUP_BANK_ACCOUNTS_SQL).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(DROP_SQL).await?;
        Ok(())
    }
}

const ENUMS_SQL: &str = r"
CREATE TYPE bill_status AS ENUM ('open', 'cancelled');
CREATE TYPE participant_status AS ENUM ('pending', 'paid', 'cancelled');
";

const GROUPS_SQL: &str = r"
-- LINE groups and rooms the bot has seen
CREATE TABLE groups (
    group_id TEXT PRIMARY KEY,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now()
);
";

const USERS_SQL: &str = r"
CREATE TABLE users (
    user_id TEXT PRIMARY KEY,
    display_name TEXT,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
);
";

const BILLS_SQL: &str = r"
CREATE TABLE bills (
    bill_id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    group_id TEXT NOT NULL REFERENCES groups(group_id) ON DELETE CASCADE,
    created_by TEXT NOT NULL REFERENCES users(user_id),
    title TEXT NOT NULL,
    total_amount NUMERIC(14, 2) NOT NULL,
    rounding_step NUMERIC(14, 2),
    status bill_status NOT NULL DEFAULT 'open',
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    CONSTRAINT chk_bill_total_positive CHECK (total_amount > 0),
    CONSTRAINT chk_bill_step_positive CHECK (rounding_step IS NULL OR rounding_step > 0)
);

-- Latest bills per chat
CREATE INDEX idx_bills_group_created ON bills(group_id, created_at DESC);
";

const BILL_PARTICIPANTS_SQL: &str = r"
CREATE TABLE bill_participants (
    bill_id UUID NOT NULL REFERENCES bills(bill_id) ON DELETE CASCADE,
    user_id TEXT NOT NULL REFERENCES users(user_id),
    share_amount NUMERIC(14, 2) NOT NULL,
    status participant_status NOT NULL DEFAULT 'pending',
    paid_at TIMESTAMPTZ,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    PRIMARY KEY (bill_id, user_id),
    CONSTRAINT chk_share_non_negative CHECK (share_amount >= 0)
);

CREATE INDEX idx_bill_participants_user ON bill_participants(user_id);
";

const GROUP_BANK_ACCOUNTS_SQL: &str = r"
CREATE TABLE group_bank_accounts (
    group_id TEXT PRIMARY KEY REFERENCES groups(group_id) ON DELETE CASCADE,
    account_number TEXT NOT NULL,
    account_name TEXT,
    bank_name TEXT,
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
);
";

const DROP_SQL: &str = r"
DROP TABLE IF EXISTS group_bank_accounts CASCADE;
DROP TABLE IF EXISTS bill_participants CASCADE;
DROP TABLE IF EXISTS bills CASCADE;
DROP TABLE IF EXISTS users CASCADE;
DROP TABLE IF EXISTS groups CASCADE;
DROP TYPE IF EXISTS participant_status;
DROP TYPE IF EXISTS bill_status;
";
