//! Schema migration CLI for the bill tables.
//!
//! Reads `DATABASE_URL` (a `.env` file is honoured).
//!
//! ```text
//! migrator up       apply pending migrations
//! migrator down     roll back the last migration
//! migrator status   list applied and pending migrations
//! migrator fresh    drop everything and migrate from scratch
//! ```

use billsplit_db::migration::Migrator;
use sea_orm_migration::prelude::*;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    cli::run_cli(Migrator).await;
}
