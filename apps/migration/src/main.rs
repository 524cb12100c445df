//! Schema CLI: `migration up`, `migration down`, `migration fresh`, `migration status`.
//!
//! Reads `DATABASE_URL` (or `-u`), loading `.env` first.

use sea_orm_migration::prelude::*;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // run_cli installs its own log subscriber (`-v` for debug output)
    cli::run_cli(migration::Migrator).await;
}
