//! Seed script for development — populates empty collections with the
//! bundled placeholder data.
//!
//! Usage: `cargo run --bin seed`
//!
//! Requires `MONGODB_URI` (reads .env). Collections that already hold
//! documents are left untouched.

use finboard::config::AppConfig;
use finboard::db;
use finboard::services::seed::{self, CollectionSeed, PlaceholderData};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "finboard=info".into()),
        )
        .init();

    let config = AppConfig::from_env()?;
    let client = db::create_client(&config.mongodb_uri, 2).await?;
    let database = client.database(&config.mongodb_database);

    println!("=== finboard seed ({}) ===", config.mongodb_database);

    let data = PlaceholderData::bundled()?;
    let report = seed::seed_database(&database, &data).await?;

    for (name, outcome) in [
        (db::USERS, report.users),
        (db::CUSTOMERS, report.customers),
        (db::INVOICES, report.invoices),
        (db::REVENUES, report.revenues),
    ] {
        match outcome {
            CollectionSeed::Inserted(n) => println!("[done] {name}: inserted {n}"),
            CollectionSeed::Skipped { existing } => {
                println!("[skip] {name}: already has {existing} documents")
            }
        }
    }

    println!("\n=== {} ===", report.message);

    client.shutdown().await;
    Ok(())
}
