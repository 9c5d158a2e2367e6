//! One-shot population of an empty database with placeholder records.
//!
//! Each collection is seeded only while it is empty, so running the seed
//! twice leaves the second run a no-op instead of duplicating records. A
//! collection whose insert fails is cleared again before the error returns.

use mongodb::bson::doc;
use mongodb::Database;
use serde::{Deserialize, Serialize};

use crate::db;
use crate::errors::AppError;
use crate::models::customer::Customer;
use crate::models::invoice::{Invoice, NewInvoice};
use crate::models::revenue::Revenue;
use crate::models::user::{NewUser, User};
use crate::services::password::hash_password;

const PLACEHOLDER_JSON: &str = include_str!("../../fixtures/placeholder_data.json");

/// Placeholder records bundled with the binary.
#[derive(Debug, Clone, Deserialize)]
pub struct PlaceholderData {
    pub users: Vec<NewUser>,
    pub customers: Vec<Customer>,
    pub invoices: Vec<NewInvoice>,
    pub revenue: Vec<Revenue>,
}

impl PlaceholderData {
    pub fn bundled() -> Result<Self, AppError> {
        serde_json::from_str(PLACEHOLDER_JSON)
            .map_err(|e| AppError::Internal(format!("Invalid placeholder data: {e}")))
    }
}

/// What happened to one collection during a seed run.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum CollectionSeed {
    Inserted(usize),
    Skipped { existing: u64 },
}

#[derive(Debug, Serialize)]
pub struct SeedReport {
    pub message: String,
    pub users: CollectionSeed,
    pub customers: CollectionSeed,
    pub invoices: CollectionSeed,
    pub revenues: CollectionSeed,
}

/// Seed users, customers, invoices and revenues, in that order.
pub async fn seed_database(db: &Database, data: &PlaceholderData) -> Result<SeedReport, AppError> {
    run_seed(db, data)
        .await
        .map_err(AppError::data_access("Failed to seed database."))
}

async fn run_seed(db: &Database, data: &PlaceholderData) -> Result<SeedReport, AppError> {
    let users = seed_collection(db, db::USERS, || hash_users(&data.users)).await?;
    let customers = seed_collection(db, db::CUSTOMERS, || Ok(data.customers.clone())).await?;
    let invoices = seed_collection(db, db::INVOICES, || {
        Ok(data
            .invoices
            .iter()
            .cloned()
            .map(NewInvoice::into_document)
            .collect::<Vec<Invoice>>())
    })
    .await?;
    let revenues = seed_collection(db, db::REVENUES, || Ok(data.revenue.clone())).await?;

    tracing::info!(?users, ?customers, ?invoices, ?revenues, "Database seeded");

    Ok(SeedReport {
        message: "Database seeded successfully".to_string(),
        users,
        customers,
        invoices,
        revenues,
    })
}

fn hash_users(users: &[NewUser]) -> Result<Vec<User>, AppError> {
    users
        .iter()
        .map(|user| {
            Ok(User {
                id: user.id.clone(),
                name: user.name.clone(),
                email: user.email.clone(),
                password: hash_password(&user.password)?,
            })
        })
        .collect()
}

/// Insert the records produced by `build` unless `name` already holds
/// documents. `build` only runs when the insert will happen.
async fn seed_collection<T, F>(
    db: &Database,
    name: &str,
    build: F,
) -> Result<CollectionSeed, AppError>
where
    T: Serialize + Send + Sync,
    F: FnOnce() -> Result<Vec<T>, AppError>,
{
    let collection = db.collection::<T>(name);

    let existing = collection.count_documents(doc! {}).await?;
    if existing > 0 {
        tracing::info!(collection = name, existing, "Collection not empty, skipping seed");
        return Ok(CollectionSeed::Skipped { existing });
    }

    let records = build()?;
    if records.is_empty() {
        return Ok(CollectionSeed::Inserted(0));
    }

    let result = match collection.insert_many(&records).await {
        Ok(result) => result,
        Err(e) => {
            // The collection was empty before this run, so clearing it
            // lets the next run retry instead of skipping a partial seed.
            tracing::warn!(collection = name, error = %e, "Seed insert failed, clearing partial records");
            collection.delete_many(doc! {}).await?;
            return Err(e.into());
        }
    };
    tracing::info!(collection = name, inserted = result.inserted_ids.len(), "Seeded collection");
    Ok(CollectionSeed::Inserted(result.inserted_ids.len()))
}
