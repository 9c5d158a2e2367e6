//! Customer picker list and the searchable customer table.

use futures::TryStreamExt;
use mongodb::bson::{self, doc, Document};
use mongodb::Database;

use crate::db;
use crate::errors::AppError;
use crate::models::customer::{CustomerField, CustomersTable, CustomersTableRaw};
use crate::services::pipeline;

/// All customers, id and name only, sorted by name.
pub async fn fetch_customers(db: &Database) -> Result<Vec<CustomerField>, AppError> {
    query_customers(db)
        .await
        .map_err(AppError::data_access("Failed to fetch all customers."))
}

async fn query_customers(db: &Database) -> Result<Vec<CustomerField>, AppError> {
    let customers: Vec<CustomerField> = db
        .collection::<CustomerField>(db::CUSTOMERS)
        .find(doc! {})
        .projection(doc! { "_id": 0, "id": 1, "name": 1 })
        .sort(doc! { "name": 1 })
        .await?
        .try_collect()
        .await?;
    Ok(customers)
}

/// Customers whose name or email contains `query` (case-insensitive), with
/// invoice counts and formatted paid/pending totals.
pub async fn fetch_filtered_customers(
    db: &Database,
    query: &str,
) -> Result<Vec<CustomersTable>, AppError> {
    let rows = query_filtered_customers(db, query)
        .await
        .map_err(AppError::data_access("Failed to fetch customer table."))?;
    Ok(rows.into_iter().map(CustomersTable::from).collect())
}

async fn query_filtered_customers(
    db: &Database,
    query: &str,
) -> Result<Vec<CustomersTableRaw>, AppError> {
    tracing::debug!(query, "Searching customers");

    let docs: Vec<Document> = db
        .collection::<Document>(db::CUSTOMERS)
        .aggregate(pipeline::customers_table_pipeline(query))
        .await?
        .try_collect()
        .await?;

    Ok(docs
        .into_iter()
        .map(bson::from_document)
        .collect::<Result<_, _>>()?)
}
