//! Dashboard overview queries: revenue chart, latest invoices and summary cards.

use futures::TryStreamExt;
use mongodb::bson::{self, doc, Document};
use mongodb::Database;
use serde::{Deserialize, Serialize};

use crate::db;
use crate::errors::AppError;
use crate::models::invoice::{LatestInvoice, LatestInvoiceRaw};
use crate::models::money::format_currency;
use crate::models::revenue::Revenue;
use crate::services::pipeline;

/// How many invoices the "latest invoices" card shows.
pub const LATEST_INVOICES_LIMIT: i64 = 5;

/// Summary cards at the top of the dashboard.
#[derive(Debug, Serialize)]
pub struct CardData {
    pub number_of_customers: u64,
    pub number_of_invoices: u64,
    pub total_paid_invoices: String,
    pub total_pending_invoices: String,
}

/// Intermediate row for the paid/pending conditional aggregation.
#[derive(Debug, Default, Deserialize, PartialEq)]
pub struct StatusTotals {
    pub paid: i64,
    pub pending: i64,
}

impl CardData {
    pub fn new(number_of_invoices: u64, number_of_customers: u64, totals: &StatusTotals) -> Self {
        Self {
            number_of_customers,
            number_of_invoices,
            total_paid_invoices: format_currency(totals.paid),
            total_pending_invoices: format_currency(totals.pending),
        }
    }
}

/// Fetch every revenue record as stored.
pub async fn fetch_revenue(db: &Database) -> Result<Vec<Revenue>, AppError> {
    query_revenue(db)
        .await
        .map_err(AppError::data_access("Failed to fetch revenue data."))
}

async fn query_revenue(db: &Database) -> Result<Vec<Revenue>, AppError> {
    let docs: Vec<Document> = db
        .collection::<Document>(db::REVENUES)
        .find(doc! {})
        .await?
        .try_collect()
        .await?;

    Ok(docs
        .into_iter()
        .map(bson::from_document)
        .collect::<Result<_, _>>()?)
}

/// Fetch the five most recent invoices with customer details and a
/// formatted amount.
pub async fn fetch_latest_invoices(db: &Database) -> Result<Vec<LatestInvoice>, AppError> {
    let rows = query_latest_invoices(db)
        .await
        .map_err(AppError::data_access("Failed to fetch the latest invoices."))?;
    Ok(rows.into_iter().map(LatestInvoice::from).collect())
}

async fn query_latest_invoices(db: &Database) -> Result<Vec<LatestInvoiceRaw>, AppError> {
    let docs: Vec<Document> = db
        .collection::<Document>(db::INVOICES)
        .aggregate(pipeline::latest_invoices_pipeline(LATEST_INVOICES_LIMIT))
        .await?
        .try_collect()
        .await?;

    tracing::debug!(count = docs.len(), "Fetched latest invoices");

    Ok(docs
        .into_iter()
        .map(bson::from_document)
        .collect::<Result<_, _>>()?)
}

/// Fetch the summary cards. The three underlying queries run concurrently
/// and the call fails if any of them fails.
pub async fn fetch_card_data(db: &Database) -> Result<CardData, AppError> {
    let (number_of_invoices, number_of_customers, totals) = tokio::try_join!(
        count_documents(db, db::INVOICES),
        count_documents(db, db::CUSTOMERS),
        fetch_status_totals(db),
    )
    .map_err(AppError::data_access("Failed to fetch card data."))?;

    Ok(CardData::new(number_of_invoices, number_of_customers, &totals))
}

async fn count_documents(db: &Database, collection: &str) -> Result<u64, AppError> {
    let count = db
        .collection::<Document>(collection)
        .count_documents(doc! {})
        .await?;
    Ok(count)
}

/// Sum invoice amounts by status. An empty collection yields zero totals.
async fn fetch_status_totals(db: &Database) -> Result<StatusTotals, AppError> {
    let first = db
        .collection::<Document>(db::INVOICES)
        .aggregate(pipeline::status_totals_pipeline())
        .await?
        .try_next()
        .await?;

    match first {
        Some(doc) => Ok(bson::from_document(doc)?),
        None => Ok(StatusTotals::default()),
    }
}
