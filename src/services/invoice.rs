//! Invoice table search, pagination and single-invoice lookup.

use futures::TryStreamExt;
use mongodb::bson::{self, doc, oid::ObjectId, Document};
use mongodb::Database;
use serde::Deserialize;

use crate::db;
use crate::errors::AppError;
use crate::models::invoice::{Invoice, InvoiceForm, InvoicesTable};
use crate::models::pagination::{page_offset, total_pages, PagedResult, ITEMS_PER_PAGE};
use crate::services::pipeline;

/// Output of the `$count` stage.
#[derive(Debug, Deserialize)]
struct CountRow {
    total: i64,
}

/// Fetch one page (1-based, 6 rows) of invoices matching `query`.
pub async fn fetch_filtered_invoices(
    db: &Database,
    query: &str,
    page: i64,
) -> Result<Vec<InvoicesTable>, AppError> {
    query_filtered_invoices(db, query, page)
        .await
        .map_err(AppError::data_access("Failed to fetch invoices."))
}

async fn query_filtered_invoices(
    db: &Database,
    query: &str,
    page: i64,
) -> Result<Vec<InvoicesTable>, AppError> {
    let offset = page_offset(page);
    tracing::debug!(query, page, offset, "Searching invoices");

    let docs: Vec<Document> = db
        .collection::<Document>(db::INVOICES)
        .aggregate(pipeline::filtered_invoices_pipeline(query, offset, ITEMS_PER_PAGE))
        .await?
        .try_collect()
        .await?;

    Ok(docs
        .into_iter()
        .map(bson::from_document)
        .collect::<Result<_, _>>()?)
}

/// Number of pages needed to list every invoice matching `query`.
pub async fn fetch_invoices_pages(db: &Database, query: &str) -> Result<u64, AppError> {
    let total = count_matching_invoices(db, query)
        .await
        .map_err(AppError::data_access("Failed to fetch total number of invoices."))?;
    Ok(total_pages(total))
}

async fn count_matching_invoices(db: &Database, query: &str) -> Result<u64, AppError> {
    let row = db
        .collection::<Document>(db::INVOICES)
        .aggregate(pipeline::invoice_count_pipeline(query))
        .await?
        .try_next()
        .await?;

    match row {
        Some(doc) => {
            let count: CountRow = bson::from_document(doc)?;
            Ok(count.total.max(0) as u64)
        }
        None => Ok(0),
    }
}

/// Fetch a page of matching invoices together with the pager metadata.
/// Both queries run concurrently.
pub async fn fetch_invoices_page(
    db: &Database,
    query: &str,
    page: i64,
) -> Result<PagedResult<InvoicesTable>, AppError> {
    let (items, total) = tokio::try_join!(
        query_filtered_invoices(db, query, page),
        count_matching_invoices(db, query),
    )
    .map_err(AppError::data_access("Failed to fetch invoices."))?;

    Ok(PagedResult::new(items, total, page))
}

/// Look up an invoice by its ObjectId hex string, with the amount in major
/// units. Returns `None` when no such invoice exists.
pub async fn fetch_invoice_by_id(db: &Database, id: &str) -> Result<Option<InvoiceForm>, AppError> {
    // A malformed id cannot name a stored invoice.
    let Ok(object_id) = ObjectId::parse_str(id) else {
        tracing::debug!(id, "Invoice id is not a valid ObjectId");
        return Ok(None);
    };

    let invoice = db
        .collection::<Invoice>(db::INVOICES)
        .find_one(doc! { "_id": object_id })
        .await
        .map_err(AppError::data_access("Failed to fetch invoice."))?;

    Ok(invoice.map(InvoiceForm::from))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn count_row_decodes_int32_total() {
        let row: CountRow = bson::from_document(doc! { "total": 7_i32 }).unwrap();
        assert_eq!(row.total, 7);
        assert_eq!(total_pages(row.total as u64), 2);
    }
}
