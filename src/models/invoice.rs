//! Invoice documents and the shapes the dashboard reads them in.

use chrono::NaiveDate;
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

use super::money::{format_currency, Money};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum InvoiceStatus {
    Pending,
    Paid,
}

impl InvoiceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            InvoiceStatus::Pending => "pending",
            InvoiceStatus::Paid => "paid",
        }
    }
}

/// Invoice document as stored in the `invoices` collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Invoice {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub customer_id: String,
    /// Amount in cents.
    pub amount: i64,
    pub status: InvoiceStatus,
    pub date: NaiveDate,
}

/// Placeholder invoice before it is assigned an `_id`.
#[derive(Debug, Clone, Deserialize)]
pub struct NewInvoice {
    pub customer_id: String,
    pub amount: i64,
    pub status: InvoiceStatus,
    pub date: NaiveDate,
}

impl NewInvoice {
    pub fn into_document(self) -> Invoice {
        Invoice {
            id: ObjectId::new(),
            customer_id: self.customer_id,
            amount: self.amount,
            status: self.status,
            date: self.date,
        }
    }
}

/// Row produced by the latest-invoices pipeline.
#[derive(Debug, Clone, Deserialize)]
pub struct LatestInvoiceRaw {
    pub id: String,
    pub name: String,
    pub email: String,
    pub image_url: String,
    pub amount: i64,
}

/// Latest invoice card entry with a display-formatted amount.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct LatestInvoice {
    pub id: String,
    pub name: String,
    pub email: String,
    pub image_url: String,
    pub amount: String,
}

impl From<LatestInvoiceRaw> for LatestInvoice {
    fn from(raw: LatestInvoiceRaw) -> Self {
        Self {
            id: raw.id,
            name: raw.name,
            email: raw.email,
            image_url: raw.image_url,
            amount: format_currency(raw.amount),
        }
    }
}

/// Invoice joined with its customer, as listed in the invoices table.
/// `amount` stays in cents.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InvoicesTable {
    pub id: String,
    pub customer_id: String,
    pub name: String,
    pub email: String,
    pub image_url: String,
    pub date: NaiveDate,
    pub amount: i64,
    pub status: InvoiceStatus,
}

/// Invoice as loaded into the edit form, amount in major units.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct InvoiceForm {
    pub id: String,
    pub customer_id: String,
    pub amount: f64,
    pub status: InvoiceStatus,
}

impl From<Invoice> for InvoiceForm {
    fn from(invoice: Invoice) -> Self {
        Self {
            id: invoice.id.to_hex(),
            customer_id: invoice.customer_id,
            amount: Money::from_cents(invoice.amount).to_major_units(),
            status: invoice.status,
        }
    }
}
