//! Customer documents and customer table rows.

use serde::{Deserialize, Serialize};

use super::money::format_currency;

/// Customer document as stored in the `customers` collection. `id` is the
/// key invoices reference through `customer_id`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Customer {
    pub id: String,
    pub name: String,
    pub email: String,
    pub image_url: String,
}

/// Id and name only, for customer pickers.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CustomerField {
    pub id: String,
    pub name: String,
}

/// Per-customer invoice totals as produced by the customer table pipeline.
#[derive(Debug, Clone, Deserialize)]
pub struct CustomersTableRaw {
    pub id: String,
    pub name: String,
    pub email: String,
    pub image_url: String,
    pub total_invoices: i64,
    pub total_pending: i64,
    pub total_paid: i64,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CustomersTable {
    pub id: String,
    pub name: String,
    pub email: String,
    pub image_url: String,
    pub total_invoices: i64,
    pub total_pending: String,
    pub total_paid: String,
}

impl From<CustomersTableRaw> for CustomersTable {
    fn from(raw: CustomersTableRaw) -> Self {
        Self {
            id: raw.id,
            name: raw.name,
            email: raw.email,
            image_url: raw.image_url,
            total_invoices: raw.total_invoices,
            total_pending: format_currency(raw.total_pending),
            total_paid: format_currency(raw.total_paid),
        }
    }
}
