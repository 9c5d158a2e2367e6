//! Aggregation pipeline builders for the dashboard queries.
//!
//! Everything here is pure: each function returns BSON stages and never
//! touches the database, so the shape of every query can be checked in
//! isolation.

use mongodb::bson::{doc, Document};

use crate::db;
use crate::models::invoice::InvoiceStatus;

/// Escape regex metacharacters so a user search term matches literally.
pub fn escape_search_term(term: &str) -> String {
    regex::escape(term)
}

/// Case-insensitive regex predicate on `field`. `pattern` must already be escaped.
pub fn contains_ci(field: &str, pattern: &str) -> Document {
    doc! { field: { "$regex": pattern, "$options": "i" } }
}

/// Join each invoice with its customer (`customer_id` -> `customers.id`).
pub fn customer_lookup(as_field: &str) -> Document {
    doc! {
        "$lookup": {
            "from": db::CUSTOMERS,
            "localField": "customer_id",
            "foreignField": "id",
            "as": as_field,
        }
    }
}

pub fn unwind(path: &str) -> Document {
    doc! { "$unwind": format!("${path}") }
}

/// `$sum` accumulator over `amount_path` restricted to rows whose
/// `status_path` equals `status`.
pub fn status_sum(status: InvoiceStatus, status_path: &str, amount_path: &str) -> Document {
    doc! {
        "$sum": {
            "$cond": [ { "$eq": [status_path, status.as_str()] }, amount_path, 0 ]
        }
    }
}

/// Join invoices with customers and keep rows where any searchable field
/// contains `term`. Amount, date and status are compared in string form.
pub fn invoice_search_stages(term: &str) -> Vec<Document> {
    let pattern = escape_search_term(term);
    vec![
        customer_lookup("customer"),
        unwind("customer"),
        doc! {
            "$addFields": {
                "amount_text": { "$toString": "$amount" },
                "date_text": { "$toString": "$date" },
                "status_text": { "$toString": "$status" },
            }
        },
        doc! {
            "$match": {
                "$or": [
                    contains_ci("customer.name", &pattern),
                    contains_ci("customer.email", &pattern),
                    contains_ci("amount_text", &pattern),
                    contains_ci("date_text", &pattern),
                    contains_ci("status_text", &pattern),
                ]
            }
        },
    ]
}

/// One page of matching invoices, newest inserted first.
pub fn filtered_invoices_pipeline(term: &str, offset: i64, limit: i64) -> Vec<Document> {
    let mut pipeline = invoice_search_stages(term);
    pipeline.extend([
        doc! { "$sort": { "_id": -1 } },
        doc! { "$skip": offset },
        doc! { "$limit": limit },
        doc! {
            "$project": {
                "_id": 0,
                "id": { "$toString": "$_id" },
                "customer_id": 1,
                "name": "$customer.name",
                "email": "$customer.email",
                "image_url": "$customer.image_url",
                "date": 1,
                "amount": 1,
                "status": 1,
            }
        },
    ]);
    pipeline
}

/// Count of invoices matching `term`, emitted as `{ total: n }`. Emits no
/// document at all when nothing matches.
pub fn invoice_count_pipeline(term: &str) -> Vec<Document> {
    let mut pipeline = invoice_search_stages(term);
    pipeline.push(doc! { "$count": "total" });
    pipeline
}

/// Most recent invoices by date with their customer details.
pub fn latest_invoices_pipeline(limit: i64) -> Vec<Document> {
    vec![
        doc! { "$sort": { "date": -1, "_id": -1 } },
        customer_lookup("customer"),
        unwind("customer"),
        doc! { "$limit": limit },
        doc! {
            "$project": {
                "_id": 0,
                "id": { "$toString": "$_id" },
                "amount": 1,
                "name": "$customer.name",
                "email": "$customer.email",
                "image_url": "$customer.image_url",
            }
        },
    ]
}

/// Paid and pending totals across all invoices in a single group.
pub fn status_totals_pipeline() -> Vec<Document> {
    vec![doc! {
        "$group": {
            "_id": null,
            "paid": status_sum(InvoiceStatus::Paid, "$status", "$amount"),
            "pending": status_sum(InvoiceStatus::Pending, "$status", "$amount"),
        }
    }]
}

/// Customers whose name or email contains `term`, left-joined with their
/// invoices and reduced to per-customer totals, ordered by name.
pub fn customers_table_pipeline(term: &str) -> Vec<Document> {
    let pattern = escape_search_term(term);
    vec![
        doc! {
            "$match": {
                "$or": [contains_ci("name", &pattern), contains_ci("email", &pattern)]
            }
        },
        doc! {
            "$lookup": {
                "from": db::INVOICES,
                "localField": "id",
                "foreignField": "customer_id",
                "as": "invoice",
            }
        },
        doc! { "$unwind": { "path": "$invoice", "preserveNullAndEmptyArrays": true } },
        doc! {
            "$group": {
                "_id": "$id",
                "name": { "$first": "$name" },
                "email": { "$first": "$email" },
                "image_url": { "$first": "$image_url" },
                "total_invoices": {
                    "$sum": { "$cond": [ { "$ifNull": ["$invoice._id", false] }, 1, 0 ] }
                },
                "total_pending": status_sum(InvoiceStatus::Pending, "$invoice.status", "$invoice.amount"),
                "total_paid": status_sum(InvoiceStatus::Paid, "$invoice.status", "$invoice.amount"),
            }
        },
        doc! { "$sort": { "name": 1, "_id": 1 } },
        doc! {
            "$project": {
                "_id": 0,
                "id": "$_id",
                "name": 1,
                "email": 1,
                "image_url": 1,
                "total_invoices": 1,
                "total_pending": 1,
                "total_paid": 1,
            }
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::Bson;
    use regex::RegexBuilder;

    fn stage_names(pipeline: &[Document]) -> Vec<String> {
        pipeline
            .iter()
            .map(|stage| stage.keys().next().cloned().unwrap_or_default())
            .collect()
    }

    fn matches_ci(pattern: &str, haystack: &str) -> bool {
        RegexBuilder::new(pattern)
            .case_insensitive(true)
            .build()
            .unwrap()
            .is_match(haystack)
    }

    #[test]
    fn escaped_metacharacters_match_literally() {
        let pattern = escape_search_term("a.b*$");
        assert_eq!(pattern, r"a\.b\*\$");
        assert!(matches_ci(&pattern, "xx A.B*$ yy"));
        assert!(!matches_ci(&pattern, "axbbb"));
    }

    #[test]
    fn escaped_brackets_and_groups_stay_valid() {
        for term in ["(", "[abc", "a|b", "{2}", r"back\slash", "?+^"] {
            let pattern = escape_search_term(term);
            assert!(matches_ci(&pattern, term), "{term} should match itself");
        }
        assert!(!matches_ci(&escape_search_term("a|b"), "a"));
    }

    #[test]
    fn contains_ci_builds_case_insensitive_regex() {
        let predicate = contains_ci("customer.name", "ana");
        let inner = predicate.get_document("customer.name").unwrap();
        assert_eq!(inner.get_str("$regex").unwrap(), "ana");
        assert_eq!(inner.get_str("$options").unwrap(), "i");
    }

    #[test]
    fn invoice_search_escapes_term_and_covers_all_fields() {
        let stages = invoice_search_stages("1.5");
        assert_eq!(stage_names(&stages), ["$lookup", "$unwind", "$addFields", "$match"]);

        let clauses = stages[3]
            .get_document("$match")
            .unwrap()
            .get_array("$or")
            .unwrap();
        let fields: Vec<&str> = clauses
            .iter()
            .filter_map(Bson::as_document)
            .filter_map(|clause| clause.keys().next().map(String::as_str))
            .collect();
        assert_eq!(
            fields,
            ["customer.name", "customer.email", "amount_text", "date_text", "status_text"]
        );

        let first = clauses[0].as_document().unwrap();
        let regex = first.get_document("customer.name").unwrap().get_str("$regex").unwrap();
        assert_eq!(regex, r"1\.5");
    }

    #[test]
    fn filtered_invoices_sort_then_paginate() {
        let pipeline = filtered_invoices_pipeline("ana", 12, 6);
        assert_eq!(
            stage_names(&pipeline),
            ["$lookup", "$unwind", "$addFields", "$match", "$sort", "$skip", "$limit", "$project"]
        );
        assert_eq!(pipeline[4].get_document("$sort").unwrap().get_i32("_id").unwrap(), -1);
        assert_eq!(pipeline[5].get_i64("$skip").unwrap(), 12);
        assert_eq!(pipeline[6].get_i64("$limit").unwrap(), 6);
    }

    #[test]
    fn count_pipeline_ends_with_count_stage() {
        let pipeline = invoice_count_pipeline("");
        assert_eq!(pipeline.last().unwrap().get_str("$count").unwrap(), "total");
    }

    #[test]
    fn latest_invoices_sort_descending_by_date() {
        let pipeline = latest_invoices_pipeline(5);
        let sort = pipeline[0].get_document("$sort").unwrap();
        assert_eq!(sort.get_i32("date").unwrap(), -1);
        assert_eq!(sort.get_i32("_id").unwrap(), -1);
        assert_eq!(pipeline[3].get_i64("$limit").unwrap(), 5);
    }

    #[test]
    fn status_sum_uses_conditional_amount() {
        let acc = status_sum(InvoiceStatus::Paid, "$status", "$amount");
        let cond = acc.get_document("$sum").unwrap().get_array("$cond").unwrap();
        let eq = cond[0].as_document().unwrap().get_array("$eq").unwrap();
        assert_eq!(eq[0].as_str(), Some("$status"));
        assert_eq!(eq[1].as_str(), Some("paid"));
        assert_eq!(cond[1].as_str(), Some("$amount"));
        assert_eq!(cond[2], Bson::Int32(0));
    }

    #[test]
    fn status_totals_group_all_invoices() {
        let pipeline = status_totals_pipeline();
        let group = pipeline[0].get_document("$group").unwrap();
        assert_eq!(group.get("_id"), Some(&Bson::Null));
        assert!(group.contains_key("paid"));
        assert!(group.contains_key("pending"));
    }

    #[test]
    fn customers_table_left_joins_invoices() {
        let pipeline = customers_table_pipeline("d.o");
        assert_eq!(
            stage_names(&pipeline),
            ["$match", "$lookup", "$unwind", "$group", "$sort", "$project"]
        );
        let unwind = pipeline[2].get_document("$unwind").unwrap();
        assert!(unwind.get_bool("preserveNullAndEmptyArrays").unwrap());

        let clauses = pipeline[0]
            .get_document("$match")
            .unwrap()
            .get_array("$or")
            .unwrap();
        let name = clauses[0].as_document().unwrap().get_document("name").unwrap();
        assert_eq!(name.get_str("$regex").unwrap(), r"d\.o");
    }
}
