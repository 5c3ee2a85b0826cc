//! Literal tables and records provisioned by a bootstrap run.

use crate::types::{Record, TableSpec};

pub const ARTICLE: &str = "Article";
pub const TAG: &str = "Tag";
pub const ACCOUNT: &str = "Account";
pub const APPOINTMENT: &str = "Appointment";

/// Capacity units every bootstrap table is created with.
pub const TABLE_CAPACITY: u32 = 10;

/// The four bootstrap tables, in creation order.
pub fn bootstrap_tables() -> Vec<TableSpec> {
    [
        (ARTICLE, "article_id"),
        (TAG, "tag_id"),
        (ACCOUNT, "account_id"),
        (APPOINTMENT, "appointment_id"),
    ]
    .into_iter()
    .map(|(name, key)| TableSpec::new(name, key, TABLE_CAPACITY, TABLE_CAPACITY))
    .collect()
}

/// Sample articles. Each carries a `tag_id` that is dropped on insert.
pub fn article_records() -> Vec<Record> {
    [("tag1", "1"), ("tag1", "2"), ("tag2", "3")]
        .into_iter()
        .map(|(tag, id)| {
            Record::new()
                .with("tag_id", tag)
                .with("article_id", id)
                .with("author", format!("Author {id}"))
                .with("title", format!("Article {id}"))
                .with("last_edit", "12-12-1950")
                .with("content", "So easy!!!")
        })
        .collect()
}

/// Sample accounts, one per user type.
pub fn account_records() -> Vec<Record> {
    vec![
        doctor_account("account_id"),
        Record::from([
            ("account_id", "2"),
            ("username", "admin1"),
            ("user_type", "Admin"),
            ("admin_data", "Admin-specific data"),
        ]),
        Record::from([
            ("account_id", "3"),
            ("username", "user1"),
            ("user_type", "User"),
            ("user_data", "User-specific data"),
        ]),
    ]
}

/// The accounts written a second time.
///
/// The doctor account is keyed by `user_id` rather than `account_id`, so the
/// store rejects it for lacking the table key.
pub fn account_records_rewrite() -> Vec<Record> {
    let mut records = account_records();
    records[0] = doctor_account("user_id");
    records
}

fn doctor_account(key_attribute: &str) -> Record {
    Record::new()
        .with(key_attribute, "1")
        .with("username", "doctor1")
        .with("user_type", "Doctor")
        .with("working_time", "9 AM - 5 PM")
}
