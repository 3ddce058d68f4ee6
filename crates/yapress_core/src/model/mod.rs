//! Domain records for the news and notes sites.
//!
//! # Responsibility
//! - Define the canonical data structures passed from repositories through
//!   services into template contexts.
//!
//! # Invariants
//! - Every record is identified by its SQLite rowid.
//! - Timestamps are UTC; calendar dates carry no timezone.

pub mod news;
pub mod note;
pub mod user;

use chrono::{DateTime, Utc};

pub(crate) fn to_epoch_ms(value: DateTime<Utc>) -> i64 {
    value.timestamp_millis()
}

pub(crate) fn from_epoch_ms(value: i64) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp_millis(value)
}
