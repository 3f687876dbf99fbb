pub mod activity;
pub mod city;
pub mod datetime;
pub mod response;
pub mod saved_destination;
pub mod search;
pub mod trip;

use bson::oid::ObjectId;

use crate::error::ApiError;

/// Ids are ObjectId hex strings so they read the same in BSON and JSON.
pub fn new_id() -> String {
    ObjectId::new().to_hex()
}

pub(crate) fn required_trimmed(value: Option<String>, field: &str) -> Result<String, ApiError> {
    match value.map(|v| v.trim().to_string()) {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(ApiError::validation(format!("Please provide {}", field))),
    }
}
