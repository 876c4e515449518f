//! Records of the module tables
mod container;
mod my_module;

pub use container::*;
pub use my_module::*;

use chrono::{DateTime, Utc};

use mymodule_persistence::sqlite::HydrationError;

fn read_datetime(value: &str) -> Result<DateTime<Utc>, HydrationError> {
    DateTime::parse_from_rfc3339(value)
        .map(|date| date.with_timezone(&Utc))
        .map_err(|e| {
            HydrationError::InvalidData(format!(
                "Could not turn string '{value}' to rfc3339 Datetime. Error: {e}"
            ))
        })
}

fn read_bool(value: i64, field: &str) -> Result<bool, HydrationError> {
    match value {
        0 => Ok(false),
        1 => Ok(true),
        _ => Err(HydrationError::InvalidData(format!(
            "Field '{field}' must be a boolean stored as 0 or 1, got '{value}'"
        ))),
    }
}
