use serde::{Deserialize, Serialize};

use crate::StdError;

/// Body of an error reply sent by the HTTP API
#[derive(Clone, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ErrorMessage {
    /// Machine readable label, stable across versions
    pub label: String,

    /// Human readable description
    pub message: String,
}

impl ErrorMessage {
    /// Label of a request whose record is rejected by the storage rules
    pub const INVALID_RECORD: &'static str = "invalid_record";

    /// Label of a request targeting a record that does not exist
    pub const RECORD_NOT_FOUND: &'static str = "record_not_found";

    /// Label of a request failing because the module schema is missing or invalid
    pub const SCHEMA_ERROR: &'static str = "schema_error";

    /// Label of any other failure
    pub const INTERNAL_ERROR: &'static str = "internal_error";

    /// ErrorMessage factory
    pub fn new<L: Into<String>, M: Into<String>>(label: L, message: M) -> Self {
        Self {
            label: label.into(),
            message: message.into(),
        }
    }

    /// Internal error message holding the full chain of the given error
    pub fn internal(error: &StdError) -> Self {
        Self::new(Self::INTERNAL_ERROR, format!("{error:?}"))
    }
}
