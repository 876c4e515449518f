use serde::Serialize;
use warp::http::StatusCode;

use mymodule_common::messages::ErrorMessage;
use mymodule_common::services::MyModuleServiceError;

pub fn json<T>(value: &T, status_code: StatusCode) -> Box<dyn warp::Reply>
where
    T: Serialize,
{
    Box::new(warp::reply::with_status(
        warp::reply::json(value),
        status_code,
    ))
}

pub fn empty(status_code: StatusCode) -> Box<dyn warp::Reply> {
    Box::new(warp::reply::with_status(warp::reply::reply(), status_code))
}

pub fn bad_request(label: String, message: String) -> Box<dyn warp::Reply> {
    json(&ErrorMessage::new(label, message), StatusCode::BAD_REQUEST)
}

pub fn not_found(label: String, message: String) -> Box<dyn warp::Reply> {
    json(&ErrorMessage::new(label, message), StatusCode::NOT_FOUND)
}

pub fn internal_server_error<T: Into<String>>(label: &str, message: T) -> Box<dyn warp::Reply> {
    json(
        &ErrorMessage::new(label, message),
        StatusCode::INTERNAL_SERVER_ERROR,
    )
}

/// Reply to a failed service operation, each kind of error gets its own status and label.
pub fn service_error(error: MyModuleServiceError) -> Box<dyn warp::Reply> {
    match error {
        MyModuleServiceError::Validation(message) => {
            bad_request(ErrorMessage::INVALID_RECORD.to_string(), message)
        }
        MyModuleServiceError::NotFound(id) => not_found(
            ErrorMessage::RECORD_NOT_FOUND.to_string(),
            format!("record {id} does not exist"),
        ),
        MyModuleServiceError::Schema(source) => {
            internal_server_error(ErrorMessage::SCHEMA_ERROR, format!("{source:?}"))
        }
        MyModuleServiceError::Unreachable(source) | MyModuleServiceError::Internal(source) => {
            internal_server_error(ErrorMessage::INTERNAL_ERROR, format!("{source:?}"))
        }
    }
}
