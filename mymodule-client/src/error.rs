use anyhow::anyhow;
use reqwest::{Response, StatusCode, header};
use thiserror::Error;

use mymodule_common::StdError;
use mymodule_common::messages::ErrorMessage;

const JSON_CONTENT_TYPE: &str = "application/json";

/// Error structure for the MyModule HTTP client.
#[derive(Error, Debug)]
pub enum MyModuleHttpClientError {
    /// The server responded it cannot fulfill our request.
    #[error("remote server logical error: {}: {}", .0.label, .0.message)]
    RemoteServerLogical(ErrorMessage),

    /// The server has returned a technical error.
    #[error("remote server technical error: {}: {}", .0.label, .0.message)]
    RemoteServerTechnical(ErrorMessage),

    /// Could not reach the server.
    #[error("remote server unreachable")]
    RemoteServerUnreachable(#[source] StdError),

    /// Could not parse response.
    #[error("json parsing failed")]
    JsonParseFailed(#[source] StdError),

    /// The url of a route could not be built.
    #[error("invalid endpoint")]
    InvalidEndpoint(#[source] StdError),

    /// The server responded with a status code the query does not expect.
    #[error("unhandled status code: {0}, response text: {1}")]
    UnhandledStatusCode(StatusCode, String),
}

impl MyModuleHttpClientError {
    /// Create a `MyModuleHttpClientError` from a response.
    ///
    /// This method is meant to be used after handling the query specific cases leaving only
    /// 4xx or 5xx status codes.
    /// Otherwise, it will return an `UnhandledStatusCode` error.
    pub async fn from_response(response: Response) -> Self {
        let error_code = response.status();

        if error_code.is_client_error() {
            Self::RemoteServerLogical(Self::get_error_message(response).await)
        } else if error_code.is_server_error() {
            Self::RemoteServerTechnical(Self::get_error_message(response).await)
        } else {
            let response_text = response.text().await.unwrap_or_default();
            Self::UnhandledStatusCode(error_code, response_text)
        }
    }

    async fn get_error_message(response: Response) -> ErrorMessage {
        let canonical_reason = response
            .status()
            .canonical_reason()
            .unwrap_or_default()
            .to_lowercase();
        let is_json = response
            .headers()
            .get(header::CONTENT_TYPE)
            .is_some_and(|ct| JSON_CONTENT_TYPE == ct);

        if is_json {
            let json_value: serde_json::Value = response.json().await.unwrap_or_default();

            match serde_json::from_value::<ErrorMessage>(json_value.clone()) {
                Ok(error_message) => error_message,
                Err(_) if json_value.is_null() => ErrorMessage::new(canonical_reason, ""),
                Err(_) => ErrorMessage::new(canonical_reason, json_value.to_string()),
            }
        } else {
            let response_text = response.text().await.unwrap_or_default();
            ErrorMessage::new(canonical_reason, response_text)
        }
    }

    /// Error returned when the request could not be sent
    pub(crate) fn unreachable(error: reqwest::Error) -> Self {
        Self::RemoteServerUnreachable(anyhow!(error))
    }
}

#[cfg(test)]
mod tests {
    use http::response::Builder as HttpResponseBuilder;

    use mymodule_common::assert_error_matches;

    use super::*;

    fn response(status: u16, content_type: Option<&str>, body: &str) -> Response {
        let mut builder = HttpResponseBuilder::new().status(status);
        if let Some(content_type) = content_type {
            builder = builder.header(header::CONTENT_TYPE, content_type);
        }

        builder.body(body.to_string()).unwrap().into()
    }

    #[tokio::test]
    async fn client_error_with_an_error_message_body_keeps_its_label() {
        let error = MyModuleHttpClientError::from_response(response(
            400,
            Some(JSON_CONTENT_TYPE),
            r#"{"label":"invalid_record","message":"container 3 does not exist"}"#,
        ))
        .await;

        assert_error_matches!(
            error,
            MyModuleHttpClientError::RemoteServerLogical(ref message)
                if message == &ErrorMessage::new(ErrorMessage::INVALID_RECORD, "container 3 does not exist")
        );
    }

    #[tokio::test]
    async fn server_error_with_a_text_body_is_labelled_with_the_status_reason() {
        let error = MyModuleHttpClientError::from_response(response(
            500,
            None,
            "an error occurred",
        ))
        .await;

        assert_error_matches!(
            error,
            MyModuleHttpClientError::RemoteServerTechnical(ref message)
                if message == &ErrorMessage::new("internal server error", "an error occurred")
        );
    }

    #[tokio::test]
    async fn json_body_that_is_not_an_error_message_is_kept_as_message() {
        let error = MyModuleHttpClientError::from_response(response(
            404,
            Some(JSON_CONTENT_TYPE),
            r#"{"foo":"bar"}"#,
        ))
        .await;

        assert_error_matches!(
            error,
            MyModuleHttpClientError::RemoteServerLogical(ref message)
                if message == &ErrorMessage::new("not found", r#"{"foo":"bar"}"#)
        );
    }

    #[tokio::test]
    async fn non_error_status_is_unhandled() {
        let error =
            MyModuleHttpClientError::from_response(response(201, None, "created")).await;

        assert_error_matches!(
            error,
            MyModuleHttpClientError::UnhandledStatusCode(StatusCode::CREATED, _)
        );
    }
}
