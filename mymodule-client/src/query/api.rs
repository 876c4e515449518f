use std::fmt::{Display, Formatter};

use anyhow::anyhow;
use reqwest::Response;
use serde::de::DeserializeOwned;
use slog::Logger;

use crate::MyModuleHttpClientResult;
use crate::error::MyModuleHttpClientError;

/// HTTP method of a query
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryMethod {
    /// GET
    Get,
    /// POST
    Post,
    /// PUT
    Put,
    /// DELETE
    Delete,
}

impl Display for QueryMethod {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            QueryMethod::Get => write!(f, "GET"),
            QueryMethod::Post => write!(f, "POST"),
            QueryMethod::Put => write!(f, "PUT"),
            QueryMethod::Delete => write!(f, "DELETE"),
        }
    }
}

/// A request to the API and the handling of its response
#[async_trait::async_trait]
pub trait MyModuleQuery: Send + Sync {
    /// Type of the value extracted from the response
    type Response: DeserializeOwned;

    /// Type of the JSON body sent
    type Body: serde::Serialize + Sized;

    /// HTTP method of the query
    fn method() -> QueryMethod;

    /// Route of the query, relative to the API url
    fn route(&self) -> String;

    /// Body of the query, none by default
    fn body(&self) -> Option<Self::Body> {
        None
    }

    /// Extract the query result from the response
    async fn handle_response(
        &self,
        context: QueryContext,
    ) -> MyModuleHttpClientResult<Self::Response>;
}

/// Response of a query along with the client logger
pub struct QueryContext {
    pub(crate) response: Response,
    pub(crate) logger: Logger,
}

impl QueryContext {
    /// Turn a response with a status the query does not handle into an error
    pub async fn unhandled_status_code(self) -> MyModuleHttpClientError {
        MyModuleHttpClientError::from_response(self.response).await
    }

    /// Deserialize the JSON body of the response
    ///
    /// A body that could not be fully read is reported as a transport failure.
    pub async fn parse_json<T: DeserializeOwned>(self) -> MyModuleHttpClientResult<T> {
        self.response.json::<T>().await.map_err(|err| {
            if err.is_timeout() || err.is_body() {
                slog::debug!(self.logger, "Could not read response body"; "error" => %err);
                MyModuleHttpClientError::unreachable(err)
            } else {
                slog::debug!(self.logger, "Could not parse response body"; "error" => %err);
                MyModuleHttpClientError::JsonParseFailed(anyhow!(err))
            }
        })
    }
}
