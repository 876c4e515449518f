use async_trait::async_trait;
use reqwest::StatusCode;

use mymodule_common::entities::RecordId;
use mymodule_common::messages::{ErrorMessage, ModuleRecordMessage};

use crate::{MyModuleHttpClientError, MyModuleHttpClientResult};
use crate::query::{MyModuleQuery, QueryContext, QueryMethod};

/// Query to get a record by its id
pub struct GetModuleRecordQuery {
    id: RecordId,
}

impl GetModuleRecordQuery {
    /// Instantiate a query to get the record with the given id
    pub fn by_id(id: RecordId) -> Self {
        Self { id }
    }
}

#[async_trait]
impl MyModuleQuery for GetModuleRecordQuery {
    type Response = Option<ModuleRecordMessage>;
    type Body = ();

    fn method() -> QueryMethod {
        QueryMethod::Get
    }

    fn route(&self) -> String {
        format!("MyModule/{}", self.id)
    }

    async fn handle_response(
        &self,
        context: QueryContext,
    ) -> MyModuleHttpClientResult<Self::Response> {
        match context.response.status() {
            StatusCode::OK => context.parse_json().await.map(Some),
            StatusCode::NOT_FOUND => match context.unhandled_status_code().await {
                MyModuleHttpClientError::RemoteServerLogical(message)
                    if message.label == ErrorMessage::RECORD_NOT_FOUND =>
                {
                    Ok(None)
                }
                error => Err(error),
            },
            _ => Err(context.unhandled_status_code().await),
        }
    }
}
