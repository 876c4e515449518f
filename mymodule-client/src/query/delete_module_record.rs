use async_trait::async_trait;
use reqwest::StatusCode;

use mymodule_common::entities::RecordId;

use crate::MyModuleHttpClientResult;
use crate::query::{MyModuleQuery, QueryContext, QueryMethod};

/// Query to delete a record
pub struct DeleteModuleRecordQuery {
    id: RecordId,
}

impl DeleteModuleRecordQuery {
    /// Instantiate a query to delete the record with the given id
    pub fn by_id(id: RecordId) -> Self {
        Self { id }
    }
}

#[async_trait]
impl MyModuleQuery for DeleteModuleRecordQuery {
    type Response = ();
    type Body = ();

    fn method() -> QueryMethod {
        QueryMethod::Delete
    }

    fn route(&self) -> String {
        format!("MyModule/{}", self.id)
    }

    async fn handle_response(
        &self,
        context: QueryContext,
    ) -> MyModuleHttpClientResult<Self::Response> {
        match context.response.status() {
            StatusCode::NO_CONTENT | StatusCode::OK => Ok(()),
            _ => Err(context.unhandled_status_code().await),
        }
    }
}
