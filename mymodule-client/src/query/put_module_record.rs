use async_trait::async_trait;
use reqwest::StatusCode;

use mymodule_common::messages::ModuleRecordMessage;

use crate::MyModuleHttpClientResult;
use crate::query::{MyModuleQuery, QueryContext, QueryMethod};

/// Query to update a record
pub struct PutModuleRecordQuery {
    message: ModuleRecordMessage,
}

impl PutModuleRecordQuery {
    /// Instantiate a query to update the given record
    pub fn new(message: ModuleRecordMessage) -> Self {
        Self { message }
    }
}

#[async_trait]
impl MyModuleQuery for PutModuleRecordQuery {
    type Response = ModuleRecordMessage;
    type Body = ModuleRecordMessage;

    fn method() -> QueryMethod {
        QueryMethod::Put
    }

    fn route(&self) -> String {
        format!("MyModule/{}", self.message.my_module_id)
    }

    fn body(&self) -> Option<Self::Body> {
        Some(self.message.clone())
    }

    async fn handle_response(
        &self,
        context: QueryContext,
    ) -> MyModuleHttpClientResult<Self::Response> {
        match context.response.status() {
            StatusCode::OK => context.parse_json().await,
            _ => Err(context.unhandled_status_code().await),
        }
    }
}
