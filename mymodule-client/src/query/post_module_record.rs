use async_trait::async_trait;
use reqwest::StatusCode;

use mymodule_common::messages::{ModuleRecordMessage, NewModuleRecordMessage};

use crate::MyModuleHttpClientResult;
use crate::query::{MyModuleQuery, QueryContext, QueryMethod};

/// Query to add a record
pub struct PostModuleRecordQuery {
    message: NewModuleRecordMessage,
}

impl PostModuleRecordQuery {
    /// Instantiate a query to add the given record
    pub fn new(message: NewModuleRecordMessage) -> Self {
        Self { message }
    }
}

#[async_trait]
impl MyModuleQuery for PostModuleRecordQuery {
    type Response = ModuleRecordMessage;
    type Body = NewModuleRecordMessage;

    fn method() -> QueryMethod {
        QueryMethod::Post
    }

    fn route(&self) -> String {
        "MyModule".to_string()
    }

    fn body(&self) -> Option<Self::Body> {
        Some(self.message.clone())
    }

    async fn handle_response(
        &self,
        context: QueryContext,
    ) -> MyModuleHttpClientResult<Self::Response> {
        match context.response.status() {
            StatusCode::CREATED => context.parse_json().await,
            _ => Err(context.unhandled_status_code().await),
        }
    }
}
