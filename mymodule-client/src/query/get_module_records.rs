use async_trait::async_trait;
use reqwest::StatusCode;

use mymodule_common::entities::ContainerId;
use mymodule_common::messages::ModuleRecordListMessage;

use crate::MyModuleHttpClientResult;
use crate::query::{MyModuleQuery, QueryContext, QueryMethod};

/// Query to list the records of a container
pub struct GetModuleRecordsQuery {
    container_id: ContainerId,
}

impl GetModuleRecordsQuery {
    /// Instantiate a query listing the records of the given container
    pub fn of_container(container_id: ContainerId) -> Self {
        Self { container_id }
    }
}

#[async_trait]
impl MyModuleQuery for GetModuleRecordsQuery {
    type Response = ModuleRecordListMessage;
    type Body = ();

    fn method() -> QueryMethod {
        QueryMethod::Get
    }

    fn route(&self) -> String {
        format!("MyModule?moduleid={}", self.container_id)
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
