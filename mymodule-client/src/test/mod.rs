use chrono::{TimeZone, Utc};
use httpmock::MockServer;

use mymodule_common::messages::ModuleRecordMessage;
use mymodule_common::test_utils::TestLogger;

use crate::MyModuleClient;

/// Mock server and a client targeting its `/api` path
pub(crate) fn setup_server_and_client() -> (MockServer, MyModuleClient) {
    let server = MockServer::start();
    let client = MyModuleClient::builder(server.url("/api"))
        .with_logger(TestLogger::stdout())
        .build()
        .unwrap();

    (server, client)
}

/// A record message with fixed audit fields
pub(crate) fn dummy_record_message(id: i64, container_id: i64) -> ModuleRecordMessage {
    let date = Utc.timestamp_opt(1_700_000_000, 0).unwrap();

    ModuleRecordMessage {
        my_module_id: id,
        module_id: container_id,
        name: Some(format!("record {id}")),
        created_by: Some("admin".to_string()),
        created_on: date,
        modified_by: Some("admin".to_string()),
        modified_on: date,
        is_deleted: false,
    }
}
