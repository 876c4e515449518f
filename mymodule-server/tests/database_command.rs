use std::path::Path;

use clap::Parser;

use mymodule_common::test_utils::{TempDir, TestLogger};
use mymodule_persistence::sqlite::{ConnectionBuilder, ConnectionExtensions};
use mymodule_server::MainOpts;

fn write_config(config_directory: &Path, data_stores_directory: &Path) {
    let config = serde_json::json!({
        "data_stores_directory": data_stores_directory,
        "tenants": "acme,globex",
        "default_tenant": "acme",
        "table_naming": "tenant_prefix",
    });
    std::fs::write(config_directory.join("integration.json"), config.to_string()).unwrap();
}

fn module_table_count(database: &Path, table: &str) -> i64 {
    let connection = ConnectionBuilder::open_file(database).build().unwrap();
    connection
        .query_single_cell::<_, i64>(
            "select count(*) from sqlite_master where type = 'table' and name = ?1",
            &[table.into()],
        )
        .unwrap()
}

async fn run(config_directory: &Path, args: &[&str]) {
    let config_directory = config_directory.to_string_lossy().to_string();
    let mut command_line = vec![
        "mymodule-server",
        "--run-mode",
        "integration",
        "--config-directory",
        config_directory.as_str(),
    ];
    command_line.extend_from_slice(args);

    MainOpts::try_parse_from(command_line)
        .unwrap()
        .execute(TestLogger::stdout())
        .await
        .unwrap();
}

#[tokio::test]
async fn migrate_then_rollback_one_tenant() {
    let root = TempDir::create("mymodule_server_integration", "migrate_then_rollback_one_tenant");
    let stores = root.join("stores");
    write_config(&root, &stores);

    run(&root, &["database", "migrate"]).await;

    assert_eq!(1, module_table_count(&stores.join("acme.sqlite3"), "acme_TheCompanyMyModule"));
    assert_eq!(
        1,
        module_table_count(&stores.join("globex.sqlite3"), "globex_TheCompanyMyModule")
    );

    run(&root, &["database", "rollback", "--tenant", "globex"]).await;

    assert_eq!(1, module_table_count(&stores.join("acme.sqlite3"), "acme_TheCompanyMyModule"));
    assert_eq!(
        0,
        module_table_count(&stores.join("globex.sqlite3"), "globex_TheCompanyMyModule")
    );
    assert_eq!(1, module_table_count(&stores.join("globex.sqlite3"), "globex_Module"));
}
