#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::Arc;

use chrono::Utc;
use slog::Logger;
use tokio::sync::oneshot;

use mymodule_client::{MyModuleClient, RemoteMyModuleService};
use mymodule_common::entities::{ContainerId, ServiceScope, Tenant};
use mymodule_common::services::MyModuleService;
use mymodule_common::test_utils::{TempDir, TestLogger};
use mymodule_persistence::naming::TableNaming;
use mymodule_server::{Configuration, DependenciesBuilder, DependencyContainer};

/// A `mymodule-server` serving its HTTP API on an ephemeral local port
pub struct TestServer {
    pub address: SocketAddr,
    pub dependencies: DependencyContainer,
    logger: Logger,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl TestServer {
    /// Install the module for the given tenants then start serving, the first tenant is the
    /// default one.
    pub async fn start(test_name: &str, tenants: &[&str], table_naming: TableNaming) -> Self {
        let logger = TestLogger::stdout();
        let configuration = Configuration {
            tenants: tenants.join(","),
            default_tenant: tenants[0].to_string(),
            table_naming,
            connection_pool_size: 2,
            ..Configuration::new_sample(TempDir::create("mymodule_server_integration", test_name))
        };
        let mut builder = DependenciesBuilder::new(logger.clone(), configuration);
        let dependencies = builder.build_dependency_container().unwrap();
        dependencies.manager.install_all().unwrap();
        let routes = builder.create_http_routes().unwrap();

        let (shutdown_tx, shutdown_rx) = oneshot::channel();
        let (address, server) =
            warp::serve(routes).bind_with_graceful_shutdown(([127, 0, 0, 1], 0), async {
                shutdown_rx.await.ok();
            });
        tokio::spawn(server);

        Self {
            address,
            dependencies,
            logger,
            shutdown_tx: Some(shutdown_tx),
        }
    }

    /// Url of the API of the server
    pub fn api_url(&self) -> String {
        format!("http://{}/api", self.address)
    }

    /// Remote service bound to the given scope
    pub fn remote_service(&self, scope: ServiceScope) -> Arc<dyn MyModuleService> {
        self.remote_service_at(&self.api_url(), scope)
    }

    /// Remote service bound to the given scope, sending its requests to the given url
    pub fn remote_service_at(&self, url: &str, scope: ServiceScope) -> Arc<dyn MyModuleService> {
        let client = MyModuleClient::builder(url)
            .with_logger(self.logger.clone())
            .build()
            .unwrap();

        Arc::new(RemoteMyModuleService::new(
            Arc::new(client),
            scope,
            self.logger.clone(),
        ))
    }

    /// Direct service bound to the given scope, through the services bound at startup
    pub fn direct_service(&self, scope: ServiceScope) -> Arc<dyn MyModuleService> {
        self.dependencies
            .services
            .resolve::<dyn MyModuleService>(&scope)
            .unwrap()
    }

    /// Create a host container in the database of the given tenant
    pub fn create_container(&self, tenant: &Tenant) -> ContainerId {
        self.dependencies
            .context_factory
            .create_context(tenant)
            .unwrap()
            .containers()
            .insert("MyModule", Some("host".to_string()), Utc::now())
            .unwrap()
    }

    /// Delete a host container from the database of the given tenant
    pub fn delete_container(&self, tenant: &Tenant, container_id: ContainerId) {
        let deleted = self
            .dependencies
            .context_factory
            .create_context(tenant)
            .unwrap()
            .containers()
            .delete(container_id)
            .unwrap();
        assert!(deleted, "container {container_id} should exist");
    }

    /// Stop serving
    pub fn stop(&mut self) {
        if let Some(shutdown_tx) = self.shutdown_tx.take() {
            let _ = shutdown_tx.send(());
        }
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.stop();
    }
}
