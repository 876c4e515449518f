use std::sync::Arc;

use slog::{Logger, debug};
use warp::Filter;

use mymodule_common::logging::LoggerExtensions;
use mymodule_common::registration::{ServerStartup, ServiceCollection};
use mymodule_persistence::naming::TableNamePolicy;

use crate::context::MyModuleContextFactory;
use crate::dependency_injection::{DependenciesBuilderError, DependencyContainer, Result};
use crate::http_server::router::{self, RouterConfig, RouterState};
use crate::manager::MyModuleManager;
use crate::startup::MyModuleServerStartup;
use crate::{Configuration, TenantDatabases};

/// Dependencies container builder
pub struct DependenciesBuilder {
    /// Configuration parameters
    pub configuration: Configuration,

    /// Root logger
    pub root_logger: Logger,

    /// Connection pools of the served tenants
    pub tenant_databases: Option<Arc<TenantDatabases>>,

    /// Table naming policy
    pub table_naming: Option<Arc<dyn TableNamePolicy>>,

    /// Context factory
    pub context_factory: Option<Arc<MyModuleContextFactory>>,

    /// Module manager
    pub manager: Option<Arc<MyModuleManager>>,

    /// Service collection
    pub services: Option<Arc<ServiceCollection>>,
}

impl DependenciesBuilder {
    /// Create a new clean dependency builder
    pub fn new(root_logger: Logger, configuration: Configuration) -> Self {
        Self {
            configuration,
            root_logger,
            tenant_databases: None,
            table_naming: None,
            context_factory: None,
            manager: None,
            services: None,
        }
    }

    fn build_tenant_databases(&mut self) -> Result<Arc<TenantDatabases>> {
        let databases = TenantDatabases::open(&self.configuration, &self.root_logger).map_err(
            |e| DependenciesBuilderError::Initialization {
                message: "Could not open the tenant databases".to_string(),
                error: Some(e),
            },
        )?;

        Ok(Arc::new(databases))
    }

    /// Get the connection pools of the served tenants
    pub fn get_tenant_databases(&mut self) -> Result<Arc<TenantDatabases>> {
        if self.tenant_databases.is_none() {
            self.tenant_databases = Some(self.build_tenant_databases()?);
        }

        Ok(self.tenant_databases.as_ref().cloned().unwrap())
    }

    fn build_table_naming(&mut self) -> Result<Arc<dyn TableNamePolicy>> {
        Ok(self.configuration.table_naming.policy())
    }

    /// Get the table naming policy
    pub fn get_table_naming(&mut self) -> Result<Arc<dyn TableNamePolicy>> {
        if self.table_naming.is_none() {
            self.table_naming = Some(self.build_table_naming()?);
        }

        Ok(self.table_naming.as_ref().cloned().unwrap())
    }

    fn build_context_factory(&mut self) -> Result<Arc<MyModuleContextFactory>> {
        Ok(Arc::new(MyModuleContextFactory::new(
            self.get_tenant_databases()?,
            self.get_table_naming()?,
            self.root_logger.clone(),
        )))
    }

    /// Get the context factory
    pub fn get_context_factory(&mut self) -> Result<Arc<MyModuleContextFactory>> {
        if self.context_factory.is_none() {
            self.context_factory = Some(self.build_context_factory()?);
        }

        Ok(self.context_factory.as_ref().cloned().unwrap())
    }

    fn build_manager(&mut self) -> Result<Arc<MyModuleManager>> {
        Ok(Arc::new(MyModuleManager::new(
            self.get_tenant_databases()?,
            self.get_table_naming()?,
            self.root_logger.clone(),
        )))
    }

    /// Get the module manager
    pub fn get_manager(&mut self) -> Result<Arc<MyModuleManager>> {
        if self.manager.is_none() {
            self.manager = Some(self.build_manager()?);
        }

        Ok(self.manager.as_ref().cloned().unwrap())
    }

    fn build_services(&mut self) -> Result<Arc<ServiceCollection>> {
        let mut services = ServiceCollection::new();
        MyModuleServerStartup::new(self.get_context_factory()?, self.root_logger.clone())
            .configure_services(&mut services);
        debug!(
            self.root_logger.new_with_component_name::<Self>(),
            "Services configured"; "bound_services" => services.len()
        );

        Ok(Arc::new(services))
    }

    /// Get the services bound by the startup hooks
    pub fn get_services(&mut self) -> Result<Arc<ServiceCollection>> {
        if self.services.is_none() {
            self.services = Some(self.build_services()?);
        }

        Ok(self.services.as_ref().cloned().unwrap())
    }

    /// Return an unconfigured [DependencyContainer]
    pub fn build_dependency_container(&mut self) -> Result<DependencyContainer> {
        Ok(DependencyContainer {
            config: self.configuration.clone(),
            root_logger: self.root_logger.clone(),
            tenant_databases: self.get_tenant_databases()?,
            context_factory: self.get_context_factory()?,
            manager: self.get_manager()?,
            services: self.get_services()?,
        })
    }

    /// Create the HTTP routes for the server
    pub fn create_http_routes(
        &mut self,
    ) -> Result<impl Filter<Extract = (impl warp::Reply + use<>,), Error = warp::Rejection> + Clone + use<>>
    {
        let default_tenant = self.configuration.default_tenant()?;
        let router_state = RouterState::new(
            self.get_services()?,
            self.root_logger.clone(),
            RouterConfig { default_tenant },
        );

        Ok(router::routes(Arc::new(router_state)))
    }
}
