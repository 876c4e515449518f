use std::sync::Arc;

use slog::Logger;

use mymodule_common::registration::ServiceCollection;

use crate::context::MyModuleContextFactory;
use crate::manager::MyModuleManager;
use crate::{Configuration, TenantDatabases};

/// Dependencies shared by the commands of the server
pub struct DependencyContainer {
    /// Configuration structure.
    pub config: Configuration,

    /// Root logger
    pub root_logger: Logger,

    /// Connection pools of the served tenants
    pub tenant_databases: Arc<TenantDatabases>,

    /// Factory of the tenant aware data-access contexts
    pub context_factory: Arc<MyModuleContextFactory>,

    /// Installer of the module schema
    pub manager: Arc<MyModuleManager>,

    /// Services bound by the server startup hooks
    pub services: Arc<ServiceCollection>,
}
