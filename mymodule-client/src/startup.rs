use std::sync::Arc;

use slog::{Logger, debug};

use mymodule_common::StdResult;
use mymodule_common::entities::ServiceScope;
use mymodule_common::logging::LoggerExtensions;
use mymodule_common::registration::{ClientStartup, ServiceCollection};
use mymodule_common::services::MyModuleService;

use crate::{MyModuleClient, RemoteMyModuleService};

/// Binds the module service contract to the [RemoteMyModuleService], unless the host already
/// bound it.
pub struct MyModuleClientStartup {
    client: Arc<MyModuleClient>,
    logger: Logger,
}

impl MyModuleClientStartup {
    /// `MyModuleClientStartup` factory
    pub fn new(client: Arc<MyModuleClient>, logger: Logger) -> Self {
        Self { client, logger }
    }
}

impl ClientStartup for MyModuleClientStartup {
    fn configure_services(&self, services: &mut ServiceCollection) {
        let client = self.client.clone();
        let logger = self.logger.clone();

        let registered = services.try_add::<dyn MyModuleService>(Arc::new(
            move |scope: &ServiceScope| -> StdResult<Arc<dyn MyModuleService>> {
                Ok(Arc::new(RemoteMyModuleService::new(
                    client.clone(),
                    scope.clone(),
                    logger.clone(),
                )))
            },
        ));

        debug!(
            self.logger.new_with_component_name::<Self>(),
            "Client services configured"; "my_module_service_registered" => registered
        );
    }
}
