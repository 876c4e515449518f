//! Server side registration of the module services.

use std::sync::Arc;

use slog::{Logger, debug};

use mymodule_common::StdResult;
use mymodule_common::entities::ServiceScope;
use mymodule_common::logging::LoggerExtensions;
use mymodule_common::registration::{ServerStartup, ServiceCollection};
use mymodule_common::services::MyModuleService;

use crate::context::MyModuleContextFactory;
use crate::services::ServerMyModuleService;

/// Binds the module service contract to the [ServerMyModuleService], unless the host already
/// bound it.
pub struct MyModuleServerStartup {
    context_factory: Arc<MyModuleContextFactory>,
    logger: Logger,
}

impl MyModuleServerStartup {
    /// `MyModuleServerStartup` factory
    pub fn new(context_factory: Arc<MyModuleContextFactory>, logger: Logger) -> Self {
        Self {
            context_factory,
            logger,
        }
    }
}

impl ServerStartup for MyModuleServerStartup {
    fn configure_services(&self, services: &mut ServiceCollection) {
        let context_factory = self.context_factory.clone();
        let logger = self.logger.clone();

        let registered = services.try_add::<dyn MyModuleService>(Arc::new(
            move |scope: &ServiceScope| -> StdResult<Arc<dyn MyModuleService>> {
                Ok(Arc::new(ServerMyModuleService::new(
                    scope.clone(),
                    context_factory.clone(),
                    logger.clone(),
                )))
            },
        ));

        debug!(
            self.logger.new_with_component_name::<Self>(),
            "Server services configured"; "my_module_service_registered" => registered
        );
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;

    use mymodule_common::entities::{ContainerId, ModuleRecord, NewModuleRecord, RecordId};
    use mymodule_common::services::ServiceResult;
    use mymodule_common::test_utils::TestLogger;

    use crate::test_tools::{main_context_factory, main_tenant};

    use super::*;

    struct HostMyModuleService;

    #[async_trait]
    impl MyModuleService for HostMyModuleService {
        async fn get_records(&self, _: ContainerId) -> ServiceResult<Vec<ModuleRecord>> {
            Ok(vec![])
        }

        async fn get_record(&self, _: RecordId) -> ServiceResult<Option<ModuleRecord>> {
            Ok(None)
        }

        async fn add_record(&self, _: NewModuleRecord) -> ServiceResult<ModuleRecord> {
            unimplemented!()
        }

        async fn update_record(&self, _: ModuleRecord) -> ServiceResult<ModuleRecord> {
            unimplemented!()
        }

        async fn delete_record(&self, _: RecordId) -> ServiceResult<()> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn binds_the_direct_service_when_absent() {
        let mut services = ServiceCollection::new();
        let factory = main_context_factory();
        let container = factory
            .create_context(&main_tenant())
            .unwrap()
            .containers()
            .insert("MyModule", None, chrono::Utc::now())
            .unwrap();

        MyModuleServerStartup::new(factory, TestLogger::stdout()).configure_services(&mut services);
        let service = services
            .resolve::<dyn MyModuleService>(&ServiceScope::for_user(main_tenant(), "admin"))
            .unwrap();
        let record = service
            .add_record(NewModuleRecord::new(container, Some("through the registration")))
            .await
            .unwrap();

        assert!(services.contains::<dyn MyModuleService>());
        assert_eq!(Some("admin".to_string()), record.audit.created_by);
    }

    #[tokio::test]
    async fn keeps_an_existing_binding() {
        let mut services = ServiceCollection::new();
        services.try_add::<dyn MyModuleService>(Arc::new(
            |_: &ServiceScope| -> StdResult<Arc<dyn MyModuleService>> {
                Ok(Arc::new(HostMyModuleService))
            },
        ));

        MyModuleServerStartup::new(main_context_factory(), TestLogger::stdout())
            .configure_services(&mut services);
        let service = services
            .resolve::<dyn MyModuleService>(&ServiceScope::anonymous(main_tenant()))
            .unwrap();

        assert_eq!(1, services.len());
        // the direct service would report the absent record
        service.delete_record(7).await.unwrap();
    }
}
