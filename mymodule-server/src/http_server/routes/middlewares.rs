use std::convert::Infallible;
use std::sync::Arc;

use slog::{Logger, debug};
use warp::Filter;
use warp::reject::Reject;

use mymodule_common::entities::{ServiceScope, Tenant};
use mymodule_common::services::MyModuleService;
use mymodule_common::{MYMODULE_TENANT_HEADER, MYMODULE_USER_HEADER};

use crate::http_server::routes::http_server_child_logger;
use crate::http_server::routes::router::RouterState;

/// Rejection raised when no service is bound for a request scope
#[derive(Debug)]
pub struct ServiceResolutionError(pub String);

impl Reject for ServiceResolutionError {}

/// With logger middleware
pub(crate) fn with_logger(
    router_state: &RouterState,
) -> impl Filter<Extract = (Logger,), Error = Infallible> + Clone + use<> {
    let logger = http_server_child_logger(&router_state.root_logger);
    warp::any().map(move || logger.clone())
}

/// Log to apply each time a route is called
///
/// Example of log produced: `POST /api/MyModule 201 Created`
pub(crate) fn log_route_call(
    router_state: &RouterState,
) -> warp::log::Log<impl Fn(warp::log::Info<'_>) + Clone + use<>> {
    let logger = http_server_child_logger(&router_state.root_logger);
    warp::log::custom(move |info| {
        debug!(
            logger,
            "{} {} {}",
            info.method(),
            info.path(),
            info.status()
        )
    })
}

/// With service scope middleware
///
/// The tenant header falls back to the configured default tenant, a missing user header
/// yields an anonymous scope.
pub(crate) fn with_service_scope(
    router_state: &RouterState,
) -> impl Filter<Extract = (ServiceScope,), Error = warp::Rejection> + Clone + use<> {
    let default_tenant = router_state.configuration.default_tenant.clone();
    warp::header::optional::<String>(MYMODULE_TENANT_HEADER)
        .and(warp::header::optional::<String>(MYMODULE_USER_HEADER))
        .map(move |tenant: Option<String>, user: Option<String>| {
            let tenant = tenant
                .filter(|name| !name.trim().is_empty())
                .map(|name| Tenant::new(name.trim()))
                .unwrap_or_else(|| default_tenant.clone());

            ServiceScope {
                tenant,
                user: user.filter(|user| !user.is_empty()),
            }
        })
}

/// With my module service middleware, resolved for the scope of the request
pub(crate) fn with_my_module_service(
    router_state: &RouterState,
) -> impl Filter<Extract = (Arc<dyn MyModuleService>,), Error = warp::Rejection> + Clone + use<> {
    let services = router_state.services.clone();
    with_service_scope(router_state).and_then(move |scope: ServiceScope| {
        let services = services.clone();
        async move {
            services
                .resolve::<dyn MyModuleService>(&scope)
                .map_err(|err| warp::reject::custom(ServiceResolutionError(format!("{err:?}"))))
        }
    })
}
