use std::sync::Arc;

use slog::{Logger, warn};
use warp::http::Method;
use warp::{Filter, Rejection, Reply};

use mymodule_common::entities::Tenant;
use mymodule_common::messages::ErrorMessage;
use mymodule_common::registration::ServiceCollection;

use crate::http_server::SERVER_BASE_PATH;
use crate::http_server::routes::middlewares::ServiceResolutionError;
use crate::http_server::routes::{http_server_child_logger, middlewares, my_module_routes, reply};

/// HTTP Server configuration
pub struct RouterConfig {
    /// Tenant targeted by the requests without a tenant header
    pub default_tenant: Tenant,
}

#[cfg(test)]
impl RouterConfig {
    pub fn dummy() -> Self {
        Self {
            default_tenant: Tenant::new("main"),
        }
    }
}

/// Shared state available to all routes
pub struct RouterState {
    /// Services bound by the startup hooks, resolved per request scope
    pub services: Arc<ServiceCollection>,
    /// Logger from which the route loggers are derived
    pub root_logger: Logger,
    /// Configuration of the router
    pub configuration: RouterConfig,
}

impl RouterState {
    /// `RouterState` factory
    pub fn new(
        services: Arc<ServiceCollection>,
        root_logger: Logger,
        configuration: RouterConfig,
    ) -> Self {
        Self {
            services,
            root_logger,
            configuration,
        }
    }

    #[cfg(test)]
    pub fn new_with_dummy_config() -> Self {
        Self::new_with_services(ServiceCollection::new())
    }

    #[cfg(test)]
    pub fn new_with_services(services: ServiceCollection) -> Self {
        Self::new(
            Arc::new(services),
            mymodule_common::test_utils::TestLogger::stdout(),
            RouterConfig::dummy(),
        )
    }
}

/// Routes
pub fn routes(
    state: Arc<RouterState>,
) -> impl Filter<Extract = (impl warp::Reply,), Error = warp::Rejection> + Clone {
    let cors = warp::cors()
        .allow_any_origin()
        .allow_headers(vec![
            "content-type",
            mymodule_common::MYMODULE_TENANT_HEADER,
            mymodule_common::MYMODULE_USER_HEADER,
        ])
        .allow_methods(vec![
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ]);
    let logger = http_server_child_logger(&state.root_logger);

    warp::any()
        .and(warp::path(SERVER_BASE_PATH))
        .and(my_module_routes::routes(&state).with(cors))
        .recover(move |rejection: Rejection| handle_custom(logger.clone(), rejection))
        .with(middlewares::log_route_call(&state))
}

/// Turn the rejections raised by the filters into [ErrorMessage] replies
pub async fn handle_custom(logger: Logger, reject: Rejection) -> Result<impl Reply, Rejection> {
    if let Some(error) = reject.find::<warp::reject::InvalidQuery>() {
        Ok(reply::bad_request(
            ErrorMessage::INVALID_RECORD.to_string(),
            error.to_string(),
        ))
    } else if let Some(error) = reject.find::<warp::filters::body::BodyDeserializeError>() {
        Ok(reply::bad_request(
            ErrorMessage::INVALID_RECORD.to_string(),
            error.to_string(),
        ))
    } else if let Some(ServiceResolutionError(error)) = reject.find::<ServiceResolutionError>() {
        warn!(logger, "router::service_resolution_error"; "error" => error);
        Ok(reply::internal_server_error(
            ErrorMessage::INTERNAL_ERROR,
            error.clone(),
        ))
    } else {
        Err(reject)
    }
}
