use serde::Deserialize;
use warp::Filter;

use mymodule_common::entities::{ContainerId, RecordId};

use crate::http_server::routes::middlewares;
use crate::http_server::routes::router::RouterState;

/// Query string of the record listing
#[derive(Debug, Deserialize)]
pub(crate) struct ListRecordsParams {
    moduleid: ContainerId,
}

pub fn routes(
    router_state: &RouterState,
) -> impl Filter<Extract = (impl warp::Reply + use<>,), Error = warp::Rejection> + Clone + use<> {
    list_records(router_state)
        .or(get_record(router_state))
        .or(add_record(router_state))
        .or(update_record(router_state))
        .or(delete_record(router_state))
}

/// GET /MyModule?moduleid={container_id}
fn list_records(
    router_state: &RouterState,
) -> impl Filter<Extract = (impl warp::Reply + use<>,), Error = warp::Rejection> + Clone + use<> {
    warp::path!("MyModule")
        .and(warp::get())
        .and(warp::query::<ListRecordsParams>())
        .and(middlewares::with_logger(router_state))
        .and(middlewares::with_my_module_service(router_state))
        .and_then(handlers::list_records)
}

/// GET /MyModule/{id}
fn get_record(
    router_state: &RouterState,
) -> impl Filter<Extract = (impl warp::Reply + use<>,), Error = warp::Rejection> + Clone + use<> {
    warp::path!("MyModule" / RecordId)
        .and(warp::get())
        .and(middlewares::with_logger(router_state))
        .and(middlewares::with_my_module_service(router_state))
        .and_then(handlers::get_record)
}

/// POST /MyModule
fn add_record(
    router_state: &RouterState,
) -> impl Filter<Extract = (impl warp::Reply + use<>,), Error = warp::Rejection> + Clone + use<> {
    warp::path!("MyModule")
        .and(warp::post())
        .and(warp::body::json())
        .and(middlewares::with_logger(router_state))
        .and(middlewares::with_my_module_service(router_state))
        .and_then(handlers::add_record)
}

/// PUT /MyModule/{id}
fn update_record(
    router_state: &RouterState,
) -> impl Filter<Extract = (impl warp::Reply + use<>,), Error = warp::Rejection> + Clone + use<> {
    warp::path!("MyModule" / RecordId)
        .and(warp::put())
        .and(warp::body::json())
        .and(middlewares::with_logger(router_state))
        .and(middlewares::with_my_module_service(router_state))
        .and_then(handlers::update_record)
}

/// DELETE /MyModule/{id}
fn delete_record(
    router_state: &RouterState,
) -> impl Filter<Extract = (impl warp::Reply + use<>,), Error = warp::Rejection> + Clone + use<> {
    warp::path!("MyModule" / RecordId)
        .and(warp::delete())
        .and(middlewares::with_logger(router_state))
        .and(middlewares::with_my_module_service(router_state))
        .and_then(handlers::delete_record)
}

mod handlers {
    use std::convert::Infallible;
    use std::sync::Arc;

    use slog::{Logger, debug, warn};
    use warp::http::StatusCode;

    use mymodule_common::entities::RecordId;
    use mymodule_common::messages::{
        ErrorMessage, ModuleRecordListMessage, ModuleRecordMessage, NewModuleRecordMessage,
    };
    use mymodule_common::services::MyModuleService;

    use crate::http_server::routes::reply;

    use super::ListRecordsParams;

    /// List the records of a container
    pub async fn list_records(
        params: ListRecordsParams,
        logger: Logger,
        service: Arc<dyn MyModuleService>,
    ) -> Result<impl warp::Reply, Infallible> {
        match service.get_records(params.moduleid).await {
            Ok(records) => {
                let message: ModuleRecordListMessage =
                    records.into_iter().map(Into::into).collect();
                Ok(reply::json(&message, StatusCode::OK))
            }
            Err(err) => {
                warn!(logger, "list_records::error"; "error" => ?err);
                Ok(reply::service_error(err))
            }
        }
    }

    /// Get a record
    pub async fn get_record(
        id: RecordId,
        logger: Logger,
        service: Arc<dyn MyModuleService>,
    ) -> Result<impl warp::Reply, Infallible> {
        match service.get_record(id).await {
            Ok(Some(record)) => Ok(reply::json(
                &ModuleRecordMessage::from(record),
                StatusCode::OK,
            )),
            Ok(None) => Ok(reply::not_found(
                ErrorMessage::RECORD_NOT_FOUND.to_string(),
                format!("record {id} does not exist"),
            )),
            Err(err) => {
                warn!(logger, "get_record::error"; "error" => ?err);
                Ok(reply::service_error(err))
            }
        }
    }

    /// Add a record
    pub async fn add_record(
        message: NewModuleRecordMessage,
        logger: Logger,
        service: Arc<dyn MyModuleService>,
    ) -> Result<impl warp::Reply, Infallible> {
        debug!(logger, "POST /MyModule"; "message" => ?message);

        match service.add_record(message.into()).await {
            Ok(record) => Ok(reply::json(
                &ModuleRecordMessage::from(record),
                StatusCode::CREATED,
            )),
            Err(err) => {
                warn!(logger, "add_record::error"; "error" => ?err);
                Ok(reply::service_error(err))
            }
        }
    }

    /// Update a record
    pub async fn update_record(
        id: RecordId,
        message: ModuleRecordMessage,
        logger: Logger,
        service: Arc<dyn MyModuleService>,
    ) -> Result<impl warp::Reply, Infallible> {
        debug!(logger, "PUT /MyModule/{id}"; "message" => ?message);

        if message.my_module_id != id {
            warn!(logger, "update_record::id_mismatch"; "path_id" => id, "body_id" => message.my_module_id);
            return Ok(reply::bad_request(
                ErrorMessage::INVALID_RECORD.to_string(),
                format!(
                    "record id {} does not match the path id {id}",
                    message.my_module_id
                ),
            ));
        }

        match service.update_record(message.into()).await {
            Ok(record) => Ok(reply::json(
                &ModuleRecordMessage::from(record),
                StatusCode::OK,
            )),
            Err(err) => {
                warn!(logger, "update_record::error"; "error" => ?err);
                Ok(reply::service_error(err))
            }
        }
    }

    /// Delete a record
    pub async fn delete_record(
        id: RecordId,
        logger: Logger,
        service: Arc<dyn MyModuleService>,
    ) -> Result<impl warp::Reply, Infallible> {
        match service.delete_record(id).await {
            Ok(()) => Ok(reply::empty(StatusCode::NO_CONTENT)),
            Err(err) => {
                warn!(logger, "delete_record::error"; "error" => ?err);
                Ok(reply::service_error(err))
            }
        }
    }
}
