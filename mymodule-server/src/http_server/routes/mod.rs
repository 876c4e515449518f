mod middlewares;
mod my_module_routes;
pub(crate) mod reply;
pub mod router;

pub(crate) fn http_server_child_logger(logger: &slog::Logger) -> slog::Logger {
    use mymodule_common::logging::LoggerExtensions;
    logger.new_with_name("http_server")
}
