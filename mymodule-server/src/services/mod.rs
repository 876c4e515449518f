//! Services of the module running in the server.

mod my_module_service;

pub use my_module_service::ServerMyModuleService;
