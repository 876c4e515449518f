//! The service contract of the module and the error taxonomy shared by its implementations.

mod error;
mod my_module_service;

pub use error::{MyModuleServiceError, ServiceResult};
#[cfg(any(test, feature = "test_tools"))]
pub use my_module_service::MockMyModuleService;
pub use my_module_service::MyModuleService;
