#![warn(missing_docs)]

//! Remote implementation of the MyModule service contract.
//!
//! The [RemoteMyModuleService] sends every operation to the HTTP API of a `mymodule-server`
//! through a [MyModuleClient], and maps the error replies back to the
//! [error taxonomy][mymodule_common::services::MyModuleServiceError] shared with the direct
//! implementation. The [MyModuleClientStartup] hook binds it in a host service collection.

mod builder;
mod client;
mod error;
pub mod query;
mod service;
mod startup;
#[cfg(test)]
pub(crate) mod test;

pub use builder::MyModuleClientBuilder;
pub use client::MyModuleClient;
pub use error::MyModuleHttpClientError;
pub use service::RemoteMyModuleService;
pub use startup::MyModuleClientStartup;

/// Result type of the [MyModuleClient] queries
pub type MyModuleHttpClientResult<T> = Result<T, MyModuleHttpClientError>;
