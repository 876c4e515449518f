#![warn(missing_docs)]

//! Shared datatypes and traits used by the MyModule crates.
//!
//! Provide:
//! - The [entities] persisted by the module and exchanged with the host.
//! - The [messages] sent over HTTP between the remote service and the server.
//! - The [service contract][services] implemented by the direct and remote services,
//!   along with the error taxonomy both implementations share.
//! - The [module descriptor][module_info] consumed by the host at startup.
//! - A [service registration][registration] mapping used by the startup hooks.

pub mod entities;
pub mod logging;
pub mod messages;
pub mod module_info;
pub mod registration;
pub mod services;

#[cfg(any(test, feature = "test_tools"))]
pub mod test_utils;

/// Generic error type
pub type StdError = anyhow::Error;

/// Generic result type
pub type StdResult<T> = anyhow::Result<T, StdError>;

/// Header carrying the name of the tenant a request targets.
pub const MYMODULE_TENANT_HEADER: &str = "x-mymodule-tenant";

/// Header carrying the identity of the user issuing a request, written in the audit fields.
pub const MYMODULE_USER_HEADER: &str = "x-mymodule-user";
