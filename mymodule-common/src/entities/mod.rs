//! The entities used by, and exchanged between, the module services and the host.

mod module_record;
mod service_scope;

pub use module_record::{
    AuditInfo, ContainerId, ModuleRecord, NewModuleRecord, RecordId,
};
pub use service_scope::{ServiceScope, Tenant};
