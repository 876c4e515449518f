//! Messages module
//! This module aims at providing shared structures for the HTTP API messages.

mod error;
mod module_record;

pub use error::ErrorMessage;
pub use module_record::{ModuleRecordListMessage, ModuleRecordMessage, NewModuleRecordMessage};
