//! Queries sent to the HTTP API of a `mymodule-server`
//!
//! Available queries on the module records:
//! - [List the records of a container][GetModuleRecordsQuery]
//! - [Get a record by id][GetModuleRecordQuery]
//! - [Add a record][PostModuleRecordQuery]
//! - [Update a record][PutModuleRecordQuery]
//! - [Delete a record][DeleteModuleRecordQuery]
mod api;
mod delete_module_record;
mod get_module_record;
mod get_module_records;
mod post_module_record;
mod put_module_record;

pub use api::*;
pub use delete_module_record::*;
pub use get_module_record::*;
pub use get_module_records::*;
pub use post_module_record::*;
pub use put_module_record::*;
