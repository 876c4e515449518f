#![warn(missing_docs)]
//! This crate provides the storage building blocks of the MyModule server:
//!
//! - a minimal entity layer on top of SQLite ([sqlite]),
//! - the tenant [naming] policies turning logical table names into physical ones,
//! - an explicit table [schema] description and the builder creating and dropping it,
//! - a versioned [migration] runner keeping an history per tenant database.

pub mod migration;
pub mod naming;
pub mod schema;
pub mod sqlite;
