//! Database records, queries, schemas and migrations of the module.

pub mod migration;
pub mod query;
pub mod record;
pub mod schema;

#[cfg(test)]
pub(crate) mod test_helper;
