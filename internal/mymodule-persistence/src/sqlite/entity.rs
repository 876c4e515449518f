use sqlite::Row;
use thiserror::Error;

use super::Projection;

/// SqLite hydration error
#[derive(Error, Debug)]
pub enum HydrationError {
    /// data do not conform to expectations
    #[error("data do not conform to expectations: {0}")]
    InvalidData(String),

    /// data are missing
    #[error("some data are missing: {0}")]
    MissingData(String),

    /// inconsistent data
    #[error("data type inconsistency: {0}")]
    InconsistentType(String),
}

/// How to hydrate an entity from a SQLite result row
pub trait SqLiteEntity {
    /// Build an instance from a result row, checking the consistency of the read values.
    fn hydrate(row: Row) -> Result<Self, HydrationError>
    where
        Self: Sized;

    /// Fields read by [hydrate][SqLiteEntity::hydrate], in the order it reads them.
    fn get_projection() -> Projection;
}
