use std::marker::PhantomData;

use anyhow::Context;
use sqlite::CursorWithOwnership;

use mymodule_common::StdResult;

use super::SqLiteEntity;

/// Database query result Iterator wrapper. This wrapper allows to call entity
/// hydration for each extracted result.
pub struct EntityCursor<'a, T> {
    cursor: CursorWithOwnership<'a>,
    phantom: PhantomData<T>,
}

impl<'a, T> EntityCursor<'a, T> {
    /// [EntityCursor] constructor.
    pub fn new(cursor: CursorWithOwnership<'a>) -> Self {
        Self {
            cursor,
            phantom: PhantomData,
        }
    }
}

impl<T> Iterator for EntityCursor<'_, T>
where
    T: SqLiteEntity,
{
    type Item = StdResult<T>;

    fn next(&mut self) -> Option<Self::Item> {
        self.cursor.next().map(|row| {
            let row = row.with_context(|| "Could not read the next row of the query result")?;
            let entity = T::hydrate(row).with_context(|| {
                format!("Could not hydrate a '{}'", std::any::type_name::<T>())
            })?;

            Ok(entity)
        })
    }
}
