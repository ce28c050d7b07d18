//! In-memory repositories.
//!
//! Used when no database is configured and by tests. They honour the same
//! contract as the PostgreSQL repositories: ids ascend from 1, `list` is
//! ordered by id, and unique names are enforced with the same constraint
//! names.

use std::collections::BTreeMap;

use workshop_core::types::DbId;

use crate::repository::Page;

pub mod movie_repo;
pub mod user_repo;

pub use movie_repo::MemoryMovieRepo;
pub use user_repo::MemoryUserRepo;

/// A single id-keyed table.
#[derive(Debug)]
struct Table<T> {
    next_id: DbId,
    rows: BTreeMap<DbId, T>,
}

impl<T: Clone> Table<T> {
    fn allocate_id(&mut self) -> DbId {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    fn page(&self, page: Page) -> Vec<T> {
        let offset = usize::try_from(page.offset).unwrap_or(usize::MAX);
        let limit = usize::try_from(page.limit).unwrap_or(0);
        self.rows.values().skip(offset).take(limit).cloned().collect()
    }
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Self {
            next_id: 1,
            rows: BTreeMap::new(),
        }
    }
}
