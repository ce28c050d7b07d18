use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use workshop_core::types::DbId;

use super::Table;
use crate::error::StoreError;
use crate::models::user::{CreateUser, UpdateUser, User};
use crate::repository::{Page, Repository};

const NAME_CONSTRAINT: &str = "uq_users_name";

#[derive(Debug, Default)]
pub struct MemoryUserRepo {
    table: RwLock<Table<User>>,
}

impl MemoryUserRepo {
    pub fn new() -> Self {
        Self::default()
    }
}

fn name_taken(table: &Table<User>, name: &str, except: Option<DbId>) -> bool {
    table
        .rows
        .values()
        .any(|u| u.name == name && Some(u.id) != except)
}

#[async_trait]
impl Repository for MemoryUserRepo {
    type Entity = User;
    type Create = CreateUser;
    type Update = UpdateUser;

    async fn list(&self, page: Page) -> Result<Vec<User>, StoreError> {
        Ok(self.table.read().await.page(page))
    }

    async fn find_by_id(&self, id: DbId) -> Result<Option<User>, StoreError> {
        Ok(self.table.read().await.rows.get(&id).cloned())
    }

    async fn create(&self, input: &CreateUser) -> Result<User, StoreError> {
        let mut table = self.table.write().await;
        if name_taken(&table, &input.name, None) {
            return Err(StoreError::Conflict {
                constraint: NAME_CONSTRAINT.to_string(),
            });
        }

        let now = Utc::now();
        let user = User {
            id: table.allocate_id(),
            name: input.name.clone(),
            age: input.age,
            created_at: now,
            updated_at: now,
        };
        table.rows.insert(user.id, user.clone());
        Ok(user)
    }

    async fn update(&self, id: DbId, input: &UpdateUser) -> Result<Option<User>, StoreError> {
        let mut table = self.table.write().await;
        if let Some(name) = &input.name {
            if table.rows.contains_key(&id) && name_taken(&table, name, Some(id)) {
                return Err(StoreError::Conflict {
                    constraint: NAME_CONSTRAINT.to_string(),
                });
            }
        }

        let Some(user) = table.rows.get_mut(&id) else {
            return Ok(None);
        };
        if let Some(name) = &input.name {
            user.name = name.clone();
        }
        if let Some(age) = input.age {
            user.age = age;
        }
        user.updated_at = Utc::now();
        Ok(Some(user.clone()))
    }

    async fn delete(&self, id: DbId) -> Result<bool, StoreError> {
        Ok(self.table.write().await.rows.remove(&id).is_some())
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    fn input(name: &str, age: i32) -> CreateUser {
        CreateUser {
            name: name.into(),
            age,
        }
    }

    #[tokio::test]
    async fn ids_ascend_and_list_is_ordered() {
        let repo = MemoryUserRepo::new();
        let a = repo.create(&input("a", 1)).await.unwrap();
        let b = repo.create(&input("b", 2)).await.unwrap();
        assert_eq!((a.id, b.id), (1, 2));

        let all = repo.list(Page::default()).await.unwrap();
        assert_eq!(all.iter().map(|u| u.id).collect::<Vec<_>>(), vec![1, 2]);
    }

    #[tokio::test]
    async fn list_honours_page_window() {
        let repo = MemoryUserRepo::new();
        for i in 0..5 {
            repo.create(&input(&format!("user-{i}"), 20)).await.unwrap();
        }
        let page = repo.list(Page::new(Some(2), Some(1))).await.unwrap();
        assert_eq!(page.iter().map(|u| u.id).collect::<Vec<_>>(), vec![2, 3]);

        let past_end = repo.list(Page::new(Some(10), Some(10))).await.unwrap();
        assert!(past_end.is_empty());
    }

    #[tokio::test]
    async fn duplicate_name_conflicts() {
        let repo = MemoryUserRepo::new();
        repo.create(&input("dup", 30)).await.unwrap();
        let err = repo.create(&input("dup", 31)).await.unwrap_err();
        assert_matches!(err, StoreError::Conflict { constraint } if constraint == "uq_users_name");
    }

    #[tokio::test]
    async fn update_applies_only_present_fields() {
        let repo = MemoryUserRepo::new();
        let user = repo.create(&input("ada", 36)).await.unwrap();

        let patch = UpdateUser {
            name: None,
            age: Some(37),
        };
        let updated = repo.update(user.id, &patch).await.unwrap().unwrap();
        assert_eq!(updated.name, "ada");
        assert_eq!(updated.age, 37);
    }

    #[tokio::test]
    async fn update_to_own_name_is_not_a_conflict() {
        let repo = MemoryUserRepo::new();
        let user = repo.create(&input("ada", 36)).await.unwrap();
        let patch = UpdateUser {
            name: Some("ada".into()),
            age: None,
        };
        assert!(repo.update(user.id, &patch).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn update_and_delete_missing_rows() {
        let repo = MemoryUserRepo::new();
        assert!(repo.update(99, &UpdateUser::default()).await.unwrap().is_none());
        assert!(!repo.delete(99).await.unwrap());

        let user = repo.create(&input("gone", 40)).await.unwrap();
        assert!(repo.delete(user.id).await.unwrap());
        assert!(repo.find_by_id(user.id).await.unwrap().is_none());
    }
}
