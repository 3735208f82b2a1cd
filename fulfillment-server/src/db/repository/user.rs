//! User Repository
//!
//! Read-only access to the user directory for receipts and notifications.

use std::collections::HashMap;

use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::{User, UserCreate};

pub const USER_TABLE: &str = "user";

#[derive(Clone)]
pub struct UserRepository {
    base: BaseRepository,
}

impl UserRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    pub async fn find_by_record(&self, id: &RecordId) -> RepoResult<Option<User>> {
        let user: Option<User> = self.base.db().select(id.clone()).await?;
        Ok(user)
    }

    pub async fn find_all(&self) -> RepoResult<Vec<User>> {
        let users: Vec<User> = self.base.db().select(USER_TABLE).await?;
        Ok(users)
    }

    /// Display names keyed by record id string ("user:key")
    ///
    /// Used to label per-customer aggregation rows.
    pub async fn display_names(&self) -> RepoResult<HashMap<String, String>> {
        let users = self.find_all().await?;
        Ok(users
            .into_iter()
            .filter_map(|u| u.id.map(|id| (id.to_string(), u.name)))
            .collect())
    }

    /// Create a user (seeds and tests; account management is an external concern)
    pub async fn create(&self, key: Option<&str>, data: UserCreate) -> RepoResult<User> {
        let created: Option<User> = match key {
            Some(k) => {
                self.base
                    .db()
                    .create((USER_TABLE, k.to_string()))
                    .content(data)
                    .await?
            }
            None => self.base.db().create(USER_TABLE).content(data).await?,
        };
        created.ok_or_else(|| RepoError::Database("User create returned no record".to_string()))
    }
}
