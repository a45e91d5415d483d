//! Storage for users and tasks.
//!
//! Handlers only see the `UserRepository` and `TaskRepository` traits. Every
//! task operation takes the requesting user's id and filters on it, so a task
//! owned by someone else is indistinguishable from a missing one.

pub mod in_memory;
pub mod postgres;

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use crate::types::common::{NewTask, NewUser, Task, TaskUpdate, User};

pub use in_memory::InMemoryStore;
pub use postgres::PgStore;

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("email already registered: {0}")]
    DuplicateEmail(String),

    #[error("no user with id {0}")]
    UnknownUser(i32),

    #[error("malformed row: {0}")]
    MalformedRow(String),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("migration failed: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepositoryError>;

    /// Fails with `DuplicateEmail` when the address is taken.
    async fn insert_user(&self, user: NewUser) -> Result<User, RepositoryError>;
}

#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Tasks owned by `user_id`, in insertion order.
    async fn list_tasks(&self, user_id: i32) -> Result<Vec<Task>, RepositoryError>;

    async fn insert_task(&self, user_id: i32, task: NewTask) -> Result<Task, RepositoryError>;

    /// `None` when no task with `id` is owned by `user_id`.
    async fn update_task(
        &self,
        id: i32,
        user_id: i32,
        update: &TaskUpdate,
    ) -> Result<Option<Task>, RepositoryError>;

    /// `false` when no task with `id` is owned by `user_id`.
    async fn delete_task(&self, id: i32, user_id: i32) -> Result<bool, RepositoryError>;
}

/// Repositories managed as Rocket state.
#[derive(Clone)]
pub struct Storage {
    pub users: Arc<dyn UserRepository>,
    pub tasks: Arc<dyn TaskRepository>,
}

impl Storage {
    pub fn in_memory() -> Self {
        let store = Arc::new(InMemoryStore::new());
        Storage {
            users: store.clone(),
            tasks: store,
        }
    }

    pub async fn postgres(database_url: &str) -> Result<Self, RepositoryError> {
        let store = Arc::new(PgStore::connect(database_url).await?);
        Ok(Storage {
            users: store.clone(),
            tasks: store,
        })
    }
}
