//! In-memory storage used by tests and `STORAGE_MODE=in_memory`.

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{RepositoryError, TaskRepository, UserRepository};
use crate::types::common::{NewTask, NewUser, Task, TaskUpdate, User};

#[derive(Debug, Default)]
struct Tables {
    users: Vec<User>,
    tasks: Vec<Task>,
    next_user_id: i32,
    next_task_id: i32,
}

/// Both tables behind one lock so task inserts can check the owning user.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    tables: RwLock<Tables>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepositoryError> {
        let tables = self.tables.read().await;
        Ok(tables.users.iter().find(|user| user.email == email).cloned())
    }

    async fn insert_user(&self, user: NewUser) -> Result<User, RepositoryError> {
        let mut tables = self.tables.write().await;
        if tables.users.iter().any(|existing| existing.email == user.email) {
            return Err(RepositoryError::DuplicateEmail(user.email));
        }

        tables.next_user_id += 1;
        let stored = User {
            id: tables.next_user_id,
            name: user.name,
            email: user.email,
            password_hash: user.password_hash,
        };
        tables.users.push(stored.clone());
        Ok(stored)
    }
}

#[async_trait]
impl TaskRepository for InMemoryStore {
    async fn list_tasks(&self, user_id: i32) -> Result<Vec<Task>, RepositoryError> {
        let tables = self.tables.read().await;
        Ok(tables
            .tasks
            .iter()
            .filter(|task| task.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn insert_task(&self, user_id: i32, task: NewTask) -> Result<Task, RepositoryError> {
        let mut tables = self.tables.write().await;
        if !tables.users.iter().any(|user| user.id == user_id) {
            return Err(RepositoryError::UnknownUser(user_id));
        }

        tables.next_task_id += 1;
        let stored = Task {
            id: tables.next_task_id,
            title: task.title,
            description: task.description,
            status: task.status,
            priority: task.priority,
            due_date: task.due_date,
            user_id,
        };
        tables.tasks.push(stored.clone());
        Ok(stored)
    }

    async fn update_task(
        &self,
        id: i32,
        user_id: i32,
        update: &TaskUpdate,
    ) -> Result<Option<Task>, RepositoryError> {
        let mut tables = self.tables.write().await;
        let found = tables
            .tasks
            .iter_mut()
            .find(|task| task.id == id && task.user_id == user_id);

        Ok(found.map(|task| {
            update.apply_to(task);
            task.clone()
        }))
    }

    async fn delete_task(&self, id: i32, user_id: i32) -> Result<bool, RepositoryError> {
        let mut tables = self.tables.write().await;
        let before = tables.tasks.len();
        tables
            .tasks
            .retain(|task| !(task.id == id && task.user_id == user_id));
        Ok(tables.tasks.len() < before)
    }
}
