//! Client-side cache of the signed-in user's tasks.
//!
//! A `TaskStore` lives exactly as long as a session: `open` fetches the task
//! list once, `close` hands the API handle back and drops the cache. Every
//! mutation goes to the server first and the local list is reconciled from
//! the server's answer. Failures are logged and returned; nothing is retried,
//! so the cache may lag the server until the next `refresh`.

use super::api::{ClientError, TaskApi};
use crate::types::common::{NewTask, Task, TaskUpdate};

pub struct TaskStore<A> {
    api: A,
    tasks: Vec<Task>,
    revision: u64,
}

impl<A: TaskApi> TaskStore<A> {
    /// Starts a session. A failed initial fetch leaves the store empty.
    pub async fn open(api: A) -> Self {
        let mut store = TaskStore {
            api,
            tasks: Vec::new(),
            revision: 0,
        };
        if let Err(error) = store.refresh().await {
            tracing::error!(%error, "failed to fetch tasks");
        }
        store
    }

    /// Ends the session, returning the API handle.
    pub fn close(self) -> A {
        self.api
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn get(&self, id: i32) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id == id)
    }

    /// Bumped on every change to the task list so views know to rebuild.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    /// Replaces the cache with the server's list.
    pub async fn refresh(&mut self) -> Result<(), ClientError> {
        self.tasks = self.api.list_tasks().await?;
        self.revision += 1;
        Ok(())
    }

    pub async fn add(&mut self, task: NewTask) -> Result<&Task, ClientError> {
        let created = self.api.create_task(&task).await.inspect_err(|error| {
            tracing::error!(%error, title = %task.title, "failed to add task");
        })?;

        self.tasks.push(created);
        self.revision += 1;
        Ok(&self.tasks[self.tasks.len() - 1])
    }

    pub async fn update(&mut self, id: i32, update: TaskUpdate) -> Result<(), ClientError> {
        let updated = self.api.update_task(id, &update).await.inspect_err(|error| {
            tracing::error!(%error, task_id = id, "failed to update task");
        })?;

        for task in self.tasks.iter_mut().filter(|task| task.id == id) {
            *task = updated.clone();
        }
        self.revision += 1;
        Ok(())
    }

    pub async fn delete(&mut self, id: i32) -> Result<(), ClientError> {
        self.api.delete_task(id).await.inspect_err(|error| {
            tracing::error!(%error, task_id = id, "failed to delete task");
        })?;

        self.tasks.retain(|task| task.id != id);
        self.revision += 1;
        Ok(())
    }
}
