//! Filterable, sortable task table.

use std::cmp::Ordering;

use chrono::NaiveDate;

use super::api::{ClientError, TaskApi};
use super::store::TaskStore;
use crate::types::common::{NewTask, Task, TaskPriority, TaskStatus, TaskUpdate};
use crate::utils::time::today;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Filter<T> {
    All,
    Only(T),
}

impl<T> Default for Filter<T> {
    fn default() -> Self {
        Filter::All
    }
}

impl<T: PartialEq> Filter<T> {
    pub fn matches(&self, value: &T) -> bool {
        match self {
            Filter::All => true,
            Filter::Only(expected) => expected == value,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortKey {
    /// Earliest due date first; tasks without one go last.
    #[default]
    DueDate,
    /// High, Medium, Low.
    Priority,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListView {
    pub status_filter: Filter<TaskStatus>,
    pub priority_filter: Filter<TaskPriority>,
    pub sort_by: SortKey,
}

impl ListView {
    /// The rows to display. Sorting is stable, so ties keep store order.
    pub fn rows<'a>(&self, tasks: &'a [Task]) -> Vec<&'a Task> {
        let mut rows: Vec<&Task> = tasks
            .iter()
            .filter(|task| self.status_filter.matches(&task.status))
            .filter(|task| self.priority_filter.matches(&task.priority))
            .collect();

        match self.sort_by {
            SortKey::DueDate => rows.sort_by(|a, b| compare_due_dates(a.due_date, b.due_date)),
            SortKey::Priority => rows.sort_by(|a, b| b.priority.rank().cmp(&a.priority.rank())),
        }
        rows
    }

    /// The row's "Complete" button.
    pub async fn complete<A: TaskApi>(&self, store: &mut TaskStore<A>, id: i32) -> Result<(), ClientError> {
        store.update(id, TaskUpdate::status(TaskStatus::Completed)).await
    }

    /// The row's "Delete" button.
    pub async fn delete<A: TaskApi>(&self, store: &mut TaskStore<A>, id: i32) -> Result<(), ClientError> {
        store.delete(id).await
    }
}

fn compare_due_dates(a: Option<NaiveDate>, b: Option<NaiveDate>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// The "Add Task" dialog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskForm {
    pub is_open: bool,
    pub draft: NewTask,
}

impl TaskForm {
    pub fn new() -> Self {
        TaskForm {
            is_open: false,
            draft: blank_draft(today()),
        }
    }

    pub fn open(&mut self) {
        self.is_open = true;
    }

    /// Sends the draft through the store. On success the dialog closes and the
    /// draft resets; on failure both are kept so the user can retry.
    pub async fn submit<A: TaskApi>(&mut self, store: &mut TaskStore<A>) -> Result<(), ClientError> {
        store.add(self.draft.clone()).await?;
        self.is_open = false;
        self.draft = blank_draft(today());
        Ok(())
    }
}

impl Default for TaskForm {
    fn default() -> Self {
        TaskForm::new()
    }
}

fn blank_draft(due_date: NaiveDate) -> NewTask {
    NewTask {
        title: String::new(),
        description: String::new(),
        status: TaskStatus::ToDo,
        priority: TaskPriority::Medium,
        due_date: Some(due_date),
    }
}
