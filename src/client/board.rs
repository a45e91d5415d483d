//! Kanban board state and drag-and-drop reconciliation.
//!
//! Columns are derived from the task store and rebuilt whenever its revision
//! changes, except while a drag is in flight. Reordering within a column is
//! local to the session; moving a card across columns changes its status and
//! yields a `StatusChange` the caller persists through the store.

use super::api::{ClientError, TaskApi};
use super::store::TaskStore;
use crate::types::common::{Task, TaskStatus, TaskUpdate};

/// Optional business rules applied to cross-column moves.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BoardRules {
    /// Refuse a move when the destination column already has a task with the same title.
    pub unique_titles_per_column: bool,
}

/// What the pointer is over: a column's empty space or a card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropTarget {
    Column(TaskStatus),
    Task(i32),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusChange {
    pub task_id: i32,
    pub status: TaskStatus,
}

impl StatusChange {
    pub async fn persist<A: TaskApi>(self, store: &mut TaskStore<A>) -> Result<(), ClientError> {
        store
            .update(self.task_id, TaskUpdate::status(self.status))
            .await
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DragOutcome {
    /// Dropped nowhere, onto itself, or no drag was active.
    Cancelled,
    Reordered,
    /// Local board already shows the move; the change still needs persisting.
    Moved(StatusChange),
    /// Blocked by `BoardRules`.
    Rejected,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    pub status: TaskStatus,
    pub tasks: Vec<Task>,
}

#[derive(Debug, Clone)]
pub struct Board {
    columns: Vec<Column>,
    rules: BoardRules,
    active: Option<Task>,
    over_column: Option<TaskStatus>,
    synced_revision: Option<u64>,
}

impl Board {
    pub fn new(rules: BoardRules) -> Self {
        Board {
            columns: TaskStatus::ALL
                .into_iter()
                .map(|status| Column {
                    status,
                    tasks: Vec::new(),
                })
                .collect(),
            rules,
            active: None,
            over_column: None,
            synced_revision: None,
        }
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column(&self, status: TaskStatus) -> &[Task] {
        &self.columns[column_index(status)].tasks
    }

    /// Snapshot of the dragged card, for the overlay.
    pub fn active_task(&self) -> Option<&Task> {
        self.active.as_ref()
    }

    pub fn highlighted_column(&self) -> Option<TaskStatus> {
        self.over_column
    }

    /// Regroups `tasks` by status. A task id seen twice keeps its first position.
    pub fn rebuild(&mut self, tasks: &[Task]) {
        for column in &mut self.columns {
            column.tasks.clear();
        }
        for task in tasks {
            if self.locate(task.id).is_some() {
                tracing::warn!(task_id = task.id, "duplicate task id, keeping first copy");
                continue;
            }
            self.columns[column_index(task.status)].tasks.push(task.clone());
        }
    }

    /// Rebuilds from the store if it changed since the last sync. Returns whether it did.
    pub fn sync<A: TaskApi>(&mut self, store: &TaskStore<A>) -> bool {
        if self.active.is_some() || self.synced_revision == Some(store.revision()) {
            return false;
        }
        self.rebuild(store.tasks());
        self.synced_revision = Some(store.revision());
        true
    }

    pub fn drag_start(&mut self, task_id: i32) -> bool {
        self.active = self
            .locate(task_id)
            .map(|(column, index)| self.columns[column].tasks[index].clone());
        self.over_column = None;
        self.active.is_some()
    }

    /// Hover feedback only; never changes columns.
    pub fn drag_over(&mut self, target: Option<DropTarget>) {
        self.over_column = target.and_then(|target| self.target_column(target));
    }

    pub fn drag_end(&mut self, target: Option<DropTarget>) -> DragOutcome {
        self.over_column = None;
        let Some(active) = self.active.take() else {
            return DragOutcome::Cancelled;
        };
        let Some(target) = target else {
            return DragOutcome::Cancelled;
        };
        if target == DropTarget::Task(active.id) {
            return DragOutcome::Cancelled;
        }
        let Some((from_column, from_index)) = self.locate(active.id) else {
            return DragOutcome::Cancelled;
        };
        let Some((to_column, to_index)) = self.drop_position(target) else {
            return DragOutcome::Cancelled;
        };

        if from_column == to_column {
            let tasks = &mut self.columns[from_column].tasks;
            let to_index = to_index.min(tasks.len() - 1);
            let task = tasks.remove(from_index);
            tasks.insert(to_index, task);
            return DragOutcome::Reordered;
        }

        let status = self.columns[to_column].status;
        if self.rules.unique_titles_per_column
            && self.columns[to_column]
                .tasks
                .iter()
                .any(|task| task.title == active.title)
        {
            tracing::warn!(title = %active.title, column = %status, "a task with this title is already in the column");
            return DragOutcome::Rejected;
        }

        let mut task = self.columns[from_column].tasks.remove(from_index);
        task.status = status;
        let destination = &mut self.columns[to_column].tasks;
        destination.insert(to_index.min(destination.len()), task);

        DragOutcome::Moved(StatusChange {
            task_id: active.id,
            status,
        })
    }

    fn locate(&self, task_id: i32) -> Option<(usize, usize)> {
        self.columns.iter().enumerate().find_map(|(column, entry)| {
            entry
                .tasks
                .iter()
                .position(|task| task.id == task_id)
                .map(|index| (column, index))
        })
    }

    fn target_column(&self, target: DropTarget) -> Option<TaskStatus> {
        match target {
            DropTarget::Column(status) => Some(status),
            DropTarget::Task(id) => self.locate(id).map(|(column, _)| self.columns[column].status),
        }
    }

    // Dropping on a card takes its slot; dropping on empty column space appends.
    fn drop_position(&self, target: DropTarget) -> Option<(usize, usize)> {
        match target {
            DropTarget::Task(id) => self.locate(id),
            DropTarget::Column(status) => {
                let column = column_index(status);
                Some((column, self.columns[column].tasks.len()))
            }
        }
    }
}

impl Default for Board {
    fn default() -> Self {
        Board::new(BoardRules::default())
    }
}

fn column_index(status: TaskStatus) -> usize {
    match status {
        TaskStatus::ToDo => 0,
        TaskStatus::InProgress => 1,
        TaskStatus::Completed => 2,
    }
}
