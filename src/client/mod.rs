//! Client-side state: the session's task store and the views derived from it.

pub mod api;
pub mod board;
pub mod list_view;
pub mod store;

pub use api::{ClientError, HttpTaskApi, TaskApi};
pub use board::{Board, BoardRules, DragOutcome, DropTarget, StatusChange};
pub use list_view::{Filter, ListView, SortKey, TaskForm};
pub use store::TaskStore;
