use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use rocket::serde::{Deserialize, Serialize};
use serde::Deserializer;

use crate::errors::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TaskStatus {
    #[serde(rename = "To Do")]
    ToDo,
    #[serde(rename = "In Progress")]
    InProgress,
    #[serde(rename = "Completed")]
    Completed,
}

impl TaskStatus {
    /// Column order on the board.
    pub const ALL: [TaskStatus; 3] = [TaskStatus::ToDo, TaskStatus::InProgress, TaskStatus::Completed];

    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::ToDo => "To Do",
            TaskStatus::InProgress => "In Progress",
            TaskStatus::Completed => "Completed",
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskStatus {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        TaskStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == value)
            .ok_or_else(|| format!("unknown task status '{}'", value))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TaskPriority {
    Low,
    Medium,
    High,
}

impl TaskPriority {
    pub const ALL: [TaskPriority; 3] = [TaskPriority::Low, TaskPriority::Medium, TaskPriority::High];

    pub fn as_str(&self) -> &'static str {
        match self {
            TaskPriority::Low => "Low",
            TaskPriority::Medium => "Medium",
            TaskPriority::High => "High",
        }
    }

    /// Fixed sort rank, higher is more urgent.
    pub fn rank(&self) -> u8 {
        match self {
            TaskPriority::Low => 1,
            TaskPriority::Medium => 2,
            TaskPriority::High => 3,
        }
    }
}

impl fmt::Display for TaskPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskPriority {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        TaskPriority::ALL
            .into_iter()
            .find(|priority| priority.as_str() == value)
            .ok_or_else(|| format!("unknown task priority '{}'", value))
    }
}

/// A stored user. The password hash never leaves the server.
#[derive(Debug, Clone)]
pub struct User {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub password_hash: String,
}

#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password_hash: String,
}

#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

impl SignupRequest {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.name.trim().is_empty() {
            return Err(AppError::Validation("Name is required!".to_string()));
        }
        if !crate::utils::validators::is_email(&self.email) {
            return Err(AppError::Validation("Invalid email address!".to_string()));
        }
        if self.password.is_empty() {
            return Err(AppError::Validation("Password is required!".to_string()));
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
pub struct SigninRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: i32,
    pub title: String,
    pub description: String,
    pub status: TaskStatus,
    pub priority: TaskPriority,
    pub due_date: Option<NaiveDate>,
    pub user_id: i32,
}

/// Validated fields of a task about to be created. Ownership is assigned by the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTask {
    pub title: String,
    pub description: String,
    pub status: TaskStatus,
    pub priority: TaskPriority,
    pub due_date: Option<NaiveDate>,
}

/// Body of `POST /tasks` before validation.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTaskRequest {
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    pub status: Option<TaskStatus>,
    pub priority: Option<TaskPriority>,
    #[serde(default)]
    pub due_date: Option<NaiveDate>,
}

impl CreateTaskRequest {
    pub fn validate(self) -> Result<NewTask, AppError> {
        let mut missing = Vec::new();
        let title = self.title.filter(|title| !title.trim().is_empty());
        if title.is_none() {
            missing.push("title");
        }
        if self.status.is_none() {
            missing.push("status");
        }
        if self.priority.is_none() {
            missing.push("priority");
        }

        match (title, self.status, self.priority) {
            (Some(title), Some(status), Some(priority)) => Ok(NewTask {
                title,
                description: self.description.unwrap_or_default(),
                status,
                priority,
                due_date: self.due_date,
            }),
            _ => Err(AppError::Validation(format!(
                "Missing required fields: {}",
                missing.join(", ")
            ))),
        }
    }
}

/// Partial update of a task. Only these fields are mutable; anything else is rejected.
///
/// `due_date` distinguishes "leave unchanged" (`None`) from "clear" (`Some(None)`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct TaskUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<TaskStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<TaskPriority>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "present_or_null"
    )]
    pub due_date: Option<Option<NaiveDate>>,
}

impl TaskUpdate {
    pub fn status(status: TaskStatus) -> Self {
        TaskUpdate {
            status: Some(status),
            ..TaskUpdate::default()
        }
    }

    pub fn validate(&self) -> Result<(), AppError> {
        match &self.title {
            Some(title) if title.trim().is_empty() => {
                Err(AppError::Validation("Title must not be empty!".to_string()))
            }
            _ => Ok(()),
        }
    }

    pub fn apply_to(&self, task: &mut Task) {
        if let Some(title) = &self.title {
            task.title = title.clone();
        }
        if let Some(description) = &self.description {
            task.description = description.clone();
        }
        if let Some(status) = self.status {
            task.status = status;
        }
        if let Some(priority) = self.priority {
            task.priority = priority;
        }
        if let Some(due_date) = self.due_date {
            task.due_date = due_date;
        }
    }
}

// A present key, even when null, becomes `Some(..)`; a missing key falls back to `default`.
fn present_or_null<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn sample_task() -> Task {
        Task {
            id: 7,
            title: "Write report".to_string(),
            description: "Quarterly numbers".to_string(),
            status: TaskStatus::ToDo,
            priority: TaskPriority::Medium,
            due_date: NaiveDate::from_ymd_opt(2024, 5, 1),
            user_id: 1,
        }
    }

    #[rstest]
    #[case(TaskStatus::ToDo, "\"To Do\"")]
    #[case(TaskStatus::InProgress, "\"In Progress\"")]
    #[case(TaskStatus::Completed, "\"Completed\"")]
    fn status_uses_display_names_on_the_wire(#[case] status: TaskStatus, #[case] json: &str) {
        assert_eq!(serde_json::to_string(&status).unwrap(), json);
        assert_eq!(json.trim_matches('"').parse::<TaskStatus>().unwrap(), status);
    }

    #[test]
    fn priority_rank_orders_high_first() {
        assert!(TaskPriority::High.rank() > TaskPriority::Medium.rank());
        assert!(TaskPriority::Medium.rank() > TaskPriority::Low.rank());
        assert!("Urgent".parse::<TaskPriority>().is_err());
    }

    #[test]
    fn task_serializes_camel_case() {
        let value = serde_json::to_value(sample_task()).unwrap();
        assert_eq!(value["dueDate"], "2024-05-01");
        assert_eq!(value["userId"], 1);
        assert_eq!(value["status"], "To Do");
    }

    #[test]
    fn create_request_reports_missing_fields() {
        let request: CreateTaskRequest = serde_json::from_str(r#"{"title": "  "}"#).unwrap();
        match request.validate() {
            Err(AppError::Validation(message)) => {
                assert!(message.contains("title"));
                assert!(message.contains("status"));
                assert!(message.contains("priority"));
            }
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn create_request_defaults_description() {
        let request: CreateTaskRequest =
            serde_json::from_str(r#"{"title": "A", "status": "In Progress", "priority": "High"}"#)
                .unwrap();
        let task = request.validate().unwrap();
        assert_eq!(task.description, "");
        assert_eq!(task.status, TaskStatus::InProgress);
        assert_eq!(task.due_date, None);
    }

    #[test]
    fn update_rejects_unknown_fields() {
        let parsed = serde_json::from_str::<TaskUpdate>(r#"{"userId": 2}"#);
        assert!(parsed.is_err());
    }

    #[test]
    fn update_distinguishes_null_from_missing_due_date() {
        let cleared: TaskUpdate = serde_json::from_str(r#"{"dueDate": null}"#).unwrap();
        assert_eq!(cleared.due_date, Some(None));

        let untouched: TaskUpdate = serde_json::from_str(r#"{"status": "Completed"}"#).unwrap();
        assert_eq!(untouched.due_date, None);

        let mut task = sample_task();
        untouched.apply_to(&mut task);
        assert_eq!(task.status, TaskStatus::Completed);
        assert_eq!(task.due_date, NaiveDate::from_ymd_opt(2024, 5, 1));

        cleared.apply_to(&mut task);
        assert_eq!(task.due_date, None);
        assert_eq!(task.title, "Write report");
    }

    #[test]
    fn status_update_serializes_only_status() {
        let body = serde_json::to_value(TaskUpdate::status(TaskStatus::InProgress)).unwrap();
        assert_eq!(body, serde_json::json!({ "status": "In Progress" }));
    }

    #[test]
    fn blank_title_update_is_invalid() {
        let update = TaskUpdate {
            title: Some(" ".to_string()),
            ..TaskUpdate::default()
        };
        assert!(update.validate().is_err());
    }
}
