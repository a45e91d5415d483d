use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::postgres::{PgPool, PgPoolOptions};
use sqlx::FromRow;

use super::{RepositoryError, TaskRepository, UserRepository};
use crate::types::common::{NewTask, NewUser, Task, TaskUpdate, User};

const TASK_COLUMNS: &str = "id, title, description, status, priority, due_date, user_id";

pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    /// Connects and applies pending migrations.
    pub async fn connect(database_url: &str) -> Result<Self, RepositoryError> {
        let pool = PgPoolOptions::new()
            .max_connections(5)
            .connect(database_url)
            .await?;
        sqlx::migrate!("./migrations").run(&pool).await?;
        tracing::info!("database schema is up to date");
        Ok(PgStore { pool })
    }
}

#[derive(FromRow)]
struct UserRow {
    id: i32,
    name: String,
    email: String,
    password_hash: String,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        User {
            id: row.id,
            name: row.name,
            email: row.email,
            password_hash: row.password_hash,
        }
    }
}

// Status and priority are stored as their display names.
#[derive(FromRow)]
struct TaskRow {
    id: i32,
    title: String,
    description: String,
    status: String,
    priority: String,
    due_date: Option<NaiveDate>,
    user_id: i32,
}

impl TryFrom<TaskRow> for Task {
    type Error = RepositoryError;

    fn try_from(row: TaskRow) -> Result<Self, Self::Error> {
        Ok(Task {
            id: row.id,
            title: row.title,
            description: row.description,
            status: row.status.parse().map_err(RepositoryError::MalformedRow)?,
            priority: row.priority.parse().map_err(RepositoryError::MalformedRow)?,
            due_date: row.due_date,
            user_id: row.user_id,
        })
    }
}

fn violates<F>(error: &sqlx::Error, check: F) -> bool
where
    F: Fn(&dyn sqlx::error::DatabaseError) -> bool,
{
    match error {
        sqlx::Error::Database(db_error) => check(&**db_error),
        _ => false,
    }
}

#[async_trait]
impl UserRepository for PgStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepositoryError> {
        let row = sqlx::query_as::<_, UserRow>(
            "SELECT id, name, email, password_hash FROM users WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(User::from))
    }

    async fn insert_user(&self, user: NewUser) -> Result<User, RepositoryError> {
        let result = sqlx::query_as::<_, UserRow>(
            "INSERT INTO users (name, email, password_hash) VALUES ($1, $2, $3) \
             RETURNING id, name, email, password_hash",
        )
        .bind(&user.name)
        .bind(&user.email)
        .bind(&user.password_hash)
        .fetch_one(&self.pool)
        .await;

        match result {
            Ok(row) => Ok(row.into()),
            Err(error) if violates(&error, |db| db.is_unique_violation()) => {
                Err(RepositoryError::DuplicateEmail(user.email))
            }
            Err(error) => Err(error.into()),
        }
    }
}

#[async_trait]
impl TaskRepository for PgStore {
    async fn list_tasks(&self, user_id: i32) -> Result<Vec<Task>, RepositoryError> {
        let rows = sqlx::query_as::<_, TaskRow>(&format!(
            "SELECT {} FROM tasks WHERE user_id = $1 ORDER BY id",
            TASK_COLUMNS
        ))
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Task::try_from).collect()
    }

    async fn insert_task(&self, user_id: i32, task: NewTask) -> Result<Task, RepositoryError> {
        let result = sqlx::query_as::<_, TaskRow>(&format!(
            "INSERT INTO tasks (title, description, status, priority, due_date, user_id) \
             VALUES ($1, $2, $3, $4, $5, $6) RETURNING {}",
            TASK_COLUMNS
        ))
        .bind(&task.title)
        .bind(&task.description)
        .bind(task.status.as_str())
        .bind(task.priority.as_str())
        .bind(task.due_date)
        .bind(user_id)
        .fetch_one(&self.pool)
        .await;

        match result {
            Ok(row) => row.try_into(),
            Err(error) if violates(&error, |db| db.is_foreign_key_violation()) => {
                Err(RepositoryError::UnknownUser(user_id))
            }
            Err(error) => Err(error.into()),
        }
    }

    async fn update_task(
        &self,
        id: i32,
        user_id: i32,
        update: &TaskUpdate,
    ) -> Result<Option<Task>, RepositoryError> {
        let row = sqlx::query_as::<_, TaskRow>(&format!(
            "UPDATE tasks SET \
                title = COALESCE($3, title), \
                description = COALESCE($4, description), \
                status = COALESCE($5, status), \
                priority = COALESCE($6, priority), \
                due_date = CASE WHEN $7 THEN $8 ELSE due_date END \
             WHERE id = $1 AND user_id = $2 \
             RETURNING {}",
            TASK_COLUMNS
        ))
        .bind(id)
        .bind(user_id)
        .bind(update.title.as_deref())
        .bind(update.description.as_deref())
        .bind(update.status.map(|status| status.as_str()))
        .bind(update.priority.map(|priority| priority.as_str()))
        .bind(update.due_date.is_some())
        .bind(update.due_date.flatten())
        .fetch_optional(&self.pool)
        .await?;

        row.map(Task::try_from).transpose()
    }

    async fn delete_task(&self, id: i32, user_id: i32) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
