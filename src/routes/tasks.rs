use rocket::http::Status;
use rocket::serde::json::{self, Json};
use rocket::State;

use crate::errors::AppError;
use crate::guards::auth::AuthGuard;
use crate::repository::Storage;
use crate::types::common::{CreateTaskRequest, Task, TaskUpdate};
use crate::types::responses::MessageOnlyResponse;

#[get("/")]
pub async fn list_tasks(auth: AuthGuard, storage: &State<Storage>) -> Result<Json<Vec<Task>>, AppError> {
    let tasks = storage.tasks.list_tasks(auth.user_id).await?;
    Ok(Json(tasks))
}

#[post("/", data = "<task>")]
pub async fn create_task(
    auth: AuthGuard,
    task: Result<Json<CreateTaskRequest>, json::Error<'_>>,
    storage: &State<Storage>,
) -> Result<(Status, Json<Task>), AppError> {
    let Json(request) = task.map_err(|error| AppError::Validation(format!("Invalid task body: {}", error)))?;
    let new_task = request.validate()?;

    let created = storage.tasks.insert_task(auth.user_id, new_task).await?;
    tracing::debug!(task_id = created.id, user_id = auth.user_id, "task created");

    Ok((Status::Created, Json(created)))
}

#[put("/<id>", data = "<update>")]
pub async fn update_task(
    auth: AuthGuard,
    id: i32,
    update: Result<Json<TaskUpdate>, json::Error<'_>>,
    storage: &State<Storage>,
) -> Result<Json<Task>, AppError> {
    let Json(update) = update.map_err(|error| AppError::Validation(format!("Invalid task update: {}", error)))?;
    update.validate()?;

    match storage.tasks.update_task(id, auth.user_id, &update).await? {
        Some(task) => {
            tracing::debug!(task_id = id, user_id = auth.user_id, "task updated");
            Ok(Json(task))
        }
        None => Err(AppError::task_not_found(id)),
    }
}

#[delete("/<id>")]
pub async fn delete_task(
    auth: AuthGuard,
    id: i32,
    storage: &State<Storage>,
) -> Result<Json<MessageOnlyResponse>, AppError> {
    if storage.tasks.delete_task(id, auth.user_id).await? {
        tracing::debug!(task_id = id, user_id = auth.user_id, "task deleted");
        Ok(Json(MessageOnlyResponse::new("Task deleted successfully")))
    } else {
        Err(AppError::task_not_found(id))
    }
}
