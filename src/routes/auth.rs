use bcrypt::{hash, verify};
use rocket::http::Status;
use rocket::serde::json::{self, Json};
use rocket::tokio::task;
use rocket::State;

use crate::constants::common::USER_EXISTS_MESSAGE;
use crate::environment::AuthConfig;
use crate::errors::AppError;
use crate::guards::auth::issue_token;
use crate::repository::Storage;
use crate::types::common::{NewUser, SigninRequest, SignupRequest};
use crate::types::responses::{LoginResponse, MessageOnlyResponse};

const INVALID_CREDENTIALS: &str = "Invalid email or password!";

#[post("/signup", data = "<user>")]
pub async fn signup(
    user: Result<Json<SignupRequest>, json::Error<'_>>,
    storage: &State<Storage>,
    config: &State<AuthConfig>,
) -> Result<(Status, Json<MessageOnlyResponse>), AppError> {
    let user = user.map_err(|error| AppError::Validation(format!("Invalid signup body: {}", error)))?;
    user.validate()?;

    if storage.users.find_by_email(&user.email).await?.is_some() {
        return Err(AppError::Conflict(USER_EXISTS_MESSAGE.to_string()));
    }

    let Json(SignupRequest { name, email, password }) = user;
    let cost = config.bcrypt_cost;
    let password_hash = task::spawn_blocking(move || hash(password, cost))
        .await
        .map_err(|error| AppError::Internal(format!("hashing task failed: {}", error)))?
        .map_err(|error| AppError::Internal(format!("failed to hash password: {}", error)))?;

    let created = storage
        .users
        .insert_user(NewUser { name, email, password_hash })
        .await?;
    tracing::info!(user_id = created.id, "user registered");

    Ok((
        Status::Created,
        Json(MessageOnlyResponse::new("User created successfully")),
    ))
}

#[post("/signin", data = "<credentials>")]
pub async fn signin(
    credentials: Result<Json<SigninRequest>, json::Error<'_>>,
    storage: &State<Storage>,
    config: &State<AuthConfig>,
) -> Result<Json<LoginResponse>, AppError> {
    let Json(credentials) =
        credentials.map_err(|error| AppError::Validation(format!("Invalid signin body: {}", error)))?;

    let Some(user) = storage.users.find_by_email(&credentials.email).await? else {
        return Err(AppError::Unauthorized(INVALID_CREDENTIALS.to_string()));
    };

    let stored_hash = user.password_hash.clone();
    let valid = task::spawn_blocking(move || verify(credentials.password, &stored_hash))
        .await
        .map_err(|error| AppError::Internal(format!("verification task failed: {}", error)))?
        .unwrap_or(false);
    if !valid {
        return Err(AppError::Unauthorized(INVALID_CREDENTIALS.to_string()));
    }

    let token = issue_token(user.id, config)
        .map_err(|error| AppError::Internal(format!("failed to issue token: {}", error)))?;
    tracing::info!(user_id = user.id, "user signed in");

    Ok(Json(LoginResponse {
        message: format!("User {} logged in successfully!", user.email),
        token: Some(token),
    }))
}

/// Tokens are stateless; the client drops its token and task store.
#[post("/logout")]
pub fn logout() -> Json<MessageOnlyResponse> {
    Json(MessageOnlyResponse::new("User logged out successfully!"))
}
