//! Network seam between the client views and the task endpoints.

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::Serialize;
use thiserror::Error;

use crate::constants::common::USER_EXISTS_MESSAGE;
use crate::types::common::{NewTask, Task, TaskUpdate};
use crate::types::responses::{LoginResponse, MessageOnlyResponse};

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("session rejected: {0}")]
    Unauthorized(String),

    #[error("task {0} not found")]
    NotFound(i32),

    #[error("conflict: {0}")]
    Conflict(String),

    #[error("server responded {status}: {message}")]
    Server { status: u16, message: String },
}

/// Task operations as seen by a signed-in client.
#[async_trait]
pub trait TaskApi: Send + Sync {
    async fn list_tasks(&self) -> Result<Vec<Task>, ClientError>;

    async fn create_task(&self, task: &NewTask) -> Result<Task, ClientError>;

    async fn update_task(&self, id: i32, update: &TaskUpdate) -> Result<Task, ClientError>;

    async fn delete_task(&self, id: i32) -> Result<(), ClientError>;
}

/// `TaskApi` over HTTP with a bearer session token.
#[derive(Debug, Clone)]
pub struct HttpTaskApi {
    http: Client,
    base_url: String,
    token: String,
}

#[derive(Serialize)]
struct Credentials<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<&'a str>,
    email: &'a str,
    password: &'a str,
}

impl HttpTaskApi {
    pub fn with_token(base_url: impl Into<String>, token: impl Into<String>) -> Self {
        HttpTaskApi {
            http: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: token.into(),
        }
    }

    /// Registers an account. No session is returned; call `signin` afterwards.
    pub async fn signup(base_url: &str, name: &str, email: &str, password: &str) -> Result<(), ClientError> {
        let url = format!("{}/auth/signup", base_url.trim_end_matches('/'));
        let body = Credentials {
            name: Some(name),
            email,
            password,
        };
        check(Client::new().post(url).json(&body).send().await?, None).await?;
        Ok(())
    }

    pub async fn signin(base_url: &str, email: &str, password: &str) -> Result<Self, ClientError> {
        let url = format!("{}/auth/signin", base_url.trim_end_matches('/'));
        let body = Credentials {
            name: None,
            email,
            password,
        };
        let response = check(Client::new().post(url).json(&body).send().await?, None).await?;
        let login: LoginResponse = response.json().await?;

        match login.token {
            Some(token) => Ok(HttpTaskApi::with_token(base_url, token)),
            None => Err(ClientError::Unauthorized(login.message)),
        }
    }

    fn request(&self, method: reqwest::Method, path: &str) -> RequestBuilder {
        self.http
            .request(method, format!("{}{}", self.base_url, path))
            .bearer_auth(&self.token)
    }
}

async fn check(response: Response, task_id: Option<i32>) -> Result<Response, ClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let message = response
        .json::<MessageOnlyResponse>()
        .await
        .map(|body| body.message)
        .unwrap_or_else(|_| status.to_string());

    Err(match (status, task_id) {
        (StatusCode::UNAUTHORIZED, _) => ClientError::Unauthorized(message),
        (StatusCode::NOT_FOUND, Some(id)) => ClientError::NotFound(id),
        (StatusCode::BAD_REQUEST, _) if message == USER_EXISTS_MESSAGE => ClientError::Conflict(message),
        _ => ClientError::Server {
            status: status.as_u16(),
            message,
        },
    })
}

#[async_trait]
impl TaskApi for HttpTaskApi {
    async fn list_tasks(&self) -> Result<Vec<Task>, ClientError> {
        let response = self.request(reqwest::Method::GET, "/tasks").send().await?;
        Ok(check(response, None).await?.json().await?)
    }

    async fn create_task(&self, task: &NewTask) -> Result<Task, ClientError> {
        let response = self
            .request(reqwest::Method::POST, "/tasks")
            .json(task)
            .send()
            .await?;
        Ok(check(response, None).await?.json().await?)
    }

    async fn update_task(&self, id: i32, update: &TaskUpdate) -> Result<Task, ClientError> {
        let response = self
            .request(reqwest::Method::PUT, &format!("/tasks/{}", id))
            .json(update)
            .send()
            .await?;
        Ok(check(response, Some(id)).await?.json().await?)
    }

    async fn delete_task(&self, id: i32) -> Result<(), ClientError> {
        let response = self
            .request(reqwest::Method::DELETE, &format!("/tasks/{}", id))
            .send()
            .await?;
        check(response, Some(id)).await?;
        Ok(())
    }
}
