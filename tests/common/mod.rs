//! Shared fixtures for the HTTP integration tests.

#![allow(dead_code)]

use std::net::{Ipv4Addr, TcpListener};
use std::sync::Arc;

use rocket::config::LogLevel;
use rocket::fairing::AdHoc;
use rocket::http::{Header, Status};
use rocket::local::asynchronous::Client;
use rocket::{Config, Shutdown};
use serde_json::{json, Value};
use tokio::sync::Notify;

use taskboard::build_rocket;
use taskboard::environment::AuthConfig;
use taskboard::repository::Storage;
use taskboard::types::responses::LoginResponse;

pub fn test_auth_config() -> AuthConfig {
    AuthConfig {
        jwt_secret: "integration-test-secret".to_string(),
        bcrypt_cost: 4,
        token_ttl_seconds: 600,
    }
}

/// A server over fresh in-memory storage.
pub async fn test_client() -> Client {
    Client::tracked(build_rocket(Storage::in_memory(), test_auth_config()))
        .await
        .expect("valid rocket instance")
}

/// Launches a real server on a free local port. Returns its base URL and a
/// handle that stops it.
pub async fn spawn_server() -> (String, Shutdown) {
    let port = TcpListener::bind((Ipv4Addr::LOCALHOST, 0))
        .and_then(|listener| listener.local_addr())
        .expect("free local port")
        .port();
    let config = Config {
        address: Ipv4Addr::LOCALHOST.into(),
        port,
        log_level: LogLevel::Off,
        ..Config::debug_default()
    };

    let ready = Arc::new(Notify::new());
    let signal = ready.clone();
    let rocket = build_rocket(Storage::in_memory(), test_auth_config())
        .configure(config)
        .attach(AdHoc::on_liftoff("Test Ready", move |_| {
            let signal = signal.clone();
            Box::pin(async move { signal.notify_one() })
        }))
        .ignite()
        .await
        .expect("valid rocket instance");

    let shutdown = rocket.shutdown();
    tokio::spawn(async move {
        let _ = rocket.launch().await;
    });
    ready.notified().await;

    (format!("http://{}:{}", Ipv4Addr::LOCALHOST, port), shutdown)
}

pub fn bearer(token: &str) -> Header<'static> {
    Header::new("Authorization", format!("Bearer {}", token))
}

pub async fn signup(client: &Client, name: &str, email: &str, password: &str) -> Status {
    client
        .post("/auth/signup")
        .json(&json!({ "name": name, "email": email, "password": password }))
        .dispatch()
        .await
        .status()
}

/// Signs a new account up and in, returning its session token.
pub async fn register_and_sign_in(client: &Client, email: &str) -> String {
    assert_eq!(signup(client, "Test User", email, "hunter22").await, Status::Created);

    let response = client
        .post("/auth/signin")
        .json(&json!({ "email": email, "password": "hunter22" }))
        .dispatch()
        .await;
    assert_eq!(response.status(), Status::Ok);

    let login: LoginResponse = response.into_json().await.expect("login body");
    login.token.expect("session token")
}

pub fn task_body(title: &str) -> Value {
    json!({
        "title": title,
        "description": "details",
        "status": "To Do",
        "priority": "Medium",
        "dueDate": "2024-06-30",
    })
}

pub async fn create_task(client: &Client, token: &str, title: &str) -> Value {
    let response = client
        .post("/tasks")
        .header(bearer(token))
        .json(&task_body(title))
        .dispatch()
        .await;
    assert_eq!(response.status(), Status::Created);
    response.into_json().await.expect("created task body")
}

pub async fn list_tasks(client: &Client, token: &str) -> Vec<Value> {
    let response = client.get("/tasks").header(bearer(token)).dispatch().await;
    assert_eq!(response.status(), Status::Ok);
    response.into_json().await.expect("task list body")
}
