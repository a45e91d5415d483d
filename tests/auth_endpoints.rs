mod common;

use rocket::http::{ContentType, Header, Status};
use serde_json::{json, Value};

use common::{bearer, register_and_sign_in, signup, test_client};

#[tokio::test]
async fn signup_creates_account_without_session() {
    let client = test_client().await;
    let response = client
        .post("/auth/signup")
        .json(&json!({ "name": "Ada", "email": "ada@example.com", "password": "secret" }))
        .dispatch()
        .await;

    assert_eq!(response.status(), Status::Created);
    let body: Value = response.into_json().await.unwrap();
    assert_eq!(body, json!({ "message": "User created successfully" }));
}

#[tokio::test]
async fn duplicate_email_is_rejected() {
    let client = test_client().await;
    assert_eq!(signup(&client, "Ada", "ada@example.com", "secret").await, Status::Created);

    let response = client
        .post("/auth/signup")
        .json(&json!({ "name": "Other Ada", "email": "ada@example.com", "password": "different" }))
        .dispatch()
        .await;
    assert_eq!(response.status(), Status::BadRequest);
    let body: Value = response.into_json().await.unwrap();
    assert_eq!(body["message"], "User already exists");

    // The first password still works, so no second row replaced the first.
    let signin = client
        .post("/auth/signin")
        .json(&json!({ "email": "ada@example.com", "password": "secret" }))
        .dispatch()
        .await;
    assert_eq!(signin.status(), Status::Ok);
}

#[tokio::test]
async fn signup_validates_input() {
    let client = test_client().await;
    assert_eq!(signup(&client, "Ada", "not-an-email", "secret").await, Status::BadRequest);
    assert_eq!(signup(&client, "", "ada@example.com", "secret").await, Status::BadRequest);

    let malformed = client
        .post("/auth/signup")
        .header(ContentType::JSON)
        .body(r#"{"email": "ada@example.com"}"#)
        .dispatch()
        .await;
    assert_eq!(malformed.status(), Status::BadRequest);
}

#[tokio::test]
async fn signin_rejects_bad_credentials() {
    let client = test_client().await;
    signup(&client, "Ada", "ada@example.com", "secret").await;

    for (email, password) in [("ada@example.com", "wrong"), ("nobody@example.com", "secret")] {
        let response = client
            .post("/auth/signin")
            .json(&json!({ "email": email, "password": password }))
            .dispatch()
            .await;
        assert_eq!(response.status(), Status::Unauthorized);
        let body: Value = response.into_json().await.unwrap();
        assert_eq!(body["message"], "Invalid email or password!");
        assert_eq!(body["token"], Value::Null);
    }
}

#[tokio::test]
async fn task_endpoints_require_a_session() {
    let client = test_client().await;

    let missing = client.get("/tasks").dispatch().await;
    assert_eq!(missing.status(), Status::Unauthorized);
    let body: Value = missing.into_json().await.unwrap();
    assert_eq!(body["message"], "Unauthorized");

    let forged = client.get("/tasks").header(bearer("forged.token.value")).dispatch().await;
    assert_eq!(forged.status(), Status::Unauthorized);

    let delete = client.delete("/tasks/1").dispatch().await;
    assert_eq!(delete.status(), Status::Unauthorized);
}

#[tokio::test]
async fn issued_token_opens_task_endpoints() {
    let client = test_client().await;
    let token = register_and_sign_in(&client, "ada@example.com").await;

    let response = client.get("/tasks").header(bearer(&token)).dispatch().await;
    assert_eq!(response.status(), Status::Ok);
    let body: Value = response.into_json().await.unwrap();
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn logout_confirms() {
    let client = test_client().await;
    let response = client.post("/auth/logout").dispatch().await;
    assert_eq!(response.status(), Status::Ok);
}

#[tokio::test]
async fn authorization_header_needs_the_bearer_scheme() {
    let client = test_client().await;
    let token = register_and_sign_in(&client, "ada@example.com").await;

    let bare = client
        .get("/tasks")
        .header(Header::new("Authorization", token.clone()))
        .dispatch()
        .await;
    assert_eq!(bare.status(), Status::Unauthorized);

    let doubled = client
        .get("/tasks")
        .header(Header::new("Authorization", format!("Bearer Bearer {}", token)))
        .dispatch()
        .await;
    assert_eq!(doubled.status(), Status::Unauthorized);
}

#[tokio::test]
async fn auth_bodies_are_parsed_without_a_content_type() {
    let client = test_client().await;

    let signup = client
        .post("/auth/signup")
        .body(r#"{"name": "Ada", "email": "ada@example.com", "password": "secret"}"#)
        .dispatch()
        .await;
    assert_eq!(signup.status(), Status::Created);

    let garbage = client
        .post("/auth/signin")
        .header(ContentType::Plain)
        .body("email=ada@example.com")
        .dispatch()
        .await;
    assert_eq!(garbage.status(), Status::BadRequest);
}
