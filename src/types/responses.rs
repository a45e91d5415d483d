use rocket::serde::{Deserialize, Serialize};

/// Session token claims. `sub` carries the user id.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub exp: usize,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MessageOnlyResponse {
    pub message: String,
}

impl MessageOnlyResponse {
    pub fn new(message: impl Into<String>) -> Self {
        MessageOnlyResponse {
            message: message.into(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    pub message: String,
    pub token: Option<String>,
}
