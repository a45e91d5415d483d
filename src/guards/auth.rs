use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use rocket::http::Status;
use rocket::outcome::Outcome;
use rocket::request::{self, FromRequest, Request};

use crate::environment::AuthConfig;
use crate::types::responses::Claims;
use crate::utils::time::get_current_timestamp;

#[derive(Debug)]
pub enum AuthError {
    Missing,
    Invalid,
    Unconfigured,
}

/// Proof that the request carries a valid session token. Handlers scope every
/// task query by `user_id`.
#[derive(Debug)]
pub struct AuthGuard {
    pub user_id: i32,
}

pub fn issue_token(user_id: i32, config: &AuthConfig) -> Result<String, jsonwebtoken::errors::Error> {
    let claims = Claims {
        sub: user_id.to_string(),
        exp: get_current_timestamp() + config.token_ttl_seconds,
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.jwt_secret.as_bytes()),
    )
}

/// Returns the user id carried by a valid, unexpired token.
pub fn verify_token(token: &str, config: &AuthConfig) -> Option<i32> {
    let decoding_key = DecodingKey::from_secret(config.jwt_secret.as_bytes());
    decode::<Claims>(token, &decoding_key, &Validation::default())
        .ok()
        .and_then(|decoded| decoded.claims.sub.parse().ok())
}

#[rocket::async_trait]
impl<'r> FromRequest<'r> for AuthGuard {
    type Error = AuthError;

    async fn from_request(request: &'r Request<'_>) -> request::Outcome<Self, Self::Error> {
        let Some(config) = request.rocket().state::<AuthConfig>() else {
            tracing::error!("auth config is not managed, rejecting request");
            return Outcome::Error((Status::InternalServerError, AuthError::Unconfigured));
        };

        let Some(header) = request.headers().get_one("Authorization") else {
            return Outcome::Error((Status::Unauthorized, AuthError::Missing));
        };

        match header.strip_prefix("Bearer ").and_then(|token| verify_token(token.trim(), config)) {
            Some(user_id) => Outcome::Success(AuthGuard { user_id }),
            None => Outcome::Error((Status::Unauthorized, AuthError::Invalid)),
        }
    }
}
