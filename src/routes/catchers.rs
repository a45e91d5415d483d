use rocket::http::Status;
use rocket::serde::json::Json;
use rocket::Request;

use crate::types::responses::MessageOnlyResponse;

#[catch(401)]
pub fn unauthorized() -> Json<MessageOnlyResponse> {
    Json(MessageOnlyResponse::new("Unauthorized"))
}

#[catch(404)]
pub fn not_found() -> Json<MessageOnlyResponse> {
    Json(MessageOnlyResponse::new("Not found"))
}

#[catch(default)]
pub fn default_catcher(status: Status, _request: &Request<'_>) -> (Status, Json<MessageOnlyResponse>) {
    let message = status.reason().unwrap_or("Request failed");
    (status, Json(MessageOnlyResponse::new(message)))
}
