#[macro_use]
extern crate rocket;

pub mod client;
pub mod constants;
pub mod environment;
pub mod errors;
pub mod guards;
pub mod repository;
pub mod routes;
pub mod types;
pub mod utils;

use rocket::{Build, Rocket};

use crate::environment::AuthConfig;
use crate::repository::Storage;
use crate::routes::auth::{logout, signin, signup};
use crate::routes::catchers::{default_catcher, not_found, unauthorized};
use crate::routes::tasks::{create_task, delete_task, list_tasks, update_task};

/// Assembles the HTTP server around the given storage and auth settings.
pub fn build_rocket(storage: Storage, auth: AuthConfig) -> Rocket<Build> {
    rocket::build()
        .manage(storage)
        .manage(auth)
        .mount("/auth", routes![signup, signin, logout])
        .mount("/tasks", routes![list_tasks, create_task, update_task, delete_task])
        .register("/", catchers![unauthorized, not_found, default_catcher])
}
