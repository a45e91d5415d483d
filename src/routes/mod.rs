pub mod auth;
pub mod catchers;
pub mod tasks;
