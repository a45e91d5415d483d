pub mod common;
pub mod responses;
