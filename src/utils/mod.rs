pub mod time;
pub mod validators;
