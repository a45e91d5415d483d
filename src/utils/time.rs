use chrono::{Local, NaiveDate, Utc};

pub fn get_current_timestamp() -> usize {
    Utc::now().timestamp().max(0) as usize
}

pub fn today() -> NaiveDate {
    Local::now().date_naive()
}
