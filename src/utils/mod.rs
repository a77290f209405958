pub mod parse;

/// Today's date on the local clock. All scheduling is in naive local time.
pub fn today() -> chrono::NaiveDate {
    chrono::Local::now().date_naive()
}
