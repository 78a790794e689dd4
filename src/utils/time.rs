use chrono::{Datelike, NaiveDate, NaiveDateTime};

/// Converts a calendar date and time into a decimal year, e.g. 2000-07-02T00:00 -> 2000.5.
/// The fraction is taken over the actual length of the year, so leap years are honoured.
/// Returns `None` in the last year chrono can represent, whose end has no `NaiveDate`.
pub fn decimal_year(datetime: NaiveDateTime) -> Option<f64> {
    let year = datetime.year();
    let start = year_start(year)?;
    let end = year_start(year + 1)?;
    let elapsed = (datetime - start).num_milliseconds() as f64;
    let length = (end - start).num_milliseconds() as f64;
    Some(year as f64 + elapsed / length)
}

fn year_start(year: i32) -> Option<NaiveDateTime> {
    NaiveDate::from_yo_opt(year, 1)?.and_hms_opt(0, 0, 0)
}
