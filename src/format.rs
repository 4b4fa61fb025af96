use crate::models::ClockTime;
use chrono::NaiveDate;

/// `June 20, 2024`
pub fn format_date(date: NaiveDate) -> String {
    date.format("%B %-d, %Y").to_string()
}

/// `14:30` becomes `2:30 PM`; midnight renders as `12:xx AM`.
pub fn format_time(time: ClockTime) -> String {
    let hour = time.hour();
    let suffix = if hour >= 12 { "PM" } else { "AM" };
    let display_hour = match hour % 12 {
        0 => 12,
        h => h,
    };
    format!("{display_hour}:{:02} {suffix}", time.minute())
}
