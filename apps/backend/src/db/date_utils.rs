//! Date utilities for "reviewed today" counting.

use chrono::{DateTime, Duration, FixedOffset, Local, NaiveTime, TimeZone, Utc};

/// Midnight of the current day in `tz`, as a UTC instant.
///
/// Falls back to `now - 24h` on the rare day where local midnight does not
/// exist (DST gap at 00:00).
pub fn start_of_day<Tz: TimeZone>(now: &DateTime<Tz>) -> DateTime<Utc> {
    let midnight = now.date_naive().and_time(NaiveTime::MIN);
    match now.timezone().from_local_datetime(&midnight).earliest() {
        Some(start) => start.with_timezone(&Utc),
        None => now.with_timezone(&Utc) - Duration::days(1),
    }
}

/// Start of today for a client reporting its UTC offset in minutes, or for
/// the server's local zone when no offset is given.
pub fn start_of_local_day(offset_minutes: Option<i32>) -> DateTime<Utc> {
    let offset = offset_minutes
        .and_then(|m| m.checked_mul(60))
        .and_then(FixedOffset::east_opt);
    match offset {
        Some(offset) => start_of_day(&Utc::now().with_timezone(&offset)),
        None => start_of_day(&Local::now()),
    }
}
