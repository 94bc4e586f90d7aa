use exn::{OptionExt, ResultExt};
use time::format_description::BorrowedFormatItem;
use time::format_description::well_known::Rfc3339;
use time::macros::format_description;
use time::{Date, OffsetDateTime, PrimitiveDateTime};

use crate::error::{ErrorKind, Result};

const DATE: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");

/// Local timestamps as produced by the storage layer. The review view formats
/// times with dashes (`%H-%M-%S`), plain SQLite uses colons.
const DATETIMES: [&[BorrowedFormatItem<'static>]; 6] = [
    format_description!("[year]-[month]-[day] [hour]:[minute]:[second]"),
    format_description!("[year]-[month]-[day] [hour]:[minute]:[second].[subsecond]"),
    format_description!("[year]-[month]-[day] [hour]-[minute]-[second]"),
    format_description!("[year]-[month]-[day]T[hour]:[minute]:[second]"),
    format_description!("[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond]"),
    format_description!("[year]-[month]-[day] [hour]:[minute]"),
];

fn parse(timestamp: &str) -> Option<Date> {
    DATETIMES
        .iter()
        .find_map(|format| PrimitiveDateTime::parse(timestamp, *format).ok())
        .map(|datetime| datetime.date())
        // The calendar date as written; the offset is not applied.
        .or_else(|| OffsetDateTime::parse(timestamp, &Rfc3339).ok().map(|datetime| datetime.date()))
        .or_else(|| Date::parse(timestamp, DATE).ok())
}

/// Truncates a timestamp to its `YYYY-MM-DD` calendar date.
///
/// No timezone conversion happens here: the date is the one written in the
/// timestamp, whatever zone the storage layer rendered it in.
///
/// ```
/// use kikoeru_records::date_only;
/// assert_eq!(date_only("2021-05-02 08-15-22").unwrap(), "2021-05-02");
/// assert_eq!(date_only("2021-05-02T23:30:00-09:00").unwrap(), "2021-05-02");
/// assert!(date_only("yesterday").is_err());
/// ```
pub fn date_only(timestamp: &str) -> Result<String> {
    let trimmed = timestamp.trim();
    let date = parse(trimmed).ok_or_raise(|| ErrorKind::InvalidTimestamp(timestamp.to_string()))?;
    date.format(DATE).or_raise(|| ErrorKind::InvalidTimestamp(timestamp.to_string()))
}
