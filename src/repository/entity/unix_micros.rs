//!
//! Mongo DateTime keeps only milliseconds, publish_at is stored
//! as microseconds since the Unix epoch to keep its precision.
//! Only years that RFC 3339 can represent are accepted back.
//!

use time::OffsetDateTime;

const NANOS_PER_MICRO: i128 = 1_000;
const MIN_YEAR: i32 = 0;
const MAX_YEAR: i32 = 9999;

pub fn to_unix_micros(datetime: OffsetDateTime) -> i64 {
    (datetime.unix_timestamp_nanos() / NANOS_PER_MICRO) as i64
}

pub fn from_unix_micros(micros: i64) -> Option<OffsetDateTime> {
    OffsetDateTime::from_unix_timestamp_nanos(micros as i128 * NANOS_PER_MICRO)
        .ok()
        .filter(|datetime| (MIN_YEAR..=MAX_YEAR).contains(&datetime.year()))
}
