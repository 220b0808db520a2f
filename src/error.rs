//! Errors reported by this crate.

/// Everything that can go wrong when building dates or converting between
/// calendars.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// The day does not exist in the given month, the month is not in
    /// `1..=12`, or the date falls in the ten days dropped in October 1582.
    #[error("invalid calendar date {year:04}-{month:02}-{day:02}")]
    InvalidDate { year: i32, month: i32, day: i32 },
    /// Timezone offsets must be finite and within `-12.0..=14.0` hours.
    #[error("invalid timezone offset {0} hours")]
    InvalidTimezone(f64),
    /// The lunar year has no such month (e.g. a leap month that was not
    /// inserted that year), or the month is shorter than `day`.
    #[error("invalid lunar date: day {day} of month {month} (leap: {leap}) in lunar year {year}")]
    InvalidLunarDate {
        year: i32,
        month: u32,
        day: u32,
        leap: bool,
    },
    /// The Julian day number is negative or does not fit in `u32`.
    #[error("julian day number {0} out of supported range")]
    OutOfRange(i64),
    /// Text could not be parsed as a `YYYY-MM-DD` date.
    #[error("cannot parse {0:?} as YYYY-MM-DD")]
    Parse(String),
}
