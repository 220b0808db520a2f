//! Conversion between Gregorian (solar) dates and the Vietnamese lunisolar
//! calendar (âm lịch).
//!
//! The lunar calendar is computed from truncated astronomical series for the
//! new moon and the solar longitude, localized to a timezone (UTC+7 by
//! default). It shares its astronomical basis with the Chinese calendar; with
//! [`Timezone::CHINA`] the same computation yields the Chinese calendar.
//!
//! # Examples
//!
//! ```
//! use amlich::{convert_solar_to_lunar, LunarDate, Timezone};
//!
//! let tet = convert_solar_to_lunar(10, 2, 2024, Timezone::default()).unwrap();
//! assert_eq!(LunarDate { day: 1, month: 1, year: 2024, is_leap_month: false }, tet);
//! ```
//!
//! Month tables and names:
//!
//! ```
//! use amlich::{Date, Timezone};
//! use amlich::lunar::{self, Annus, Month::*};
//!
//! let annus = Annus::new(2023, Timezone::VIETNAM).unwrap();
//! assert_eq!(Some(Leap(2)), annus.leap_month());
//!
//! let date = Date::from_calendar(2023, 4, 1).unwrap();
//! let lunar = annus.ymd_for(date).unwrap();
//! assert_eq!("ngày 11 tháng Hai nhuận năm Quý Mão", lunar::fmt::long(&lunar));
//! ```

pub mod date;
mod error;
pub mod lunar;
pub mod time_scales;

pub use date::{Date, YearType};
pub use error::Error;
pub use lunar::{LunarDate, Month};
pub use time_scales::Timezone;

/// Converts a solar date into the lunar calendar of `timezone`.
///
/// Fails with [`Error::InvalidDate`] if `day`/`month`/`year` is not a real
/// calendar date; see [`convert_solar_to_lunar_unchecked`] to skip the check.
///
/// # Example
///
/// ```
/// use amlich::{convert_solar_to_lunar, Error, Timezone};
///
/// let lunar = convert_solar_to_lunar(1, 1, 2024, Timezone::VIETNAM).unwrap();
/// assert_eq!((20, 11, 2023, false), (lunar.day, lunar.month, lunar.year, lunar.is_leap_month));
///
/// assert!(matches!(
///     convert_solar_to_lunar(30, 2, 2024, Timezone::VIETNAM),
///     Err(Error::InvalidDate { .. })
/// ));
/// ```
pub fn convert_solar_to_lunar(
    day: i32,
    month: i32,
    year: i32,
    timezone: Timezone,
) -> Result<LunarDate, Error> {
    let date = Date::from_calendar(year, month, day)?;
    Ok(lunar::convert(date, timezone))
}

/// Like [`convert_solar_to_lunar`], but carries impossible dates such as
/// February 30 through the day arithmetic instead of rejecting them.
///
/// Fails only if the date precedes JDN 0.
pub fn convert_solar_to_lunar_unchecked(
    day: i32,
    month: i32,
    year: i32,
    timezone: Timezone,
) -> Result<LunarDate, Error> {
    let date = Date::from_calendar_unchecked(year, month, day)?;
    Ok(lunar::convert(date, timezone))
}

/// Converts a lunar date of `timezone` into a solar date.
///
/// # Example
///
/// ```
/// use amlich::{convert_lunar_to_solar, Timezone};
///
/// let date = convert_lunar_to_solar(1, 1, 2024, false, Timezone::VIETNAM).unwrap();
/// assert_eq!("2024-02-10", date.to_string());
/// ```
pub fn convert_lunar_to_solar(
    day: u32,
    month: u32,
    year: i32,
    is_leap_month: bool,
    timezone: Timezone,
) -> Result<Date, Error> {
    lunar::to_solar(
        LunarDate {
            day,
            month,
            year,
            is_leap_month,
        },
        timezone,
    )
}
