//! Calendar-independant date.

use std::fmt;
use std::ops::{Add, Sub};
use std::str::FromStr;

use crate::error::Error;

/// JDN of October 15, 1582, the first day of the Gregorian calendar.
pub const GREGORIAN_START: u32 = 2299161;

/// A calendar-independant date.
///
/// Supported range begins from January 1, 4713 BC, proleptic Julian calendar
/// (JDN 0). Calendar dates before October 15, 1582 are read and written in the
/// Julian calendar, later ones in the Gregorian calendar.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct Date {
    jdn: u32,
}

impl Date {
    /// Creates a `Date` with a Julian day number (JDN).
    pub fn from_jdn(jdn: u32) -> Self {
        Self { jdn }
    }
    /// Returns the Julian day number (JDN) of the date.
    pub fn jdn(&self) -> u32 {
        self.jdn
    }
    pub(crate) fn try_from_jdn(jdn: i64) -> Result<Self, Error> {
        u32::try_from(jdn)
            .map(Self::from_jdn)
            .map_err(|_| Error::OutOfRange(jdn))
    }

    /// Creates a `Date` from a calendar date.
    ///
    /// `year` should be an astronomical year number, i.e. 1 BC is `0`, 2
    /// BC is `-1`, etc.
    ///
    /// Fails with [`Error::InvalidDate`] if the day does not exist in that
    /// month (including October 5–14, 1582), and with [`Error::OutOfRange`]
    /// if the date precedes JDN 0.
    ///
    /// # Example
    ///
    /// ```
    /// use amlich::Date;
    ///
    /// let date = Date::from_calendar(2000, 1, 1).unwrap();
    /// assert_eq!(2451545, date.jdn());
    /// assert!(Date::from_calendar(2023, 2, 29).is_err());
    /// ```
    pub fn from_calendar(year: i32, month: i32, day: i32) -> Result<Self, Error> {
        let invalid = Error::InvalidDate { year, month, day };
        if !(1..=12).contains(&month) {
            return Err(invalid);
        }
        if day < 1 || day > days_in_month(month, YearType::from_year(year)) {
            return Err(invalid);
        }
        if year == 1582 && month == 10 && (5..=14).contains(&day) {
            return Err(invalid);
        }
        Self::from_calendar_unchecked(year, month, day)
    }
    /// Creates a `Date` from a calendar date without checking that it exists.
    ///
    /// Impossible dates are carried through the arithmetic, e.g. February 30
    /// lands on March 1 or 2. Only a result outside the supported range is
    /// reported.
    ///
    /// ```
    /// use amlich::Date;
    ///
    /// let overflow = Date::from_calendar_unchecked(2024, 2, 30).unwrap();
    /// assert_eq!(Date::from_calendar(2024, 3, 1).unwrap(), overflow);
    /// ```
    pub fn from_calendar_unchecked(year: i32, month: i32, day: i32) -> Result<Self, Error> {
        Self::try_from_jdn(jdn_from_calendar(year, month, day))
    }
    /// Represents the date in the Julian (before 1582-10-15) or Gregorian
    /// calendar.
    ///
    /// Returns in `(year, month, day)` format.
    ///
    /// # Example
    ///
    /// ```
    /// use amlich::Date;
    ///
    /// assert_eq!((2000, 1, 1), Date::from_jdn(2451545).calendar());
    /// assert_eq!((1582, 10, 4), Date::from_jdn(2299160).calendar());
    /// ```
    pub fn calendar(&self) -> (i32, i32, i32) {
        let jdn = i64::from(self.jdn);
        let (b, c) = if self.jdn >= GREGORIAN_START {
            let a = jdn + 32044;
            let b = (4 * a + 3).div_euclid(146097);
            (b, a - (146097 * b).div_euclid(4))
        } else {
            (0, jdn + 32082)
        };
        let d = (4 * c + 3).div_euclid(1461);
        let e = c - (1461 * d).div_euclid(4);
        let m = (5 * e + 2).div_euclid(153);
        let day = e - (153 * m + 2).div_euclid(5) + 1;
        let month = m + 3 - 12 * m.div_euclid(10);
        let year = b * 100 + d - 4800 + m.div_euclid(10);
        (year as i32, month as i32, day as i32)
    }

    /// Returns the day of week of the date, in ISO-8601 numbering (i.e.
    /// `1..=7` for Monday through Sunday)
    ///
    /// # Example
    ///
    /// ```
    /// use amlich::Date;
    ///
    /// let date = Date::from_calendar(2000, 1, 1).unwrap();
    /// assert_eq!(6, date.day_of_week()); // Saturday
    /// ```
    pub fn day_of_week(&self) -> i32 {
        (self.jdn % 7 + 1) as i32
    }
    /// Returns the sexagenary (can chi) day number of the date, numbered from 1
    /// (Giáp Tý) to 60 (Quý Hợi).
    ///
    /// # Example
    ///
    /// ```
    /// use amlich::Date;
    ///
    /// let date = Date::from_calendar(2024, 2, 10).unwrap();
    /// assert_eq!(41, date.sexagenary()); // Giáp Thìn
    /// ```
    pub fn sexagenary(&self) -> i32 {
        ((self.jdn + 49) % 60 + 1) as i32
    }
}

/// Formats the date as `YYYY-MM-DD`.
impl fmt::Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (y, m, d) = self.calendar();
        write!(f, "{:04}-{:02}-{:02}", y, m, d)
    }
}

impl FromStr for Date {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (y, m, d) = parse_ymd(s)?;
        Self::from_calendar(y, m, d)
    }
}

/// Splits `YYYY-MM-DD` (with an optional leading `-` for years before 1 BC)
/// into its numeric fields, without checking that the date exists.
///
/// ```
/// use amlich::date::parse_ymd;
///
/// assert_eq!(Ok((2024, 2, 30)), parse_ymd("2024-02-30"));
/// assert_eq!(Ok((-44, 3, 15)), parse_ymd("-44-03-15"));
/// ```
pub fn parse_ymd(s: &str) -> Result<(i32, i32, i32), Error> {
    let err = || Error::Parse(s.to_owned());
    let (sign, rest) = match s.trim().strip_prefix('-') {
        Some(rest) => (-1, rest),
        None => (1, s.trim()),
    };
    let mut fields = rest.splitn(3, '-').map(|p| p.parse::<i32>().map_err(|_| err()));
    let (Some(y), Some(m), Some(d)) = (fields.next(), fields.next(), fields.next()) else {
        return Err(err());
    };
    Ok((sign * y?, m?, d?))
}

/// # Panics
///
/// Panics if the result falls outside the range of JDN supported by `Date`.
impl Add<i32> for Date {
    type Output = Date;
    fn add(self, rhs: i32) -> Self::Output {
        Date::from_jdn(
            self.jdn
                .checked_add_signed(rhs)
                .unwrap_or_else(|| panic!("{} days from JDN {} out of range", rhs, self.jdn)),
        )
    }
}
impl Sub<Date> for Date {
    type Output = i32;
    fn sub(self, rhs: Date) -> Self::Output {
        self.jdn as i32 - rhs.jdn as i32
    }
}

/// Indicates whether a year is a leap year or common year.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum YearType {
    Common,
    Leap,
}

impl YearType {
    /// Determines if `year` is a leap year in the calendar in force that
    /// year: Julian rule before 1582, Gregorian rule from 1582 on.
    pub fn from_year(year: i32) -> Self {
        let leap = if year < 1582 {
            year.rem_euclid(4) == 0
        } else {
            year % 4 == 0 && year % 100 != 0 || year % 400 == 0
        };
        if leap { Self::Leap } else { Self::Common }
    }
    /// Returns `true` if `self` is `Leap`, otherwise `false`.
    pub fn is_leap(&self) -> bool {
        matches!(self, YearType::Leap)
    }
}

fn days_in_month(month: i32, year_type: YearType) -> i32 {
    match month {
        2 => 28 + year_type.is_leap() as i32,
        4 | 6 | 9 | 11 => 30,
        _ => 31,
    }
}

/// JDN of a calendar date, Julian calendar before JDN 2299161 and Gregorian
/// after. Performs no validation and may be negative.
pub(crate) fn jdn_from_calendar(year: i32, month: i32, day: i32) -> i64 {
    let (y, m, d) = (i64::from(year), i64::from(month), i64::from(day));
    let a = (14 - m).div_euclid(12);
    let y = y + 4800 - a;
    let m = m + 12 * a - 3;
    let jdn = d + (153 * m + 2).div_euclid(5) + 365 * y + y.div_euclid(4) - y.div_euclid(100)
        + y.div_euclid(400)
        - 32045;
    if jdn < i64::from(GREGORIAN_START) {
        d + (153 * m + 2).div_euclid(5) + 365 * y + y.div_euclid(4) - 32083
    } else {
        jdn
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn it_works() {
        let date = Date::from_jdn(2440588);
        assert_eq!(2440588, date.jdn());
    }

    #[test]
    fn from_calendar() {
        for ((y, m, d), jdn) in [
            ((1970, 1, 1), 2440588),
            ((2021, 9, 8), 2459466),
            ((2000, 1, 1), 2451545),
            ((1582, 10, 4), 2299160),
            ((1582, 10, 15), 2299161),
            ((-4712, 1, 1), 0),
        ] {
            assert_eq!(Ok(jdn), Date::from_calendar(y, m, d).map(|d| d.jdn()), "{y}-{m}-{d}");
        }
    }

    #[test]
    fn to_calendar() {
        assert_eq!((1970, 1, 1), Date::from_jdn(2440588).calendar());
        assert_eq!((2021, 9, 8), Date::from_jdn(2459466).calendar());
        assert_eq!((1582, 10, 15), Date::from_jdn(2299161).calendar());
        assert_eq!((-4712, 1, 1), Date::from_jdn(0).calendar());
    }

    #[test]
    fn rejects_impossible_dates() {
        for (y, m, d) in [
            (2023, 2, 29),
            (1900, 2, 29),
            (2024, 2, 30),
            (2023, 4, 31),
            (2023, 13, 1),
            (2023, 0, 1),
            (2023, 1, 0),
            (1582, 10, 10),
        ] {
            assert_eq!(
                Err(Error::InvalidDate { year: y, month: m, day: d }),
                Date::from_calendar(y, m, d)
            );
        }
        assert!(Date::from_calendar(2000, 2, 29).is_ok());
        assert!(Date::from_calendar(1500, 2, 29).is_ok()); // Julian leap year
        assert_eq!(Err(Error::OutOfRange(-1)), Date::from_calendar(-4713, 12, 31));
    }

    #[test]
    fn unchecked_dates_overflow() {
        let date = Date::from_calendar_unchecked(2023, 4, 31).unwrap();
        assert_eq!("2023-05-01", date.to_string());
    }

    #[test]
    fn to_day_of_week() {
        let date = Date::from_calendar(1970, 1, 1).unwrap();
        assert_eq!(4, date.day_of_week());
        let date = Date::from_calendar(2021, 9, 8).unwrap();
        assert_eq!(3, date.day_of_week());
    }

    #[test]
    fn to_sexagenary() {
        let date = Date::from_calendar(1970, 1, 1).unwrap();
        assert_eq!(18, date.sexagenary());
        let date = Date::from_calendar(2021, 9, 8).unwrap();
        assert_eq!(56, date.sexagenary());
    }

    #[test]
    fn parse_and_format() {
        let date: Date = "2021-09-08".parse().unwrap();
        assert_eq!(2459466, date.jdn());
        assert_eq!("2021-09-08", date.to_string());
        assert_eq!(Err(Error::Parse("2021-09".into())), "2021-09".parse::<Date>());
        assert_eq!(Err(Error::Parse("yesterday".into())), "yesterday".parse::<Date>());
        assert!(matches!("2021-02-29".parse::<Date>(), Err(Error::InvalidDate { .. })));
    }

    #[test]
    fn arithmetic() {
        let date = Date::from_calendar(2024, 2, 28).unwrap();
        assert_eq!("2024-03-01", (date + 2).to_string());
        assert_eq!("2024-02-27", (date + -1).to_string());
        assert_eq!(2, (date + 2) - date);
    }
}

#[cfg(test)]
mod tests_priv {
    use super::*;

    #[test]
    fn priv_days_in_month() {
        use YearType::*;
        assert_eq!(28, days_in_month(2, Common));
        assert_eq!(29, days_in_month(2, Leap));
        assert_eq!(30, days_in_month(9, Leap));
        assert_eq!(31, days_in_month(12, Common));
    }

    #[test]
    fn priv_year_type() {
        assert!(YearType::from_year(1500).is_leap());
        assert!(!YearType::from_year(1700).is_leap());
        assert!(YearType::from_year(0).is_leap());
        assert!(YearType::from_year(-4).is_leap());
        assert!(!YearType::from_year(-1).is_leap());
    }
}
