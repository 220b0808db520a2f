//! Deals with the time scales involved in calendar computation: dynamical
//! time, in which the lunar and solar series are expressed, and universal
//! time, in which civil days are counted in a given timezone.

use crate::error::Error;

/// [Terristrial time](https://en.wikipedia.org/wiki/Terrestrial_Time),
/// represented in Julian date (JD).
///
/// Ephemeris series are computed in this time scale, and should be converted
/// to UT when calculating dates.
#[derive(Debug, Copy, Clone, PartialEq, PartialOrd)]
pub struct Tt(pub f64);

/// [Universal time](https://en.wikipedia.org/wiki/Universal_Time), the actual
/// civil time used for determining the actual date at a given time point,
/// represented in Julian date (JD).
#[derive(Debug, Copy, Clone, PartialEq, PartialOrd)]
pub struct Ut(pub f64);

impl Ut {
    /// Converts TT into UT by subtracting [`delta_t`].
    ///
    /// `t` is the epoch in Julian centuries from 1900 January 0.5, the
    /// argument of the lunar series the instant comes from.
    ///
    /// # Example
    ///
    /// ```
    /// use amlich::time_scales::{Tt, Ut};
    /// let ut = Ut::from_tt(Tt(2415020.5), 0.0);
    /// assert!((ut.0 - 2415020.500278).abs() < 1e-8);
    /// ```
    pub fn from_tt(tt: Tt, t: f64) -> Self {
        Ut(tt.0 - delta_t(t))
    }
    /// Returns the day number (JDN) of the civil day containing this instant
    /// in timezone `tz`.
    ///
    /// # Example
    ///
    /// ```
    /// use amlich::Timezone;
    /// use amlich::time_scales::Ut;
    /// let ut = Ut(2451544.4); // 1999-12-31T21:36Z
    /// assert_eq!(2451544, ut.day_number(Timezone::UTC));
    /// assert_eq!(2451545, ut.day_number(Timezone::VIETNAM)); // 2000-01-01 in Hanoi
    /// ```
    pub fn day_number(&self, tz: Timezone) -> i64 {
        (self.0 + 0.5 + tz.hours() / 24.0).floor() as i64
    }
}

/// ΔT = TT − UT in days, for an epoch `t` in Julian centuries from 1900
/// January 0.5.
///
/// Two fitted polynomials, switching at `t = -11` (around 800 AD).
pub fn delta_t(t: f64) -> f64 {
    let t2 = t * t;
    let t3 = t2 * t;
    if t < -11.0 {
        0.001 + 0.000839 * t + 0.0002261 * t2 - 0.00000845 * t3 - 0.000000081 * t * t3
    } else {
        -0.000278 + 0.000265 * t + 0.000262 * t2
    }
}

/// Offset of a civil timezone east of UTC, in hours.
///
/// Defaults to UTC+7, the timezone of the Vietnamese calendar.
#[derive(Debug, Copy, Clone, PartialEq, PartialOrd)]
pub struct Timezone(f64);

impl Timezone {
    pub const UTC: Timezone = Timezone(0.0);
    /// Indochina time, UTC+7.
    pub const VIETNAM: Timezone = Timezone(7.0);
    /// China standard time, UTC+8.
    pub const CHINA: Timezone = Timezone(8.0);

    /// Creates a timezone `hours` ahead (east) of UTC.
    ///
    /// Fails unless `hours` is finite and within `-12.0..=14.0`.
    ///
    /// ```
    /// use amlich::Timezone;
    /// assert_eq!(Ok(Timezone::VIETNAM), Timezone::new(7.0));
    /// assert!(Timezone::new(f64::NAN).is_err());
    /// ```
    pub fn new(hours: f64) -> Result<Self, Error> {
        if hours.is_finite() && (-12.0..=14.0).contains(&hours) {
            Ok(Self(hours))
        } else {
            Err(Error::InvalidTimezone(hours))
        }
    }
    /// Creates a timezone `minutes` ahead (east) of UTC. For Beijing time
    /// (UTC+8), `minutes` should be +480.
    pub fn from_minutes(minutes: i32) -> Result<Self, Error> {
        Self::new(f64::from(minutes) / 60.0)
    }
    /// Returns the offset in hours.
    pub fn hours(&self) -> f64 {
        self.0
    }
}

impl Default for Timezone {
    fn default() -> Self {
        Self::VIETNAM
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delta_t_branches() {
        assert_eq!(-0.000278, delta_t(0.0));
        assert!((delta_t(1.0) - 0.000249).abs() < 1e-12);
        assert!((delta_t(-12.0) - 0.036412384).abs() < 1e-9);
    }

    #[test]
    fn ut_to_day_number() {
        let midnight = Ut(2451544.5); // 2000-01-01T00:00Z
        assert_eq!(2451545, midnight.day_number(Timezone::UTC));
        assert_eq!(2451545, midnight.day_number(Timezone::VIETNAM));
        let before_midnight = Ut(midnight.0 - 1.0 / 86400.0);
        assert_eq!(2451544, before_midnight.day_number(Timezone::UTC));
        let west = Timezone::new(-5.0).unwrap();
        assert_eq!(2451544, midnight.day_number(west));
    }

    #[test]
    fn timezone_bounds() {
        assert_eq!(Ok(Timezone::CHINA), Timezone::from_minutes(480));
        assert_eq!(Ok(Timezone(5.5)), Timezone::from_minutes(330));
        assert_eq!(Err(Error::InvalidTimezone(15.0)), Timezone::new(15.0));
        assert!(Timezone::new(f64::INFINITY).is_err());
        assert_eq!(Timezone::VIETNAM, Timezone::default());
    }
}
