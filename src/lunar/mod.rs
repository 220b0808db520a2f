//! Vietnamese lunisolar calendar (âm lịch)
//!
//! Note: để giữ đúng thuật ngữ lịch pháp, tài liệu của mô-đun này viết bằng
//! tiếng Việt.
//!
//! Âm lịch được tính trực tiếp từ các chuỗi thiên văn trong [`ephemeris`]
//! theo một múi giờ cho trước (mặc định UTC+7). Cùng cơ sở thiên văn với lịch
//! Trung Quốc, chỉ khác múi giờ, nên đôi khi ngày đầu tháng lệch nhau một
//! ngày (ví dụ Tết Mậu Thân 1968) hoặc cả tháng (Tết Ất Sửu 1985).

use serde::{Deserialize, Serialize};

use crate::date::Date;
use crate::error::Error;
use crate::time_scales::Timezone;

pub mod ephemeris;
pub mod fmt;

/// Ngày âm lịch.
///
/// `year` là năm âm lịch (năm bắt đầu từ tháng Giêng), nên các ngày tháng 11
/// và tháng Chạp nằm ở đầu năm dương lịch sau vẫn thuộc năm âm lịch trước.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LunarDate {
    /// Ngày trong tháng, `1..=30`
    pub day: u32,
    /// Tháng, `1..=12`
    pub month: u32,
    pub year: i32,
    /// `true` nếu tháng này là tháng nhuận
    pub is_leap_month: bool,
}

impl LunarDate {
    /// Tạo ngày âm lịch từ năm, tên tháng và ngày.
    pub fn new(year: i32, month: Month, day: u32) -> Self {
        Self {
            day,
            month: month.num(),
            year,
            is_leap_month: month.is_leap(),
        }
    }
    /// Tên tháng, phân biệt tháng thường và tháng nhuận.
    pub fn month(&self) -> Month {
        if self.is_leap_month {
            Month::Leap(self.month)
        } else {
            Month::Common(self.month)
        }
    }
}

/// Dạng ngắn `ngày D tháng M (nhuận) năm Y`; dạng đầy đủ có can chi xem
/// [`fmt::long`].
impl std::fmt::Display for LunarDate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ngày {} tháng {}", self.day, self.month)?;
        if self.is_leap_month {
            f.write_str(" (nhuận)")?;
        }
        write!(f, " năm {}", self.year)
    }
}

/// Một "tuế": khoảng từ tháng 11 âm lịch (tháng chứa Đông chí) đến hết tháng
/// 10 (hoặc tháng 10 nhuận) kế tiếp, gồm 12 hoặc 13 tháng.
///
/// Lịch pháp phải lập theo tuế, vì tháng nhuận được xác định trong khoảng giữa
/// hai Đông chí; năm âm lịch (bắt đầu từ tháng Giêng) được suy ra khi tra từng
/// ngày.
///
/// # Ví dụ
///
/// ```
/// use amlich::{Date, Timezone};
/// use amlich::lunar::{Annus, LunarDate, Month::*};
///
/// let date = Date::from_calendar(2000, 1, 1).unwrap();
/// let annus = Annus::from_date(date, Timezone::VIETNAM).unwrap();
///
/// assert_eq!(Ok(LunarDate::new(1999, Common(11), 25)), annus.ymd_for(date));
/// ```
#[derive(Debug, Clone)]
pub struct Annus {
    /// Số hiệu, là năm dương lịch chứa phần lớn tuế này
    pub annus: i32,
    /// Múi giờ dùng để lập lịch
    pub timezone: Timezone,
    /// Toàn bộ ngày sóc, kể cả tháng 11 của tuế sau để đánh dấu ngày cuối
    pub months: Vec<NewMoon>,
}

/// Thông tin ngày đầu tháng
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct NewMoon {
    /// Tên tháng
    pub month: Month,
    /// Ngày sóc, ngày mùng 1 của tháng
    pub date: Date,
}

/// Tên tháng, `Common` là tháng thường, `Leap` là tháng nhuận.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum Month {
    Common(u32),
    Leap(u32),
}

impl Month {
    /// Số thứ tự tháng, bất kể thường hay nhuận.
    pub fn num(&self) -> u32 {
        use Month::*;
        *match self {
            Common(v) | Leap(v) => v,
        }
    }
    /// `true` với tháng nhuận, `false` với tháng thường
    pub fn is_leap(&self) -> bool {
        matches!(self, Self::Leap(_))
    }
    /// Tên tháng bằng chữ, tháng 1 và 12 gọi là "tháng Giêng", "tháng Chạp".
    pub fn name(&self) -> String {
        fmt::month(*self)
    }
}

impl Annus {
    /// Lập tuế số hiệu `annus`: từ tháng 11 của năm dương lịch `annus - 1`
    /// đến trước tháng 11 của năm `annus`.
    ///
    /// Báo lỗi [`Error::OutOfRange`] nếu có ngày sóc trước JDN 0.
    ///
    /// # Ví dụ
    ///
    /// ```
    /// use amlich::Timezone;
    /// use amlich::lunar::{Annus, Month};
    ///
    /// let annus = Annus::new(2023, Timezone::VIETNAM).unwrap();
    /// assert_eq!(14, annus.months.len());
    /// assert_eq!(Some(Month::Leap(2)), annus.leap_month());
    /// ```
    pub fn new(annus: i32, timezone: Timezone) -> Result<Self, Error> {
        use Month::*;

        let previous = annus
            .checked_sub(1)
            .ok_or(Error::OutOfRange(i64::from(annus) - 1))?;
        let a11 = ephemeris::month11(previous, timezone);
        let b11 = ephemeris::month11(annus, timezone);
        let leap = (b11 - a11 > 365).then(|| ephemeris::leap_month_offset(a11, timezone));
        let count = if leap.is_some() { 13 } else { 12 };

        let k = ephemeris::nearest_lunation(a11);
        let mut months = Vec::with_capacity(count + 1);
        let mut month = 10;
        for i in 0..=count as i64 {
            let date = Date::try_from_jdn(ephemeris::new_moon_day(k + i, timezone))?;
            let name = if leap == Some(i) {
                Leap(month)
            } else {
                month = month % 12 + 1;
                Common(month)
            };
            months.push(NewMoon { month: name, date });
        }
        debug_assert_eq!(
            Some((Common(11), b11)),
            months.last().map(|m| (m.month, i64::from(m.date.jdn())))
        );
        tracing::debug!(annus, tz = timezone.hours(), ?leap, "computed lunar months");

        Ok(Annus {
            annus,
            timezone,
            months,
        })
    }
    /// Tìm tuế chứa một ngày cho trước.
    ///
    /// # Ví dụ
    ///
    /// ```
    /// use amlich::{Date, Timezone};
    /// use amlich::lunar::Annus;
    ///
    /// let date = Date::from_calendar(2023, 12, 31).unwrap();
    /// let annus = Annus::from_date(date, Timezone::VIETNAM).unwrap();
    ///
    /// assert_eq!(2024, annus.annus);
    /// ```
    pub fn from_date(date: Date, timezone: Timezone) -> Result<Self, Error> {
        let mut y = date.calendar().0;
        loop {
            let annus = Self::new(y, timezone)?;

            let start = annus.months[0].date;
            let end = annus.end();

            if (start..end).contains(&date) {
                return Ok(annus);
            }

            y += if date < start { -1 } else { 1 };
        }
    }

    /// Ngày đầu tiên của tuế sau.
    fn end(&self) -> Date {
        self.months[self.months.len() - 1].date
    }
    /// Các tháng thuộc tuế này, không kể tháng 11 của tuế sau.
    fn own_months(&self) -> &[NewMoon] {
        &self.months[..self.months.len() - 1]
    }

    /// Tháng nhuận của tuế, nếu có.
    pub fn leap_month(&self) -> Option<Month> {
        self.own_months()
            .iter()
            .map(|m| m.month)
            .find(Month::is_leap)
    }

    /// Số ngày của từng tháng trong tuế (29 hoặc 30).
    pub fn month_lengths(&self) -> impl Iterator<Item = (Month, i32)> + '_ {
        self.months
            .windows(2)
            .map(|pair| (pair[0].month, pair[1].date - pair[0].date))
    }

    /// Ngày âm lịch của một ngày trong tuế.
    ///
    /// Nếu ngày không thuộc tuế này thì báo `Err`, cho biết ngày đó ở trước
    /// hay sau tuế.
    ///
    /// # Ví dụ
    ///
    /// ```
    /// use amlich::{Date, Timezone};
    /// use amlich::lunar::{Annus, LunarDate, Month::*, OtherAnnus};
    ///
    /// let annus = Annus::new(2024, Timezone::VIETNAM).unwrap();
    ///
    /// let tet = Date::from_calendar(2024, 2, 10).unwrap();
    /// assert_eq!(Ok(LunarDate::new(2024, Common(1), 1)), annus.ymd_for(tet));
    /// let later = Date::from_calendar(2025, 1, 1).unwrap();
    /// assert_eq!(Err(OtherAnnus::After), annus.ymd_for(later));
    /// ```
    pub fn ymd_for(&self, date: Date) -> Result<LunarDate, OtherAnnus> {
        let begin = self.months[0].date;

        if date < begin {
            return Err(OtherAnnus::Before);
        } else if date >= self.end() {
            return Err(OtherAnnus::After);
        }

        let m = self
            .own_months()
            .iter()
            .take_while(|m| m.date <= date)
            .last()
            .ok_or(OtherAnnus::Before)?;
        let d = date.jdn() - m.date.jdn() + 1;
        let y = if m.month.num() >= 11 {
            self.annus - 1
        } else {
            self.annus
        };
        Ok(LunarDate::new(y, m.month, d))
    }

    /// Ngày dương lịch của ngày `day` trong tháng `month` của tuế.
    ///
    /// Trả về `None` nếu tuế không có tháng đó (ví dụ tháng nhuận không có
    /// trong năm) hoặc tháng ngắn hơn `day` ngày.
    pub fn solar_date_for(&self, month: Month, day: u32) -> Option<Date> {
        let (start, len) = self
            .months
            .windows(2)
            .find(|pair| pair[0].month == month)
            .map(|pair| (pair[0].date, pair[1].date - pair[0].date))?;
        let day = i32::try_from(day).ok()?;
        (1..=len).contains(&day).then(|| start + (day - 1))
    }
}

/// Ngày cho trước không thuộc tuế; cho biết ngày đó ở trước hay sau tuế.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum OtherAnnus {
    Before,
    After,
}

/// Đổi một ngày dương lịch sang âm lịch theo múi giờ `timezone`.
///
/// Tìm ngày sóc mở đầu tháng chứa `date`, rồi đếm số tháng từ tháng 11 của
/// năm âm lịch tương ứng; nếu năm đó có 13 tháng thì các tháng từ tháng nhuận
/// trở đi lùi lại một số.
///
/// # Ví dụ
///
/// ```
/// use amlich::{Date, Timezone};
/// use amlich::lunar::{convert, LunarDate};
///
/// let date = Date::from_calendar(2024, 1, 1).unwrap();
/// let lunar = convert(date, Timezone::VIETNAM);
/// assert_eq!(LunarDate { day: 20, month: 11, year: 2023, is_leap_month: false }, lunar);
/// ```
pub fn convert(date: Date, timezone: Timezone) -> LunarDate {
    let day_number = i64::from(date.jdn());
    let (year, _, _) = date.calendar();

    let mut k = ephemeris::lunation_before(day_number) + 1;
    let mut month_start = ephemeris::new_moon_day(k, timezone);
    while month_start > day_number {
        k -= 1;
        month_start = ephemeris::new_moon_day(k, timezone);
    }

    let this_month11 = ephemeris::month11(year, timezone);
    let (a11, b11, mut lunar_year) = if this_month11 >= month_start {
        (ephemeris::month11(year - 1, timezone), this_month11, year)
    } else {
        (this_month11, ephemeris::month11(year + 1, timezone), year + 1)
    };

    let day = day_number - month_start + 1;
    let diff = (month_start - a11).div_euclid(29);
    let mut month = diff + 11;
    let mut is_leap_month = false;
    if b11 - a11 > 365 {
        let leap_diff = ephemeris::leap_month_offset(a11, timezone);
        if diff >= leap_diff {
            month = diff + 10;
            is_leap_month = diff == leap_diff;
        }
    }
    if month > 12 {
        month -= 12;
    }
    if month >= 11 && diff < 4 {
        lunar_year -= 1;
    }

    let lunar = LunarDate {
        day: day as u32,
        month: month as u32,
        year: lunar_year,
        is_leap_month,
    };
    tracing::trace!(%date, tz = timezone.hours(), %lunar, "converted to lunar date");
    lunar
}

/// Đổi một ngày âm lịch sang dương lịch theo múi giờ `timezone`.
///
/// Báo lỗi [`Error::InvalidLunarDate`] nếu năm đó không có tháng đã cho (kể
/// cả tháng nhuận) hoặc tháng không đủ `day` ngày.
///
/// # Ví dụ
///
/// ```
/// use amlich::Timezone;
/// use amlich::lunar::{to_solar, LunarDate, Month::*};
///
/// let date = to_solar(LunarDate::new(2023, Leap(2), 1), Timezone::VIETNAM).unwrap();
/// assert_eq!("2023-03-22", date.to_string());
/// assert!(to_solar(LunarDate::new(2024, Leap(2), 1), Timezone::VIETNAM).is_err());
/// ```
pub fn to_solar(lunar: LunarDate, timezone: Timezone) -> Result<Date, Error> {
    let invalid = Error::InvalidLunarDate {
        year: lunar.year,
        month: lunar.month,
        day: lunar.day,
        leap: lunar.is_leap_month,
    };
    if !(1..=12).contains(&lunar.month) {
        return Err(invalid);
    }
    let annus = if lunar.month >= 11 {
        lunar
            .year
            .checked_add(1)
            .ok_or(Error::OutOfRange(i64::from(lunar.year) + 1))?
    } else {
        lunar.year
    };
    Annus::new(annus, timezone)?
        .solar_date_for(lunar.month(), lunar.day)
        .ok_or(invalid)
}

/// Tiết khí của một ngày: tiết khí gần nhất đã bắt đầu trong hoặc trước ngày
/// đó, và số ngày kể từ ngày giao tiết.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SolarTerm {
    /// Số thứ tự tiết khí, `1..=24` tương ứng Lập xuân đến Đại hàn
    pub term: u32,
    /// Số ngày kể từ ngày giao tiết, `0` nghĩa là hôm nay giao tiết
    pub days_since: u32,
}

/// Tìm tiết khí của ngày `date` theo múi giờ `timezone`.
///
/// Ngày giao tiết là ngày (giờ địa phương) mà Mặt Trời đi qua điểm đầu của
/// tiết khí.
///
/// # Ví dụ
///
/// ```
/// use amlich::{Date, Timezone};
/// use amlich::lunar::{solar_term_for, SolarTerm};
///
/// let date = Date::from_calendar(2000, 1, 1).unwrap();
/// // 10 ngày sau Đông chí
/// assert_eq!(SolarTerm { term: 22, days_since: 10 }, solar_term_for(date, Timezone::VIETNAM));
/// ```
pub fn solar_term_for(date: Date, timezone: Timezone) -> SolarTerm {
    let day = i64::from(date.jdn());
    let idx = ephemeris::half_term_index_at_day_end(day, timezone);
    let days_since = (1..)
        .take_while(|&d| ephemeris::half_term_index_at_day_end(day - d, timezone) == idx)
        .count();
    SolarTerm {
        // Lập xuân ở 315°, chỉ số 21
        term: ((idx - 21).rem_euclid(24) + 1) as u32,
        days_since: days_since as u32,
    }
}

/// Can chi của năm âm lịch `year`, đánh số từ 1 (Giáp Tý) đến 60 (Quý Hợi).
///
/// # Ví dụ
///
/// ```
/// use amlich::lunar::sexagenary_for_year;
///
/// assert_eq!(41, sexagenary_for_year(2024)); // Giáp Thìn
/// ```
pub fn sexagenary_for_year(year: i32) -> u32 {
    (year.rem_euclid(60) as u32 + 2696) % 60 + 1
}

/// Can chi của tháng `month` năm âm lịch `year`, đánh số như
/// [`sexagenary_for_year`]. Tháng nhuận dùng can chi của tháng thường cùng số.
///
/// # Ví dụ
///
/// ```
/// use amlich::lunar::sexagenary_for_month;
///
/// assert_eq!(3, sexagenary_for_month(2024, 1)); // Bính Dần
/// ```
pub fn sexagenary_for_month(year: i32, month: u32) -> u32 {
    ((i64::from(year) * 12 + i64::from(month) + 13).rem_euclid(60) + 1) as u32
}
