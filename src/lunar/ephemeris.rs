//! Các đại lượng thiên văn dùng để lập lịch: thời điểm sóc, kinh độ Mặt Trời
//! (hoàng kinh), và các mốc suy ra từ đó (tháng 11 âm lịch, vị trí tháng nhuận).
//!
//! Các chuỗi lượng giác là dạng rút gọn đã công bố, hệ số được chép nguyên
//! văn; không tra cứu bảng lịch nào. Mọi "số ngày" ở đây là số ngày Julius
//! (JDN) của ngày dân sự theo múi giờ đã cho, có thể âm.

use std::f64::consts::PI;

use crate::date::jdn_from_calendar;
use crate::time_scales::{Timezone, Tt, Ut};

/// Độ dài trung bình của tháng giao hội (ngày), dùng để ước lượng chỉ số sóc.
pub const SYNODIC_MONTH: f64 = 29.530588853;
/// Thời điểm (JD) của sóc gốc, chỉ số `k = 0`, ngày 1900-01-01.
pub const EPOCH: f64 = 2415021.076998695;

/// Thời điểm sóc thứ `k` kể từ sóc gốc, theo giờ UT.
///
/// # Ví dụ
///
/// ```
/// use amlich::lunar::ephemeris::new_moon;
///
/// let ut = new_moon(1535); // 2024-02-09T23:00Z
/// assert!((ut.0 - 2460350.4584).abs() < 1e-3);
/// ```
pub fn new_moon(k: i64) -> Ut {
    let k = k as f64;
    // Thế kỷ Julius kể từ 1900 tháng 1 ngày 0.5
    let t = k / 1236.85;
    let t2 = t * t;
    let t3 = t2 * t;
    let dr = PI / 180.0;
    let mut jd1 = 2415020.75933 + 29.53058868 * k + 0.0001178 * t2 - 0.000000155 * t3;
    jd1 += 0.00033 * ((166.56 + 132.87 * t - 0.009173 * t2) * dr).sin();
    // Dị thường trung bình của Mặt Trời
    let m = 359.2242 + 29.10535608 * k - 0.0000333 * t2 - 0.00000347 * t3;
    // Dị thường trung bình của Mặt Trăng
    let mpr = 306.0253 + 385.81691806 * k + 0.0107306 * t2 + 0.00001236 * t3;
    // Đối số vĩ độ của Mặt Trăng
    let f = 21.2964 + 390.67050646 * k - 0.0016528 * t2 - 0.00000239 * t3;
    let mut c1 = (0.1734 - 0.000393 * t) * (m * dr).sin() + 0.0021 * (2.0 * dr * m).sin();
    c1 = c1 - 0.4068 * (mpr * dr).sin() + 0.0161 * (dr * 2.0 * mpr).sin();
    c1 -= 0.0004 * (dr * 3.0 * mpr).sin();
    c1 = c1 + 0.0104 * (dr * 2.0 * f).sin() - 0.0051 * (dr * (m + mpr)).sin();
    c1 = c1 - 0.0074 * (dr * (m - mpr)).sin() + 0.0004 * (dr * (2.0 * f + m)).sin();
    c1 = c1 - 0.0004 * (dr * (2.0 * f - m)).sin() - 0.0006 * (dr * (2.0 * f + mpr)).sin();
    c1 = c1 + 0.0010 * (dr * (2.0 * f - mpr)).sin() + 0.0005 * (dr * (2.0 * mpr + m)).sin();
    Ut::from_tt(Tt(jd1 + c1), t)
}

/// Hoàng kinh của Mặt Trời (radian, trong `[0, 2π)`) tại thời điểm `jd` (UT).
pub fn sun_longitude(jd: f64) -> f64 {
    // Thế kỷ Julius kể từ J2000
    let t = (jd - 2451545.0) / 36525.0;
    let t2 = t * t;
    let dr = PI / 180.0;
    let m = 357.52910 + 35999.05030 * t - 0.0001559 * t2 - 0.00000048 * t * t2;
    let l0 = 280.46645 + 36000.76983 * t + 0.0003032 * t2;
    let mut dl = (1.914600 - 0.004817 * t - 0.000014 * t2) * (dr * m).sin();
    dl = dl + (0.019993 - 0.000101 * t) * (dr * 2.0 * m).sin() + 0.000290 * (dr * 3.0 * m).sin();
    let l = (l0 + dl) * dr;
    l - PI * 2.0 * (l / (PI * 2.0)).floor()
}

/// Ngày (JDN theo múi giờ `tz`) chứa sóc thứ `k`.
pub fn new_moon_day(k: i64, tz: Timezone) -> i64 {
    new_moon(k).day_number(tz)
}

/// Chỉ số trung khí `0..12` (mỗi cung 30°) của Mặt Trời lúc nửa đêm đầu ngày
/// `day` theo giờ địa phương. `9` ứng với Đông chí (270°).
pub fn solar_term_index(day: i64, tz: Timezone) -> i64 {
    (sun_longitude(day as f64 - 0.5 - tz.hours() / 24.0) / PI * 6.0).floor() as i64
}

/// Chỉ số tiết khí `0..24` (mỗi cung 15°) của Mặt Trời lúc hết ngày `day`
/// theo giờ địa phương, tức tiết khí đã bắt đầu trong hoặc trước ngày đó.
/// `0` ứng với Xuân phân.
pub fn half_term_index_at_day_end(day: i64, tz: Timezone) -> i64 {
    (sun_longitude(day as f64 + 0.5 - tz.hours() / 24.0) / PI * 12.0).floor() as i64
}

/// Chỉ số của sóc gần nhất trước (hoặc đúng) ngày `day`, theo độ dài tháng
/// trung bình; sóc thật có thể lệch một chỉ số.
pub fn lunation_before(day: i64) -> i64 {
    ((day as f64 - EPOCH) / SYNODIC_MONTH).floor() as i64
}

/// Chỉ số của sóc gần ngày `day` nhất.
pub fn nearest_lunation(day: i64) -> i64 {
    ((day as f64 - EPOCH) / SYNODIC_MONTH + 0.5).floor() as i64
}

/// Ngày bắt đầu tháng 11 âm lịch (tháng chứa Đông chí) của năm dương lịch
/// `year`.
///
/// Lấy sóc trước ngày 31/12; nếu lúc đó Mặt Trời đã qua Đông chí thì sóc ấy
/// mở tháng 12, phải lùi thêm một sóc.
///
/// # Ví dụ
///
/// ```
/// use amlich::{Date, Timezone};
/// use amlich::lunar::ephemeris::month11;
///
/// let start = Date::from_calendar(2023, 12, 13).unwrap();
/// assert_eq!(i64::from(start.jdn()), month11(2023, Timezone::VIETNAM));
/// ```
pub fn month11(year: i32, tz: Timezone) -> i64 {
    let off = jdn_from_calendar(year, 12, 31) - 2415021;
    let k = (off as f64 / SYNODIC_MONTH).floor() as i64;
    let new_moon = new_moon_day(k, tz);
    if solar_term_index(new_moon, tz) >= 9 {
        new_moon_day(k - 1, tz)
    } else {
        new_moon
    }
}

/// Vị trí tháng nhuận trong năm có 13 tháng bắt đầu từ tháng 11 `a11`, tính
/// bằng số tháng kể từ `a11`.
///
/// Tháng nhuận là tháng đầu tiên sau tháng 11 mà Mặt Trời không bước sang
/// trung khí mới (chỉ số trung khí đầu tháng không đổi so với tháng trước).
///
/// Kết quả luôn trong `1..=12`, tức là một tháng của chính năm đó. Nếu không
/// tìm thấy tháng nào như vậy (xảy ra với một số năm trước khoảng năm -1055,
/// khi các chuỗi rút gọn mất chính xác), tháng cuối năm được coi là tháng
/// nhuận.
pub fn leap_month_offset(a11: i64, tz: Timezone) -> i64 {
    let k = nearest_lunation(a11);
    let mut last = solar_term_index(new_moon_day(k + 1, tz), tz);
    for i in 2..=LAST_MONTH_OFFSET + 1 {
        let arc = solar_term_index(new_moon_day(k + i, tz), tz);
        if arc == last {
            return i - 1;
        }
        last = arc;
    }
    tracing::debug!(a11, "no month without a principal term, leaping the last month");
    LAST_MONTH_OFFSET
}

/// Vị trí tháng cuối cùng của năm 13 tháng, tính từ tháng 11.
const LAST_MONTH_OFFSET: i64 = 12;
