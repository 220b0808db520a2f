//! Định dạng ngày tháng âm lịch bằng tiếng Việt

use super::{LunarDate, Month, sexagenary_for_year};

/// Thiên can. Để tiện định dạng can chi, mục 0 là "Quý" (can thứ 10).
pub const STEMS: &[&str] = &[
    "Quý", "Giáp", "Ất", "Bính", "Đinh", "Mậu", "Kỷ", "Canh", "Tân", "Nhâm",
];
/// Địa chi. Để tiện định dạng can chi, mục 0 là "Hợi" (chi thứ 12).
pub const BRANCHES: &[&str] = &[
    "Hợi", "Tý", "Sửu", "Dần", "Mão", "Thìn", "Tỵ", "Ngọ", "Mùi", "Thân", "Dậu", "Tuất",
];

/// Đổi số can chi thành chữ.
///
/// # Ví dụ
///
/// ```
/// use amlich::lunar;
///
/// assert_eq!("Ất Tỵ", lunar::fmt::sexagenary(42));
/// ```
pub fn sexagenary(num: u32) -> String {
    format!(
        "{} {}",
        STEMS[num.rem_euclid(10) as usize],
        BRANCHES[num.rem_euclid(12) as usize]
    )
}

/// Tên tháng (có chữ "tháng"). Tháng 1 gọi là tháng Giêng, tháng 12 là
/// tháng Chạp; tháng nhuận thêm chữ "nhuận".
///
/// # Ví dụ
///
/// ```
/// use amlich::lunar::{self, Month::*};
///
/// assert_eq!("tháng Chạp", lunar::fmt::month(Common(12)));
/// assert_eq!("tháng Hai nhuận", lunar::fmt::month(Leap(2)));
/// ```
///
/// # Panics
///
/// Nếu số tháng không nằm trong `1..=12` thì panic.
pub fn month(m: Month) -> String {
    const NAMES: &[&str] = &[
        "Giêng", "Hai", "Ba", "Tư", "Năm", "Sáu", "Bảy", "Tám", "Chín", "Mười", "Mười Một", "Chạp",
    ];
    let num = m.num();
    let name = match num {
        1..=12 => NAMES[num as usize - 1],
        _ => panic!("month {} not in 1..=12", num),
    };
    let mut rt = format!("tháng {name}");
    if m.is_leap() {
        rt += " nhuận";
    }
    rt
}

/// Tên ngày: mười ngày đầu tháng gọi là "mùng 1" đến "mùng 10".
///
/// # Ví dụ
///
/// ```
/// use amlich::lunar;
///
/// assert_eq!("mùng 10", lunar::fmt::day(10));
/// assert_eq!("ngày 25", lunar::fmt::day(25));
/// ```
///
/// # Panics
///
/// Nếu số ngày không nằm trong `1..=30` thì panic.
pub fn day(d: u32) -> String {
    match d {
        1..=10 => format!("mùng {d}"),
        11..=30 => format!("ngày {d}"),
        _ => panic!("day {} not in 1..=30", d),
    }
}

/// Tên tiết khí. `1..=24` lần lượt từ Lập xuân đến Đại hàn.
///
/// # Ví dụ
///
/// ```
/// use amlich::lunar;
///
/// assert_eq!("Cốc vũ", lunar::fmt::solar_term(6));
/// assert_eq!("Đông chí", lunar::fmt::solar_term(22));
/// ```
pub fn solar_term(term: u32) -> &'static str {
    const NAMES: &[&str] = &[
        "Đại hàn",
        "Lập xuân",
        "Vũ thủy",
        "Kinh trập",
        "Xuân phân",
        "Thanh minh",
        "Cốc vũ",
        "Lập hạ",
        "Tiểu mãn",
        "Mang chủng",
        "Hạ chí",
        "Tiểu thử",
        "Đại thử",
        "Lập thu",
        "Xử thử",
        "Bạch lộ",
        "Thu phân",
        "Hàn lộ",
        "Sương giáng",
        "Lập đông",
        "Tiểu tuyết",
        "Đại tuyết",
        "Đông chí",
        "Tiểu hàn",
    ];
    NAMES[term.rem_euclid(24) as usize]
}

/// Dạng đầy đủ của ngày âm lịch, năm ghi theo can chi.
///
/// # Ví dụ
///
/// ```
/// use amlich::lunar::{self, LunarDate, Month::*};
///
/// let tet = LunarDate::new(2024, Common(1), 1);
/// assert_eq!("mùng 1 tháng Giêng năm Giáp Thìn", lunar::fmt::long(&tet));
/// ```
///
/// # Panics
///
/// Như [`day`] và [`month`].
pub fn long(date: &LunarDate) -> String {
    format!(
        "{} {} năm {}",
        day(date.day),
        month(date.month()),
        sexagenary(sexagenary_for_year(date.year))
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sexagenary() {
        for (std, num) in [("Giáp Tý", 1), ("Canh Dần", 27), ("Quý Hợi", 60), ("Giáp Thìn", 41)] {
            assert_eq!(std, sexagenary(num));
        }
    }

    #[test]
    fn test_month() {
        for (std, m) in [
            ("tháng Giêng", Month::Common(1)),
            ("tháng Tư", Month::Common(4)),
            ("tháng Mười Một", Month::Common(11)),
            ("tháng Sáu nhuận", Month::Leap(6)),
        ] {
            assert_eq!(std, month(m));
        }
    }

    #[test]
    fn test_day() {
        for (std, d) in [
            ("mùng 1", 1),
            ("mùng 10", 10),
            ("ngày 11", 11),
            ("ngày 15", 15),
            ("ngày 30", 30),
        ] {
            assert_eq!(std, day(d));
        }
    }

    #[test]
    #[should_panic]
    fn day_out_of_range() {
        day(31);
    }

    #[test]
    fn test_long() {
        let date = LunarDate::new(2023, Month::Leap(2), 11);
        assert_eq!("ngày 11 tháng Hai nhuận năm Quý Mão", long(&date));
    }
}
