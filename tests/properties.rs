use amlich::lunar::{self, Annus, LunarDate, Month};
use amlich::{Date, Timezone};
use proptest::prelude::*;
use proptest::test_runner::Config;

fn jdn(y: i32, m: i32, d: i32) -> u32 {
    Date::from_calendar(y, m, d).unwrap().jdn()
}

fn timezone() -> impl Strategy<Value = Timezone> {
    prop_oneof![Just(Timezone::VIETNAM), Just(Timezone::CHINA)]
}

fn next_day_follows(cur: LunarDate, next: LunarDate) -> bool {
    if next.day == cur.day + 1 {
        return (next.month, next.year, next.is_leap_month) == (cur.month, cur.year, cur.is_leap_month);
    }
    if next.day != 1 || !(29..=30).contains(&cur.day) {
        return false;
    }
    if next.is_leap_month {
        !cur.is_leap_month && next.month == cur.month && next.year == cur.year
    } else if next.month == 1 {
        cur.month == 12 && next.year == cur.year + 1
    } else {
        next.month == cur.month + 1 && next.year == cur.year
    }
}

proptest! {
    #![proptest_config(Config::with_cases(512))]

    #[test]
    fn jdn_calendar_symmetry(day in 0_u32..5_000_000) {
        let (y, m, d) = Date::from_jdn(day).calendar();
        prop_assert_eq!(Ok(day), Date::from_calendar(y, m, d).map(|date| date.jdn()));
    }

    #[test]
    fn solar_lunar_round_trip(
        day in jdn(1900, 1, 1)..=jdn(2100, 12, 31),
        tz in timezone(),
    ) {
        let date = Date::from_jdn(day);
        let lunar = lunar::convert(date, tz);
        prop_assert!((1..=30).contains(&lunar.day), "{:?}", lunar);
        prop_assert!((1..=12).contains(&lunar.month), "{:?}", lunar);
        prop_assert_eq!(Ok(date), lunar::to_solar(lunar, tz));
    }

    #[test]
    fn convert_agrees_with_month_table(
        day in jdn(1900, 1, 1)..=jdn(2100, 12, 31),
        tz in timezone(),
    ) {
        let date = Date::from_jdn(day);
        let annus = Annus::from_date(date, tz).unwrap();
        prop_assert_eq!(Ok(lunar::convert(date, tz)), annus.ymd_for(date));
    }

    #[test]
    fn consecutive_days(day in jdn(1900, 1, 1)..jdn(2100, 12, 31), tz in timezone()) {
        let date = Date::from_jdn(day);
        let cur = lunar::convert(date, tz);
        let next = lunar::convert(date + 1, tz);
        prop_assert!(next_day_follows(cur, next), "{} {:?} -> {:?}", date, cur, next);
    }
}

#[test]
fn every_day_of_a_leap_year_is_consecutive() {
    let annus = Annus::new(2023, Timezone::VIETNAM).unwrap();
    let start = annus.months[0].date;
    let end = annus.months[annus.months.len() - 1].date;
    let mut cur = lunar::convert(start, Timezone::VIETNAM);
    assert_eq!(1, cur.day);
    for offset in 1..(end - start) {
        let next = lunar::convert(start + offset, Timezone::VIETNAM);
        assert!(next_day_follows(cur, next), "{:?} -> {:?}", cur, next);
        cur = next;
    }
}

#[test]
fn convert_matches_month_tables_1990_to_2050() {
    for y in 1990..=2050 {
        let annus = Annus::new(y, Timezone::VIETNAM).unwrap();
        for pair in annus.months.windows(2) {
            for offset in 0..(pair[1].date - pair[0].date) {
                let date = pair[0].date + offset;
                assert_eq!(
                    Ok(lunar::convert(date, Timezone::VIETNAM)),
                    annus.ymd_for(date),
                    "{date}"
                );
            }
        }
    }
}

#[test]
fn month_tables_end_at_next_month_11() {
    let tz = Timezone::VIETNAM;
    for y in (-4000..=5000).step_by(7).chain([-3998, -1132, -1056]) {
        let annus = Annus::new(y, tz).unwrap();
        let last = annus.months[annus.months.len() - 1];
        assert_eq!(Month::Common(11), last.month, "{y}");
        let next = Annus::new(y + 1, tz).unwrap();
        assert_eq!(Ok(LunarDate::new(y, Month::Common(11), 1)), next.ymd_for(last.date), "{y}");
    }
}

#[test]
fn lunar_date_json() {
    let tet = amlich::convert_solar_to_lunar(10, 2, 2024, Timezone::VIETNAM).unwrap();
    let json = serde_json::to_value(tet).unwrap();
    assert_eq!(
        serde_json::json!({"day": 1, "month": 1, "year": 2024, "isLeapMonth": false}),
        json
    );
    assert_eq!(tet, serde_json::from_value::<LunarDate>(json).unwrap());
}
