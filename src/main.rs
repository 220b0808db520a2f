use amlich::lunar::{self, Annus, LunarDate, Month, SolarTerm};
use amlich::{Date, Timezone};
use anyhow::Context;
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "amlich")]
#[command(about = "Vietnamese lunar calendar (âm lịch) converter", version)]
struct Cli {
    /// Timezone offset in hours east of UTC
    #[arg(long, global = true, env = "AMLICH_TZ", default_value_t = 7.0, allow_negative_numbers = true)]
    tz: f64,
    /// Print JSON instead of text
    #[arg(long, global = true, env = "AMLICH_JSON", default_value_t = false)]
    json: bool,
    /// Write logs to stderr as JSON
    #[arg(long, global = true, default_value_t = false)]
    log_json: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Convert a solar date (YYYY-MM-DD) into the lunar calendar
    Lunar {
        date: String,
        /// Accept impossible dates such as 2023-02-30
        #[arg(long)]
        unchecked: bool,
    },
    /// Convert a lunar date into a solar date
    Solar {
        year: i32,
        month: u32,
        day: u32,
        /// The month is a leap month
        #[arg(long)]
        leap: bool,
    },
    /// List the months of a lunar year
    Months { year: i32 },
    /// Show the solar term of a solar date (YYYY-MM-DD)
    Term { date: String },
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct LunarReport {
    solar: String,
    lunar: LunarDate,
    text: String,
    day_sexagenary: String,
    month_sexagenary: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct MonthReport {
    month: Month,
    name: String,
    start: String,
    days: i32,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct TermReport {
    solar: String,
    #[serde(flatten)]
    term: SolarTerm,
    name: &'static str,
}

fn init_tracing(log_json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    if log_json {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

fn lunar_report(date: Date, tz: Timezone) -> LunarReport {
    let lunar_date = lunar::convert(date, tz);
    LunarReport {
        solar: date.to_string(),
        lunar: lunar_date,
        text: lunar::fmt::long(&lunar_date),
        day_sexagenary: lunar::fmt::sexagenary(date.sexagenary() as u32),
        month_sexagenary: lunar::fmt::sexagenary(lunar::sexagenary_for_month(
            lunar_date.year,
            lunar_date.month,
        )),
    }
}

fn month_reports(year: i32, tz: Timezone) -> anyhow::Result<Vec<MonthReport>> {
    // Months 1..=10 of `year` belong to annus `year`, months 11 and 12 to the next one
    let next = year
        .checked_add(1)
        .with_context(|| format!("lunar year {year} out of range"))?;
    let mut months = Vec::new();
    for annus in [year, next] {
        let annus = Annus::new(annus, tz)
            .with_context(|| format!("computing lunar months around {year}"))?;
        let in_year = |m: &Month| {
            if annus.annus == year {
                m.num() < 11
            } else {
                m.num() >= 11
            }
        };
        months.extend(
            annus
                .months
                .iter()
                .zip(annus.month_lengths())
                .filter(|(nm, _)| in_year(&nm.month))
                .map(|(nm, (month, days))| MonthReport {
                    month,
                    name: month.name(),
                    start: nm.date.to_string(),
                    days,
                }),
        );
    }
    Ok(months)
}

fn print<T: Serialize>(json: bool, value: &T, text: impl FnOnce(&T) -> String) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(value)?);
    } else {
        println!("{}", text(value));
    }
    Ok(())
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let tz = Timezone::new(cli.tz)?;
    tracing::debug!(tz = tz.hours(), "using timezone");
    match cli.command {
        Command::Lunar { date, unchecked } => {
            let date = if unchecked {
                let (y, m, d) = amlich::date::parse_ymd(&date)?;
                Date::from_calendar_unchecked(y, m, d)?
            } else {
                date.parse::<Date>()?
            };
            let report = lunar_report(date, tz);
            print(cli.json, &report, |r| {
                format!(
                    "{} → {}, ngày {}, tháng {}",
                    r.solar, r.text, r.day_sexagenary, r.month_sexagenary
                )
            })
        }
        Command::Solar {
            year,
            month,
            day,
            leap,
        } => {
            let lunar_date = LunarDate {
                day,
                month,
                year,
                is_leap_month: leap,
            };
            let date = lunar::to_solar(lunar_date, tz)?;
            let report = lunar_report(date, tz);
            print(cli.json, &report, |r| format!("{} → {}", r.text, r.solar))
        }
        Command::Months { year } => {
            let months = month_reports(year, tz)?;
            print(cli.json, &months, |months| {
                months
                    .iter()
                    .map(|m| format!("{:<18} {}  {} ngày", m.name, m.start, m.days))
                    .collect::<Vec<_>>()
                    .join("\n")
            })
        }
        Command::Term { date } => {
            let date = date.parse::<Date>()?;
            let term = lunar::solar_term_for(date, tz);
            let report = TermReport {
                solar: date.to_string(),
                term,
                name: lunar::fmt::solar_term(term.term),
            };
            print(cli.json, &report, |r| {
                if r.term.days_since == 0 {
                    format!("{}: tiết {}", r.solar, r.name)
                } else {
                    format!("{}: tiết {} (ngày thứ {})", r.solar, r.name, r.term.days_since + 1)
                }
            })
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_json);
    run(cli).inspect_err(|err| tracing::error!(error = %err, "command failed"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn months_of_a_leap_year() {
        let months = month_reports(2023, Timezone::VIETNAM).unwrap();
        let names: Vec<_> = months.iter().map(|m| m.month).collect();
        assert_eq!(13, names.len());
        assert_eq!(Month::Common(1), names[0]);
        assert_eq!(Month::Leap(2), names[2]);
        assert_eq!(Month::Common(12), names[12]);
        assert_eq!("2023-01-22", months[0].start);
        assert_eq!(384, months.iter().map(|m| m.days).sum::<i32>());
    }

    #[test]
    fn months_at_the_end_of_i32() {
        let err = month_reports(i32::MAX, Timezone::VIETNAM).unwrap_err();
        assert!(err.to_string().contains("out of range"), "{err}");
    }
}
