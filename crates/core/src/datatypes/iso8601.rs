//! `date`, `time` and `dateTime` values with optional timezone offsets.
//!
//! Years use astronomical numbering (year 0 is 1 BC, -1 is 2 BC) on the proleptic Gregorian
//! calendar, so arithmetic runs through year zero without a discontinuity.
//!
//! Equality and ordering are by instant. A value without a timezone is taken to be UTC and a
//! date stands for the start of its day.
use core::cmp::Ordering;
use core::fmt;
use core::hash::{Hash, Hasher};
use core::str::FromStr;

use chrono::{Datelike, FixedOffset, Months, NaiveDate, NaiveDateTime, NaiveTime, Offset, TimeDelta, Timelike};

use super::duration::{DayTimeDuration, YearMonthDuration};
use super::{ParseError, Scanner};

pub(crate) const NANOS_PER_SECOND: i128 = 1_000_000_000;
pub(crate) const NANOS_PER_DAY: i128 = 86_400 * NANOS_PER_SECOND;

const MAX_OFFSET_MINUTES: i32 = 14 * 60;

/// A day-time duration as a chrono delta, or `None` past chrono's range.
fn time_delta(nanos: i128) -> Option<TimeDelta> {
    let secs = i64::try_from(nanos.div_euclid(NANOS_PER_SECOND)).ok()?;
    let subsec = u32::try_from(nanos.rem_euclid(NANOS_PER_SECOND)).ok()?;
    TimeDelta::new(secs, subsec)
}

/// Moves `date` by whole months, clamping the day to the last day of the target month.
fn shift_months(date: NaiveDate, months: i64) -> Option<NaiveDate> {
    let step = Months::new(u32::try_from(months.unsigned_abs()).ok()?);
    if months < 0 { date.checked_sub_months(step) } else { date.checked_add_months(step) }
}

/// Nanoseconds since the epoch of a local date-time read in `tz`.
fn instant_of(dt: NaiveDateTime, tz: Option<FixedOffset>) -> i128 {
    let utc = dt.and_utc();
    i128::from(utc.timestamp()) * NANOS_PER_SECOND + i128::from(utc.timestamp_subsec_nanos()) - offset_nanos(tz)
}

fn offset_nanos(tz: Option<FixedOffset>) -> i128 {
    tz.map_or(0, |o| i128::from(o.local_minus_utc()) * NANOS_PER_SECOND)
}

/// Fraction digits for `nanos`, trailing zeros trimmed but never below `min_digits`.
pub(crate) fn fraction_digits(nanos: u32, min_digits: usize) -> String {
    let full = format!("{nanos:09}");
    let trimmed = full.trim_end_matches('0');
    full[..trimmed.len().max(min_digits)].to_string()
}

fn write_date(f: &mut fmt::Formatter<'_>, date: NaiveDate) -> fmt::Result {
    let year = date.year();
    if year < 0 {
        write!(f, "-{:04}", year.unsigned_abs())?;
    } else {
        write!(f, "{year:04}")?;
    }
    write!(f, "-{:02}-{:02}", date.month(), date.day())
}

fn write_time(f: &mut fmt::Formatter<'_>, time: NaiveTime) -> fmt::Result {
    write!(f, "{:02}:{:02}:{:02}", time.hour(), time.minute(), time.second())?;
    if time.nanosecond() > 0 {
        write!(f, ".{}", fraction_digits(time.nanosecond(), 3))?;
    }
    Ok(())
}

fn write_tz(f: &mut fmt::Formatter<'_>, tz: Option<FixedOffset>) -> fmt::Result {
    let Some(tz) = tz else { return Ok(()) };
    let secs = tz.local_minus_utc();
    if secs == 0 {
        return f.write_str("Z");
    }
    let sign = if secs < 0 { '-' } else { '+' };
    let mins = secs.unsigned_abs() / 60;
    write!(f, "{sign}{:02}:{:02}", mins / 60, mins % 60)
}

fn parse_date_fields(sc: &mut Scanner<'_>) -> Result<NaiveDate, ParseError> {
    let start = sc.pos();
    let negative = sc.eat(b'-');
    let digits_at = sc.pos();
    let digits = sc.digits()?;
    if digits.len() < 4 {
        return Err(sc.error_at(digits_at, "year must have at least four digits"));
    }
    if digits.len() > 4 && digits.starts_with('0') {
        return Err(sc.error_at(digits_at, "year has leading zeros"));
    }
    let year = digits.parse::<i32>().map_err(|_| sc.error_at(start, "year out of range"))?;
    let year = if negative { -year } else { year };
    if NaiveDate::from_ymd_opt(year, 1, 1).is_none() {
        return Err(sc.error_at(start, "year out of range"));
    }
    sc.expect(b'-')?;
    let month_at = sc.pos();
    let month = sc.fixed_digits(2)?;
    if !(1..=12).contains(&month) {
        return Err(sc.error_at(month_at, "month out of range"));
    }
    sc.expect(b'-')?;
    let day_at = sc.pos();
    let day = sc.fixed_digits(2)?;
    NaiveDate::from_ymd_opt(year, month, day).ok_or_else(|| sc.error_at(day_at, "day out of range"))
}

fn parse_time_fields(sc: &mut Scanner<'_>) -> Result<NaiveTime, ParseError> {
    let hour_at = sc.pos();
    let hour = sc.fixed_digits(2)?;
    if hour > 23 {
        return Err(sc.error_at(hour_at, "hour out of range"));
    }
    sc.expect(b':')?;
    let minute_at = sc.pos();
    let minute = sc.fixed_digits(2)?;
    if minute > 59 {
        return Err(sc.error_at(minute_at, "minute out of range"));
    }
    sc.expect(b':')?;
    let second_at = sc.pos();
    let second = sc.fixed_digits(2)?;
    if second > 59 {
        return Err(sc.error_at(second_at, "second out of range"));
    }
    let mut nanos = 0u32;
    if sc.eat(b'.') {
        let frac = sc.digits()?;
        let mut scale = 100_000_000u32;
        for b in frac.bytes().take(9) {
            nanos += u32::from(b - b'0') * scale;
            scale /= 10;
        }
    }
    NaiveTime::from_hms_nano_opt(hour, minute, second, nanos).ok_or_else(|| sc.error_at(hour_at, "time out of range"))
}

fn parse_tz(sc: &mut Scanner<'_>) -> Result<Option<FixedOffset>, ParseError> {
    if sc.at_end() {
        return Ok(None);
    }
    let at = sc.pos();
    if sc.eat(b'Z') {
        return Ok(Some(chrono::Utc.fix()));
    }
    let sign = if sc.eat(b'+') {
        1
    } else if sc.eat(b'-') {
        -1
    } else {
        return Err(sc.error("expected timezone"));
    };
    let hours = sc.fixed_digits(2)? as i32;
    sc.expect(b':')?;
    let minutes = sc.fixed_digits(2)? as i32;
    let total = hours * 60 + minutes;
    if minutes > 59 || total > MAX_OFFSET_MINUTES {
        return Err(sc.error_at(at, "timezone offset out of range"));
    }
    FixedOffset::east_opt(sign * total * 60).map(Some).ok_or_else(|| sc.error_at(at, "timezone offset out of range"))
}

#[derive(Debug, Clone, Copy)]
pub struct Date {
    date: NaiveDate,
    tz: Option<FixedOffset>,
}

impl Date {
    pub fn new(year: i32, month: u8, day: u8, tz: Option<FixedOffset>) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, u32::from(month), u32::from(day)).map(|date| Self { date, tz })
    }

    pub fn year(&self) -> i32 {
        self.date.year()
    }

    pub fn month(&self) -> u8 {
        self.date.month() as u8
    }

    pub fn day(&self) -> u8 {
        self.date.day() as u8
    }

    pub fn timezone(&self) -> Option<FixedOffset> {
        self.tz
    }

    pub fn add_year_month(&self, d: &YearMonthDuration) -> Option<Self> {
        Some(Self { date: shift_months(self.date, d.total_months())?, tz: self.tz })
    }

    pub fn subtract_year_month(&self, d: &YearMonthDuration) -> Option<Self> {
        self.add_year_month(&d.negated())
    }

    fn instant(&self) -> i128 {
        instant_of(self.date.and_time(NaiveTime::MIN), self.tz)
    }
}

impl FromStr for Date {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut sc = Scanner::new("ISO8601 date", s);
        let date = parse_date_fields(&mut sc)?;
        let tz = parse_tz(&mut sc)?;
        sc.finish()?;
        Ok(Self { date, tz })
    }
}

impl fmt::Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_date(f, self.date)?;
        write_tz(f, self.tz)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Time {
    time: NaiveTime,
    tz: Option<FixedOffset>,
}

impl Time {
    pub fn new(hour: u8, minute: u8, second: u8, nanos: u32, tz: Option<FixedOffset>) -> Option<Self> {
        // chrono reserves nanoseconds past one second for leap seconds
        if i128::from(nanos) >= NANOS_PER_SECOND {
            return None;
        }
        NaiveTime::from_hms_nano_opt(u32::from(hour), u32::from(minute), u32::from(second), nanos)
            .map(|time| Self { time, tz })
    }

    pub fn hour(&self) -> u8 {
        self.time.hour() as u8
    }

    pub fn minute(&self) -> u8 {
        self.time.minute() as u8
    }

    pub fn second(&self) -> u8 {
        self.time.second() as u8
    }

    pub fn nanosecond(&self) -> u32 {
        self.time.nanosecond()
    }

    pub fn timezone(&self) -> Option<FixedOffset> {
        self.tz
    }

    pub fn with_timezone(self, tz: Option<FixedOffset>) -> Self {
        Self { tz, ..self }
    }

    pub fn nanos_of_day(&self) -> i128 {
        i128::from(self.time.num_seconds_from_midnight()) * NANOS_PER_SECOND + i128::from(self.time.nanosecond())
    }

    /// Time of day after adding `d`, wrapping around midnight.
    pub fn add_day_time(&self, d: &DayTimeDuration) -> Self {
        let within_day = d.total_nanos().rem_euclid(NANOS_PER_DAY);
        let time = i64::try_from(within_day)
            .map_or(self.time, |n| self.time.overflowing_add_signed(TimeDelta::nanoseconds(n)).0);
        Self { time, tz: self.tz }
    }

    pub fn subtract_day_time(&self, d: &DayTimeDuration) -> Self {
        self.add_day_time(&d.negated())
    }

    /// Time of day normalized to UTC, in `0..NANOS_PER_DAY`.
    pub fn utc_nanos_of_day(&self) -> i128 {
        (self.nanos_of_day() - offset_nanos(self.tz)).rem_euclid(NANOS_PER_DAY)
    }

    fn instant(&self) -> i128 {
        self.nanos_of_day() - offset_nanos(self.tz)
    }
}

impl FromStr for Time {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut sc = Scanner::new("ISO8601 time", s);
        let time = parse_time_fields(&mut sc)?;
        let tz = parse_tz(&mut sc)?;
        sc.finish()?;
        Ok(Self { time, tz })
    }
}

impl fmt::Display for Time {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_time(f, self.time)?;
        write_tz(f, self.tz)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct DateTime {
    dt: NaiveDateTime,
    tz: Option<FixedOffset>,
}

impl DateTime {
    pub fn new(date: Date, time: Time) -> Self {
        Self { dt: date.date.and_time(time.time), tz: time.tz }
    }

    pub fn date(&self) -> Date {
        Date { date: self.dt.date(), tz: self.tz }
    }

    pub fn time(&self) -> Time {
        Time { time: self.dt.time(), tz: self.tz }
    }

    pub fn timezone(&self) -> Option<FixedOffset> {
        self.tz
    }

    pub fn add_day_time(&self, d: &DayTimeDuration) -> Option<Self> {
        let dt = self.dt.checked_add_signed(time_delta(d.total_nanos())?)?;
        Some(Self { dt, tz: self.tz })
    }

    pub fn subtract_day_time(&self, d: &DayTimeDuration) -> Option<Self> {
        self.add_day_time(&d.negated())
    }

    /// Months move the date only; the time of day is kept as is.
    pub fn add_year_month(&self, d: &YearMonthDuration) -> Option<Self> {
        let date = shift_months(self.dt.date(), d.total_months())?;
        Some(Self { dt: date.and_time(self.dt.time()), tz: self.tz })
    }

    pub fn subtract_year_month(&self, d: &YearMonthDuration) -> Option<Self> {
        self.add_year_month(&d.negated())
    }

    fn instant(&self) -> i128 {
        instant_of(self.dt, self.tz)
    }
}

impl FromStr for DateTime {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut sc = Scanner::new("ISO8601 dateTime", s);
        let date = parse_date_fields(&mut sc)?;
        sc.expect(b'T')?;
        let time = parse_time_fields(&mut sc)?;
        let tz = parse_tz(&mut sc)?;
        sc.finish()?;
        Ok(Self { dt: date.and_time(time), tz })
    }
}

impl fmt::Display for DateTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_date(f, self.dt.date())?;
        f.write_str("T")?;
        write_time(f, self.dt.time())?;
        write_tz(f, self.tz)
    }
}

macro_rules! instant_ordering {
    ($($t:ty),*) => {$(
        impl PartialEq for $t {
            fn eq(&self, other: &Self) -> bool {
                self.instant() == other.instant()
            }
        }

        impl Eq for $t {}

        impl Hash for $t {
            fn hash<H: Hasher>(&self, state: &mut H) {
                self.instant().hash(state);
            }
        }

        impl PartialOrd for $t {
            fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
                Some(self.cmp(other))
            }
        }

        impl Ord for $t {
            fn cmp(&self, other: &Self) -> Ordering {
                self.instant().cmp(&other.instant())
            }
        }
    )*};
}

instant_ordering!(Date, Time, DateTime);

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("2002-09-24")]
    #[case("2002-09-24Z")]
    #[case("2002-09-24-06:00")]
    #[case("-0044-03-15")]
    #[case("0000-02-29")]
    #[case("12004-01-01+14:00")]
    fn dates_parse_and_print_back(#[case] input: &str) {
        let d: Date = input.parse().unwrap();
        assert_eq!(d.to_string(), input);
    }

    #[rstest]
    #[case("2013-32-12", 5, "month out of range")]
    #[case("2013-02-29", 8, "day out of range")]
    #[case("13-01-01", 0, "year must have at least four digits")]
    #[case("2013-01-01+15:00", 10, "timezone offset out of range")]
    #[case("2013-01-01T", 10, "expected timezone")]
    fn invalid_dates(#[case] input: &str, #[case] position: usize, #[case] reason: &str) {
        let err = input.parse::<Date>().unwrap_err();
        assert_eq!(err.position, position);
        assert_eq!(err.reason, reason);
        assert!(err.to_string().starts_with(&format!("Invalid ISO8601 date string \"{input}\"")));
    }

    #[rstest]
    #[case("09:30:15", "09:30:15")]
    #[case("09:30:15.3", "09:30:15.300")]
    #[case("09:30:15.123456", "09:30:15.123456")]
    #[case("23:59:59.000000001Z", "23:59:59.000000001Z")]
    #[case("00:00:00+00:00", "00:00:00Z")]
    fn times_print_canonically(#[case] input: &str, #[case] expected: &str) {
        let t: Time = input.parse().unwrap();
        assert_eq!(t.to_string(), expected);
    }

    #[rstest]
    #[case("24:00:00")]
    #[case("12:60:00")]
    #[case("12:00")]
    #[case("12:00:00.")]
    fn invalid_times(#[case] input: &str) {
        assert!(input.parse::<Time>().is_err());
    }

    #[test]
    fn instants_ignore_representation() {
        let a: DateTime = "2002-09-24T10:00:00+02:00".parse().unwrap();
        let b: DateTime = "2002-09-24T08:00:00Z".parse().unwrap();
        let c: DateTime = "2002-09-24T08:00:00".parse().unwrap();
        assert_eq!(a, b);
        assert_eq!(b, c);
        assert!(a < "2002-09-24T08:00:01Z".parse::<DateTime>().unwrap());
    }

    #[rstest]
    #[case("2001-01-31", "P1M", "2001-02-28")]
    #[case("2000-01-31", "P1M", "2000-02-29")]
    #[case("2000-02-29", "P1Y", "2001-02-28")]
    #[case("2001-03-31", "-P1M", "2001-02-28")]
    #[case("2001-05-31Z", "P1Y1M", "2002-06-30Z")]
    fn month_end_is_clamped(#[case] date: &str, #[case] duration: &str, #[case] expected: &str) {
        let d: Date = date.parse().unwrap();
        let ym: YearMonthDuration = duration.parse().unwrap();
        assert_eq!(d.add_year_month(&ym).unwrap().to_string(), expected);
    }

    #[test]
    fn arithmetic_crosses_year_zero() {
        let d: Date = "0001-03-01".parse().unwrap();
        let ym: YearMonthDuration = "P2Y".parse().unwrap();
        assert_eq!(d.subtract_year_month(&ym).unwrap().to_string(), "-0001-03-01");
        let dt: DateTime = "0000-01-01T00:00:00".parse().unwrap();
        let dur: DayTimeDuration = "PT1S".parse().unwrap();
        assert_eq!(dt.subtract_day_time(&dur).unwrap().to_string(), "-0001-12-31T23:59:59");
    }

    #[test]
    fn time_arithmetic_wraps() {
        let t: Time = "23:30:00-05:00".parse().unwrap();
        let d: DayTimeDuration = "PT45M".parse().unwrap();
        assert_eq!(t.add_day_time(&d).to_string(), "00:15:00-05:00");
    }

    #[rstest]
    #[case("P9223372036854775807D")]
    #[case("-P9223372036854775807D")]
    #[case("P200000000D")]
    fn day_time_past_the_calendar_is_none(#[case] duration: &str) {
        let dt: DateTime = "2000-01-12T00:00:00".parse().unwrap();
        let d: DayTimeDuration = duration.parse().unwrap();
        assert!(dt.add_day_time(&d).is_none());
    }

    #[rstest]
    #[case("P700000000000000000Y1M")]
    #[case("-P700000000000000000Y1M")]
    #[case("P300000Y")]
    fn year_month_past_the_calendar_is_none(#[case] duration: &str) {
        let d: Date = "2001-03-31".parse().unwrap();
        let ym: YearMonthDuration = duration.parse().unwrap();
        assert!(d.add_year_month(&ym).is_none());
        let dt: DateTime = "2001-03-31T12:00:00".parse().unwrap();
        assert!(dt.add_year_month(&ym).is_none());
    }

    #[test]
    fn years_past_the_calendar_do_not_parse() {
        let err = "300000-01-01".parse::<Date>().unwrap_err();
        assert_eq!(err.position, 0);
        assert_eq!(err.reason, "year out of range");
    }
}
