use core::fmt;
use core::str::FromStr;

use super::iso8601::{NANOS_PER_DAY, NANOS_PER_SECOND, fraction_digits};
use super::{ParseError, Scanner};

const KIND: &str = "ISO8601 duration";

/// `dayTimeDuration`: days, hours, minutes and (fractional) seconds, held as signed nanoseconds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DayTimeDuration {
    nanos: i128,
}

/// `yearMonthDuration`: years and months, held as signed months.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct YearMonthDuration {
    months: i64,
}

impl DayTimeDuration {
    pub fn from_nanos(nanos: i128) -> Self {
        Self { nanos }
    }

    pub fn from_seconds(seconds: i64) -> Self {
        Self { nanos: i128::from(seconds) * NANOS_PER_SECOND }
    }

    pub fn total_nanos(&self) -> i128 {
        self.nanos
    }

    pub fn negated(&self) -> Self {
        Self { nanos: -self.nanos }
    }
}

impl YearMonthDuration {
    pub fn from_months(months: i64) -> Self {
        Self { months }
    }

    pub fn total_months(&self) -> i64 {
        self.months
    }

    pub fn negated(&self) -> Self {
        Self { months: -self.months }
    }
}

fn component(sc: &Scanner<'_>, at: usize, digits: &str) -> Result<i128, ParseError> {
    digits.parse::<i128>().map_err(|_| sc.error_at(at, "component too large"))
}

impl FromStr for DayTimeDuration {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut sc = Scanner::new(KIND, s);
        let negative = sc.eat(b'-');
        sc.expect(b'P')?;
        let overflow = |sc: &Scanner<'_>| sc.error("duration too large");
        let mut total: i128 = 0;
        let mut seen = false;
        if sc.peek().is_some_and(|b| b.is_ascii_digit()) {
            let at = sc.pos();
            let digits = sc.digits()?;
            let days = component(&sc, at, digits)?;
            sc.expect(b'D')?;
            total = days.checked_mul(NANOS_PER_DAY).ok_or_else(|| overflow(&sc))?;
            seen = true;
        }
        if sc.eat(b'T') {
            let mut last_unit = 0u8;
            let mut seen_time = false;
            while sc.peek().is_some_and(|b| b.is_ascii_digit()) {
                let at = sc.pos();
                let digits = sc.digits()?;
                let value = component(&sc, at, digits)?;
                let mut fraction = 0i128;
                if sc.eat(b'.') {
                    let frac = sc.digits()?;
                    let mut scale = NANOS_PER_SECOND / 10;
                    for b in frac.bytes().take(9) {
                        fraction += i128::from(b - b'0') * scale;
                        scale /= 10;
                    }
                    if sc.peek() != Some(b'S') {
                        return Err(sc.error("expected 'S' after fractional seconds"));
                    }
                }
                let unit_at = sc.pos();
                let (rank, unit, unit_nanos) = match sc.peek() {
                    Some(b'H') => (1, b'H', 3600 * NANOS_PER_SECOND),
                    Some(b'M') => (2, b'M', 60 * NANOS_PER_SECOND),
                    Some(b'S') => (3, b'S', NANOS_PER_SECOND),
                    _ => return Err(sc.error("expected 'H', 'M' or 'S'")),
                };
                if rank <= last_unit {
                    return Err(sc.error_at(unit_at, "components out of order"));
                }
                sc.expect(unit)?;
                last_unit = rank;
                seen_time = true;
                total = value
                    .checked_mul(unit_nanos)
                    .and_then(|v| v.checked_add(fraction))
                    .and_then(|v| total.checked_add(v))
                    .ok_or_else(|| overflow(&sc))?;
            }
            if !seen_time {
                return Err(sc.error("expected time component after 'T'"));
            }
            seen = true;
        }
        if !seen {
            return Err(sc.error("expected at least one component"));
        }
        sc.finish()?;
        Ok(Self { nanos: if negative { -total } else { total } })
    }
}

impl fmt::Display for DayTimeDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.nanos == 0 {
            return f.write_str("PT0S");
        }
        if self.nanos < 0 {
            f.write_str("-")?;
        }
        f.write_str("P")?;
        let abs = self.nanos.unsigned_abs();
        let day = NANOS_PER_DAY.unsigned_abs();
        let second = NANOS_PER_SECOND.unsigned_abs();
        let days = abs / day;
        let rem = abs % day;
        let secs = rem / second;
        let nanos = (rem % second) as u32;
        let (hours, minutes, seconds) = (secs / 3600, secs / 60 % 60, secs % 60);
        if days > 0 {
            write!(f, "{days}D")?;
        }
        if rem > 0 {
            f.write_str("T")?;
            if hours > 0 {
                write!(f, "{hours}H")?;
            }
            if minutes > 0 {
                write!(f, "{minutes}M")?;
            }
            if seconds > 0 || nanos > 0 {
                write!(f, "{seconds}")?;
                if nanos > 0 {
                    write!(f, ".{}", fraction_digits(nanos, 1))?;
                }
                f.write_str("S")?;
            }
        }
        Ok(())
    }
}

impl FromStr for YearMonthDuration {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut sc = Scanner::new(KIND, s);
        let negative = sc.eat(b'-');
        sc.expect(b'P')?;
        let mut months: i64 = 0;
        let mut last_unit = 0u8;
        while sc.peek().is_some_and(|b| b.is_ascii_digit()) {
            let at = sc.pos();
            let value = sc.digits()?.parse::<i64>().map_err(|_| sc.error_at(at, "component too large"))?;
            let unit_at = sc.pos();
            let (rank, factor) = if sc.eat(b'Y') {
                (1, 12)
            } else if sc.eat(b'M') {
                (2, 1)
            } else {
                return Err(sc.error("expected 'Y' or 'M'"));
            };
            if rank <= last_unit {
                return Err(sc.error_at(unit_at, "components out of order"));
            }
            last_unit = rank;
            months = value
                .checked_mul(factor)
                .and_then(|v| months.checked_add(v))
                .ok_or_else(|| sc.error_at(at, "duration too large"))?;
        }
        if last_unit == 0 {
            return Err(sc.error("expected at least one component"));
        }
        sc.finish()?;
        Ok(Self { months: if negative { -months } else { months } })
    }
}

impl fmt::Display for YearMonthDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.months == 0 {
            return f.write_str("P0M");
        }
        if self.months < 0 {
            f.write_str("-")?;
        }
        let abs = self.months.unsigned_abs();
        let (years, months) = (abs / 12, abs % 12);
        f.write_str("P")?;
        if years > 0 {
            write!(f, "{years}Y")?;
        }
        if months > 0 {
            write!(f, "{months}M")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("P1DT2H", "P1DT2H")]
    #[case("PT36H", "P1DT12H")]
    #[case("-P5DT7H10M3.3S", "-P5DT7H10M3.3S")]
    #[case("PT0.000001S", "PT0.000001S")]
    #[case("P0D", "PT0S")]
    #[case("PT90M", "PT1H30M")]
    fn day_time_canonical_form(#[case] input: &str, #[case] expected: &str) {
        let d: DayTimeDuration = input.parse().unwrap();
        assert_eq!(d.to_string(), expected);
        assert_eq!(expected.parse::<DayTimeDuration>().unwrap(), d);
    }

    #[rstest]
    #[case("P", 1, "expected at least one component")]
    #[case("P1Y", 2, "expected 'D'")]
    #[case("PT", 2, "expected time component after 'T'")]
    #[case("PT1S2M", 5, "components out of order")]
    #[case("1D", 0, "expected 'P'")]
    #[case("PT1.5M", 5, "expected 'S' after fractional seconds")]
    fn invalid_day_time(#[case] input: &str, #[case] position: usize, #[case] reason: &str) {
        let err = input.parse::<DayTimeDuration>().unwrap_err();
        assert_eq!((err.position, err.reason.as_str()), (position, reason));
        assert!(err.to_string().starts_with("Invalid ISO8601 duration string"));
    }

    #[rstest]
    #[case("P1Y2M", 14)]
    #[case("P14M", 14)]
    #[case("-P2Y", -24)]
    #[case("P0Y", 0)]
    fn year_month_totals(#[case] input: &str, #[case] months: i64) {
        assert_eq!(input.parse::<YearMonthDuration>().unwrap().total_months(), months);
    }

    #[test]
    fn year_month_canonical_form() {
        assert_eq!("P14M".parse::<YearMonthDuration>().unwrap().to_string(), "P1Y2M");
        assert_eq!("P0Y".parse::<YearMonthDuration>().unwrap().to_string(), "P0M");
        assert!("P1D".parse::<YearMonthDuration>().is_err());
        assert!("P1M1Y".parse::<YearMonthDuration>().is_err());
    }
}
