//! ISO-8601 date/time parsing and formatting.
//!
//! Published timestamps are held as milliseconds since the Unix epoch and
//! serialized as ISO-8601 UTC strings (`2024-01-15T10:30:00Z`). Parsing
//! accepts an arbitrary timezone offset and normalizes to UTC.

const MILLISECONDS_PER_SECOND: i64 = 1_000;
const MILLISECONDS_PER_MINUTE: i64 = 60 * MILLISECONDS_PER_SECOND;
const MILLISECONDS_PER_HOUR: i64 = 60 * MILLISECONDS_PER_MINUTE;
const MILLISECONDS_PER_DAY: i64 = 24 * MILLISECONDS_PER_HOUR;

/// Error type for ISO-8601 parsing failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateTimeParseError {
    pub message: String,
}

impl std::fmt::Display for DateTimeParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for DateTimeParseError {}

fn invalid(what: &str, input: &str) -> DateTimeParseError {
    DateTimeParseError {
        message: format!("Invalid {} in datetime: {}", what, input),
    }
}

/// A point in time with millisecond precision.
///
/// Wraps signed milliseconds since 1970-01-01T00:00:00Z.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(i64);

impl Timestamp {
    /// Creates a timestamp from milliseconds since the Unix epoch.
    pub fn from_epoch_millis(millis: i64) -> Self {
        Timestamp(millis)
    }

    /// Returns milliseconds since the Unix epoch.
    pub fn epoch_millis(self) -> i64 {
        self.0
    }

    /// Parses an ISO-8601 datetime string (`YYYY-MM-DDTHH:MM:SS[.sss][Z|+HH:MM]`).
    pub fn parse_iso8601(input: &str) -> Result<Self, DateTimeParseError> {
        parse_datetime(input).map(Timestamp)
    }

    /// Formats as an ISO-8601 UTC string, emitting fractional seconds only
    /// when the millisecond part is non-zero.
    pub fn to_iso8601(self) -> String {
        format_datetime(self.0)
    }
}

/// Parses a timezone offset string (Z, +HH:MM, -HH:MM) and returns offset in minutes.
fn parse_timezone_offset(offset: &str, input: &str) -> Result<i64, DateTimeParseError> {
    if offset == "Z" || offset == "z" {
        return Ok(0);
    }

    if offset.len() != 6 || offset.as_bytes()[3] != b':' {
        return Err(invalid("timezone offset", input));
    }

    let sign = match offset.as_bytes()[0] {
        b'+' => 1i64,
        b'-' => -1i64,
        _ => return Err(invalid("timezone offset", input)),
    };

    let hours: i64 = offset[1..3]
        .parse()
        .map_err(|_| invalid("timezone offset", input))?;
    let minutes: i64 = offset[4..6]
        .parse()
        .map_err(|_| invalid("timezone offset", input))?;

    if hours > 23 || minutes > 59 {
        return Err(invalid("timezone offset", input));
    }

    Ok(sign * (hours * 60 + minutes))
}

/// Parses a fractional-seconds string into milliseconds, padding or
/// truncating to 3 digits.
fn parse_fractional_millis(frac: &str) -> i64 {
    let mut padded = frac.to_string();
    while padded.len() < 3 {
        padded.push('0');
    }
    padded.truncate(3);
    padded.parse().unwrap_or(0)
}

/// Returns true if the given year is a leap year.
fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || (year % 400 == 0)
}

/// Returns the number of days in a given month (1-indexed).
fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 => {
            if is_leap_year(year) {
                29
            } else {
                28
            }
        }
        _ => 0,
    }
}

/// Calculates days since Unix epoch for a given date (Howard Hinnant's algorithm).
fn date_to_days(year: i32, month: u32, day: u32) -> i64 {
    let y = if month <= 2 { year - 1 } else { year } as i64;
    let m = if month <= 2 {
        month as i64 + 9
    } else {
        month as i64 - 3
    };

    let era = if y >= 0 { y } else { y - 399 } / 400;
    let yoe = (y - era * 400) as u32;
    let doy = (153 * m as u32 + 2) / 5 + day - 1;
    let doe = yoe * 365 + yoe / 4 - yoe / 100 + doy;

    era * 146097 + doe as i64 - 719468
}

/// Converts days since Unix epoch to (year, month, day).
fn days_to_date(days: i64) -> (i32, u32, u32) {
    let z = days + 719468;
    let era = if z >= 0 { z } else { z - 146096 } / 146097;
    let doe = (z - era * 146097) as u32;
    let yoe = (doe - doe / 1460 + doe / 36524 - doe / 146096) / 365;
    let y = yoe as i64 + era * 400;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let d = doy - (153 * mp + 2) / 5 + 1;
    let m = if mp < 10 { mp + 3 } else { mp - 9 };

    let year = if m <= 2 { y + 1 } else { y } as i32;
    (year, m, d)
}

/// Parses an ISO-8601 datetime string into milliseconds since the Unix epoch.
fn parse_datetime(input: &str) -> Result<i64, DateTimeParseError> {
    // Minimum length is 19 (YYYY-MM-DDTHH:MM:SS). ASCII-only keeps the
    // fixed-position slicing below safe.
    if input.len() < 19 || !input.is_ascii() {
        return Err(invalid("format", input));
    }

    let bytes = input.as_bytes();
    if bytes[10] != b'T' && bytes[10] != b' ' {
        return Err(invalid("format", input));
    }
    if bytes[4] != b'-' || bytes[7] != b'-' || bytes[13] != b':' || bytes[16] != b':' {
        return Err(invalid("format", input));
    }

    let year: i32 = input[..4].parse().map_err(|_| invalid("year", input))?;
    let month: u32 = input[5..7].parse().map_err(|_| invalid("month", input))?;
    let day: u32 = input[8..10].parse().map_err(|_| invalid("day", input))?;
    let hours: i64 = input[11..13].parse().map_err(|_| invalid("hours", input))?;
    let minutes: i64 = input[14..16]
        .parse()
        .map_err(|_| invalid("minutes", input))?;
    let seconds: i64 = input[17..19]
        .parse()
        .map_err(|_| invalid("seconds", input))?;

    if !(1..=12).contains(&month) {
        return Err(invalid("month", input));
    }
    if day < 1 || day > days_in_month(year, month) {
        return Err(invalid("day", input));
    }
    if hours > 23 || minutes > 59 || seconds > 59 {
        return Err(invalid("time", input));
    }

    // Optional fractional seconds, then optional timezone offset.
    let rest = &input[19..];
    let (millis, offset_str) = if let Some(frac_rest) = rest.strip_prefix('.') {
        let frac_end = frac_rest
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(frac_rest.len());
        if frac_end == 0 {
            return Err(invalid("fractional seconds", input));
        }
        (
            parse_fractional_millis(&frac_rest[..frac_end]),
            &frac_rest[frac_end..],
        )
    } else {
        (0, rest)
    };

    let offset_min = if offset_str.is_empty() {
        0
    } else {
        parse_timezone_offset(offset_str, input)?
    };

    let epoch_millis = date_to_days(year, month, day) * MILLISECONDS_PER_DAY
        + hours * MILLISECONDS_PER_HOUR
        + minutes * MILLISECONDS_PER_MINUTE
        + seconds * MILLISECONDS_PER_SECOND
        + millis
        - offset_min * MILLISECONDS_PER_MINUTE;

    Ok(epoch_millis)
}

/// Formats milliseconds since the Unix epoch as an ISO-8601 UTC string.
fn format_datetime(epoch_millis: i64) -> String {
    let days = epoch_millis.div_euclid(MILLISECONDS_PER_DAY);
    let ms_of_day = epoch_millis.rem_euclid(MILLISECONDS_PER_DAY);

    let (year, month, day) = days_to_date(days);
    let hours = ms_of_day / MILLISECONDS_PER_HOUR;
    let minutes = (ms_of_day % MILLISECONDS_PER_HOUR) / MILLISECONDS_PER_MINUTE;
    let seconds = (ms_of_day % MILLISECONDS_PER_MINUTE) / MILLISECONDS_PER_SECOND;
    let millis = ms_of_day % MILLISECONDS_PER_SECOND;

    let frac = if millis == 0 {
        String::new()
    } else {
        format!(".{:03}", millis)
    };

    format!(
        "{:04}-{:02}-{:02}T{:02}:{:02}:{:02}{}Z",
        year, month, day, hours, minutes, seconds, frac
    )
}
