pub type AtlasDateTime = hifitime::Epoch;

/// Weekday of December 31 of `year` once taken modulo 7, 0 for Sunday.
fn dec_31_weekday_index(year: i32) -> i64 {
    let y = year as i64;
    y + y.div_euclid(4) - y.div_euclid(100) + y.div_euclid(400)
}

fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

/// ISO weekday of January 4, 1 for Monday up to 7 for Sunday.
fn iso_weekday_of_january_4(year: i32) -> i64 {
    let sunday_based = (dec_31_weekday_index(year - 1) + 4).rem_euclid(7);
    if sunday_based == 0 { 7 } else { sunday_based }
}

/// ISO years have 53 weeks when January 1 or December 31 is a Thursday.
fn iso_weeks_in_year(year: i32) -> u32 {
    let p = |y: i32| dec_31_weekday_index(y).rem_euclid(7);
    if p(year) == 4 || p(year - 1) == 3 { 53 } else { 52 }
}

/// Calendar anchor in `year` plus a day offset from it.
fn resolve_date(date: iso8601::Date) -> Option<(i32, u8, u8, i64)> {
    match date {
        iso8601::Date::YMD { year, month, day } => Some((year, month as u8, day as u8, 0)),
        iso8601::Date::Week { year, ww, d } => {
            if ww == 0 || ww > iso_weeks_in_year(year) || d == 0 || d > 7 {
                return None;
            }
            // Week 1 is the week holding January 4.
            let week_one_monday = 1 - iso_weekday_of_january_4(year);
            let offset = week_one_monday + 7 * (ww as i64 - 1) + (d as i64 - 1);
            Some((year, 1, 4, offset))
        }
        iso8601::Date::Ordinal { year, ddd } => {
            let days_in_year = if is_leap_year(year) { 366 } else { 365 };
            if ddd == 0 || ddd > days_in_year {
                return None;
            }
            Some((year, 1, 1, ddd as i64 - 1))
        }
    }
}

fn convert_datetime_from_iso8601_to_hifitime(dt: iso8601::DateTime) -> Option<AtlasDateTime> {
    let iso8601::DateTime { date, time } = dt;
    let (year, month, day, day_offset) = resolve_date(date)?;
    let iso8601::Time {
        hour,
        minute,
        second,
        millisecond,
        tz_offset_hours,
        tz_offset_minutes,
    } = time;

    let nanos = millisecond * 1_000_000_u32;
    let mut epoch = hifitime::Epoch::maybe_from_gregorian_utc(
        year,
        month,
        day,
        hour as u8,
        minute as u8,
        second as u8,
        nanos,
    )
    .ok()?;

    if day_offset != 0 {
        epoch += hifitime::Unit::Day * day_offset;
    }

    // The wall clock is local to the offset, UTC is wall clock minus offset.
    let offset_minutes = tz_offset_hours as i64 * 60 + tz_offset_minutes as i64;
    if offset_minutes != 0 {
        epoch = epoch - hifitime::Unit::Minute * offset_minutes;
    }

    Some(epoch)
}

/// Parses an ISO-8601 datetime, the whole input must be consumed.
///
/// Returns `None` on any failure, callers decide how loud to be about it.
pub fn parse_iso8601_datetime(data: &str) -> Option<AtlasDateTime> {
    match iso8601::parsers::parse_datetime(data.trim().as_bytes()) {
        Ok((rest, dt)) if rest.is_empty() => convert_datetime_from_iso8601_to_hifitime(dt),
        _ => None,
    }
}

/// Renders a datetime as an RFC 3339 UTC string, milliseconds only when needed.
pub fn format_iso8601_datetime(datetime: &AtlasDateTime) -> String {
    let (year, month, day, hour, minute, second, nanos) = datetime.to_gregorian_utc();
    if nanos == 0 {
        format!(
            "{:04}-{:02}-{:02}T{:02}:{:02}:{:02}Z",
            year, month, day, hour, minute, second
        )
    } else {
        format!(
            "{:04}-{:02}-{:02}T{:02}:{:02}:{:02}.{:03}Z",
            year,
            month,
            day,
            hour,
            minute,
            second,
            nanos / 1_000_000
        )
    }
}
