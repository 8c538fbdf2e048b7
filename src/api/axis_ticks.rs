use chrono::{DateTime, Datelike, Months, NaiveDate, TimeZone, Utc};

use crate::core::primitives::{datetime_to_unix_seconds, unix_seconds_to_datetime};

pub(super) const AXIS_TIME_MIN_SPACING_PX: f64 = 56.0;

const SECOND: f64 = 1.0;
const MINUTE: f64 = 60.0;
const HOUR: f64 = 3_600.0;
const DAY: f64 = 86_400.0;
const WEEK: f64 = 7.0 * DAY;
const MONTH: f64 = 30.0 * DAY;
const YEAR: f64 = 365.0 * DAY;
/// 1970-01-01 was a Thursday; the first Sunday is three days later.
const FIRST_SUNDAY_OFFSET: f64 = 3.0 * DAY;

/// Calendar step between two consecutive time ticks.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(super) enum TimeTickInterval {
    /// Plain decimal step in seconds, used below one second.
    SubSecond(f64),
    Second(u32),
    Minute(u32),
    Hour(u32),
    Day(u32),
    Week,
    Month(u32),
    Year(u32),
}

impl TimeTickInterval {
    fn approximate_seconds(self) -> f64 {
        match self {
            Self::SubSecond(step) => step,
            Self::Second(n) => f64::from(n) * SECOND,
            Self::Minute(n) => f64::from(n) * MINUTE,
            Self::Hour(n) => f64::from(n) * HOUR,
            Self::Day(n) => f64::from(n) * DAY,
            Self::Week => WEEK,
            Self::Month(n) => f64::from(n) * MONTH,
            Self::Year(n) => f64::from(n) * YEAR,
        }
    }
}

const TIME_INTERVALS: [TimeTickInterval; 17] = [
    TimeTickInterval::Second(1),
    TimeTickInterval::Second(5),
    TimeTickInterval::Second(15),
    TimeTickInterval::Second(30),
    TimeTickInterval::Minute(1),
    TimeTickInterval::Minute(5),
    TimeTickInterval::Minute(15),
    TimeTickInterval::Minute(30),
    TimeTickInterval::Hour(1),
    TimeTickInterval::Hour(3),
    TimeTickInterval::Hour(6),
    TimeTickInterval::Hour(12),
    TimeTickInterval::Day(1),
    TimeTickInterval::Day(2),
    TimeTickInterval::Week,
    TimeTickInterval::Month(1),
    TimeTickInterval::Month(3),
];

/// Tick increment of roughly `count` steps over `[start, stop]`, snapped to
/// 1, 2 or 5 times a power of ten.
pub(super) fn tick_step(start: f64, stop: f64, count: usize) -> f64 {
    let raw = (stop - start).abs() / count.max(1) as f64;
    if !raw.is_finite() || raw <= 0.0 {
        return 0.0;
    }
    let power = 10f64.powf(raw.log10().floor());
    let error = raw / power;
    let factor = if error >= 50f64.sqrt() {
        10.0
    } else if error >= 10f64.sqrt() {
        5.0
    } else if error >= 2f64.sqrt() {
        2.0
    } else {
        1.0
    };
    factor * power
}

/// Evenly spaced "nice" values inside `[start, stop]`.
pub(super) fn linear_ticks(start: f64, stop: f64, count: usize) -> Vec<f64> {
    if !start.is_finite() || !stop.is_finite() || count == 0 {
        return Vec::new();
    }
    if start == stop {
        return vec![start];
    }
    let (lo, hi) = (start.min(stop), start.max(stop));
    let step = tick_step(lo, hi, count);
    if step <= 0.0 {
        return vec![lo];
    }

    if step >= 1.0 {
        let first = (lo / step).ceil() as i64;
        let last = (hi / step).floor() as i64;
        (first..=last).map(|i| i as f64 * step).collect()
    } else {
        // Divide by the inverse step so values like 0.3 stay exact.
        let inverse = (1.0 / step).round();
        let first = (lo * inverse).ceil() as i64;
        let last = (hi * inverse).floor() as i64;
        (first..=last).map(|i| i as f64 / inverse).collect()
    }
}

/// Number of fraction digits needed to print values spaced by `step`.
pub(super) fn step_precision(step: f64) -> usize {
    if !step.is_finite() || step <= 0.0 || step >= 1.0 {
        return 0;
    }
    (-step.log10().floor()).max(0.0) as usize
}

/// Fixed-point rendering with `,` thousands grouping, e.g. `12,500.5`.
pub(super) fn format_grouped(value: f64, precision: usize) -> String {
    let raw = format!("{:.*}", precision, value.abs());
    let (integer, fraction) = match raw.split_once('.') {
        Some((integer, fraction)) => (integer, Some(fraction)),
        None => (raw.as_str(), None),
    };

    let mut grouped = String::with_capacity(raw.len() + integer.len() / 3 + 1);
    for (index, digit) in integer.chars().enumerate() {
        if index > 0 && (integer.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    if let Some(fraction) = fraction {
        grouped.push('.');
        grouped.push_str(fraction);
    }

    let is_zero = grouped.chars().all(|c| c == '0' || c == '.' || c == ',');
    if value.is_sign_negative() && !is_zero {
        grouped.insert(0, '-');
    }
    grouped
}

/// Picks the calendar interval whose length best matches `span / count`.
pub(super) fn select_time_interval(start: f64, end: f64, count: usize) -> TimeTickInterval {
    let span = (end - start).abs();
    let target = span / count.max(1) as f64;

    let index = TIME_INTERVALS.partition_point(|interval| interval.approximate_seconds() < target);
    if index == 0 {
        if target >= SECOND {
            return TimeTickInterval::Second(1);
        }
        return TimeTickInterval::SubSecond(tick_step(start, end, count).max(0.001));
    }
    if index == TIME_INTERVALS.len() {
        let years = tick_step(start / YEAR, end / YEAR, count).max(1.0);
        let last = TimeTickInterval::Month(3);
        if target / last.approximate_seconds() < YEAR / target && years <= 1.0 {
            return last;
        }
        return TimeTickInterval::Year(years.round() as u32);
    }

    let below = TIME_INTERVALS[index - 1];
    let above = TIME_INTERVALS[index];
    if target / below.approximate_seconds() < above.approximate_seconds() / target {
        below
    } else {
        above
    }
}

/// Tick instants (unix seconds) for `interval` inside `[start, end]`.
pub(super) fn time_ticks(start: f64, end: f64, interval: TimeTickInterval) -> Vec<f64> {
    let (start, end) = (start.min(end), start.max(end));
    if !start.is_finite() || !end.is_finite() {
        return Vec::new();
    }

    match interval {
        TimeTickInterval::SubSecond(step) => linear_ticks(start, end, ((end - start) / step) as usize),
        TimeTickInterval::Second(n) => aligned_ticks(start, end, f64::from(n) * SECOND, 0.0),
        TimeTickInterval::Minute(n) => aligned_ticks(start, end, f64::from(n) * MINUTE, 0.0),
        TimeTickInterval::Hour(n) => aligned_ticks(start, end, f64::from(n) * HOUR, 0.0),
        TimeTickInterval::Week => aligned_ticks(start, end, WEEK, FIRST_SUNDAY_OFFSET),
        TimeTickInterval::Day(n) => calendar_ticks(start, end, |date| {
            date.day0() % n == 0
        }, |date| date.succ_opt()),
        TimeTickInterval::Month(n) => calendar_ticks(
            start,
            end,
            |date| date.day() == 1 && date.month0() % n == 0,
            |date| first_of_next_month(date),
        ),
        TimeTickInterval::Year(n) => calendar_ticks(
            start,
            end,
            |date| date.ordinal() == 1 && date.year().rem_euclid(n.max(1) as i32) == 0,
            |date| NaiveDate::from_ymd_opt(date.year() + 1, 1, 1),
        ),
    }
}

fn aligned_ticks(start: f64, end: f64, unit: f64, offset: f64) -> Vec<f64> {
    let first = ((start - offset) / unit).ceil() as i64;
    let last = ((end - offset) / unit).floor() as i64;
    (first..=last).map(|i| i as f64 * unit + offset).collect()
}

fn calendar_ticks(
    start: f64,
    end: f64,
    keep: impl Fn(NaiveDate) -> bool,
    next: impl Fn(NaiveDate) -> Option<NaiveDate>,
) -> Vec<f64> {
    let Some(start_dt) = unix_seconds_to_datetime(start) else {
        return Vec::new();
    };
    let mut date = start_dt.date_naive();
    if midnight_seconds(date) < start {
        let Some(after) = date.succ_opt() else {
            return Vec::new();
        };
        date = after;
    }
    // Align coarse steps to the first boundary they can land on.
    while !keep(date) {
        let Some(following) = date.succ_opt() else {
            return Vec::new();
        };
        if midnight_seconds(following) > end {
            return Vec::new();
        }
        date = following;
    }

    let mut ticks = Vec::new();
    loop {
        let at = midnight_seconds(date);
        if at > end {
            break;
        }
        if keep(date) {
            ticks.push(at);
        }
        match next(date) {
            Some(following) => date = following,
            None => break,
        }
    }
    ticks
}

fn first_of_next_month(date: NaiveDate) -> Option<NaiveDate> {
    date.with_day(1)?.checked_add_months(Months::new(1))
}

fn midnight_seconds(date: NaiveDate) -> f64 {
    date.and_hms_opt(0, 0, 0)
        .map_or(f64::NAN, |naive| datetime_to_unix_seconds(Utc.from_utc_datetime(&naive)))
}

/// Multi-scale label: the coarsest unit that is not at its boundary decides.
pub(super) fn format_time_tick(seconds: f64) -> String {
    let Some(time) = unix_seconds_to_datetime(seconds) else {
        return String::new();
    };
    format_time_tick_datetime(time)
}

fn format_time_tick_datetime(time: DateTime<Utc>) -> String {
    use chrono::{Timelike, Weekday};

    let millis = time.timestamp_subsec_millis();
    if millis != 0 {
        format!(".{millis:03}")
    } else if time.second() != 0 {
        time.format(":%S").to_string()
    } else if time.minute() != 0 {
        time.format("%I:%M").to_string()
    } else if time.hour() != 0 {
        time.format("%I %p").to_string()
    } else if time.day() != 1 {
        if time.weekday() == Weekday::Sun {
            time.format("%b %d").to_string()
        } else {
            time.format("%a %d").to_string()
        }
    } else if time.month() != 1 {
        time.format("%B").to_string()
    } else {
        time.format("%Y").to_string()
    }
}

/// Greedily keeps ticks at least `min_spacing_px` apart, left to right.
pub(super) fn select_ticks_with_min_spacing(
    mut ticks: Vec<(f64, f64)>,
    min_spacing_px: f64,
) -> Vec<(f64, f64)> {
    if ticks.is_empty() {
        return ticks;
    }

    ticks.sort_by(|left, right| left.1.total_cmp(&right.1));
    if ticks.len() == 1 || !min_spacing_px.is_finite() || min_spacing_px <= 0.0 {
        return ticks;
    }

    let mut selected: Vec<(f64, f64)> = Vec::with_capacity(ticks.len());
    for tick in ticks {
        match selected.last() {
            Some(last) if tick.1 - last.1 < min_spacing_px => {}
            _ => selected.push(tick),
        }
    }
    selected
}

#[cfg(test)]
mod tests {
    use super::{
        TimeTickInterval, format_grouped, format_time_tick, linear_ticks, select_time_interval,
        select_ticks_with_min_spacing, step_precision, time_ticks,
    };
    use crate::core::primitives::datetime_to_unix_seconds;
    use chrono::{TimeZone, Utc};

    fn at(year: i32, month: u32, day: u32) -> f64 {
        datetime_to_unix_seconds(
            Utc.with_ymd_and_hms(year, month, day, 0, 0, 0)
                .single()
                .expect("valid date"),
        )
    }

    #[test]
    fn linear_ticks_use_nice_steps() {
        assert_eq!(
            linear_ticks(0.0, 50.0, 10),
            vec![0.0, 5.0, 10.0, 15.0, 20.0, 25.0, 30.0, 35.0, 40.0, 45.0, 50.0]
        );
        assert_eq!(linear_ticks(0.0, 1.0, 5), vec![0.0, 0.2, 0.4, 0.6, 0.8, 1.0]);
        assert_eq!(linear_ticks(3.0, 3.0, 10), vec![3.0]);
    }

    #[test]
    fn grouped_format_inserts_thousands_separators() {
        assert_eq!(format_grouped(1_234_567.0, 0), "1,234,567");
        assert_eq!(format_grouped(-1_500.25, 2), "-1,500.25");
        assert_eq!(format_grouped(0.0, 1), "0.0");
        assert_eq!(step_precision(0.2), 1);
        assert_eq!(step_precision(0.05), 2);
        assert_eq!(step_precision(5.0), 0);
    }

    #[test]
    fn one_year_span_selects_monthly_ticks() {
        let interval = select_time_interval(at(2020, 1, 1), at(2021, 1, 1), 10);
        assert_eq!(interval, TimeTickInterval::Month(1));

        let ticks = time_ticks(at(2020, 1, 1), at(2021, 1, 1), interval);
        assert_eq!(ticks.len(), 13);
        assert_eq!(ticks[0], at(2020, 1, 1));
        assert_eq!(ticks[12], at(2021, 1, 1));
    }

    #[test]
    fn decade_span_selects_yearly_ticks() {
        let interval = select_time_interval(at(2000, 1, 1), at(2020, 1, 1), 10);
        assert_eq!(interval, TimeTickInterval::Year(2));
        let ticks = time_ticks(at(2000, 6, 1), at(2020, 1, 1), interval);
        assert_eq!(ticks.first().copied(), Some(at(2002, 1, 1)));
    }

    #[test]
    fn multi_scale_labels_follow_tick_granularity() {
        assert_eq!(format_time_tick(at(2020, 1, 1)), "2020");
        assert_eq!(format_time_tick(at(2020, 6, 1)), "June");
        assert_eq!(format_time_tick(at(2020, 6, 7)), "Jun 07");
        assert_eq!(format_time_tick(at(2020, 6, 8)), "Mon 08");
        assert_eq!(format_time_tick(at(2020, 6, 8) + 3.0 * 3_600.0), "03 AM");
    }

    #[test]
    fn min_spacing_drops_crowded_ticks() {
        let selected = select_ticks_with_min_spacing(
            vec![(1.0, 0.0), (2.0, 30.0), (3.0, 60.0), (4.0, 130.0)],
            56.0,
        );
        let values: Vec<f64> = selected.iter().map(|tick| tick.0).collect();
        assert_eq!(values, vec![1.0, 3.0, 4.0]);
    }
}
