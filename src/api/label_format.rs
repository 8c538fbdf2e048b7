use crate::core::unix_seconds_to_datetime;

use super::axis_ticks::{format_grouped, step_precision};

/// Tooltip date line, e.g. `Jun 1, 2020` (UTC).
#[must_use]
pub fn format_tooltip_date(seconds: f64) -> String {
    unix_seconds_to_datetime(seconds)
        .map(|time| time.format("%b %-d, %Y").to_string())
        .unwrap_or_default()
}

/// Tooltip value line with two fraction digits.
#[must_use]
pub fn format_tooltip_value(value: f64) -> String {
    format!("{value:.2}")
}

/// Value-axis label with grouping and just enough precision for `step`.
#[must_use]
pub(super) fn format_value_tick(value: f64, step: f64) -> String {
    format_grouped(value, step_precision(step))
}

#[cfg(test)]
mod tests {
    use super::{format_tooltip_date, format_tooltip_value, format_value_tick};
    use crate::core::datetime_to_unix_seconds;
    use chrono::{TimeZone, Utc};

    #[test]
    fn tooltip_texts_use_short_month_and_two_decimals() {
        let june = Utc
            .with_ymd_and_hms(2020, 6, 1, 0, 0, 0)
            .single()
            .expect("valid date");
        assert_eq!(format_tooltip_date(datetime_to_unix_seconds(june)), "Jun 1, 2020");
        assert_eq!(format_tooltip_value(50.0), "50.00");
        assert_eq!(format_tooltip_value(1.005_1), "1.01");
        assert_eq!(format_tooltip_date(f64::NAN), "");
    }

    #[test]
    fn value_ticks_follow_step_precision() {
        assert_eq!(format_value_tick(12_500.0, 500.0), "12,500");
        assert_eq!(format_value_tick(0.4, 0.2), "0.4");
    }
}
