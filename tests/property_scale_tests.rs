use brushline::core::{Sample, SampleSeries, TimeScale, ValueScale, Viewport};
use proptest::prelude::*;

proptest! {
    #[test]
    fn scale_endpoints_hit_viewport_edges(
        time_start in -1_000_000_000.0f64..2_000_000_000.0,
        time_span in 0.001f64..1_000_000_000.0,
        value_max in 0.001f64..1_000_000_000.0,
        width in 1u32..4_096,
        height in 1u32..4_096
    ) {
        let viewport = Viewport::new(width, height);
        let time_scale = TimeScale::new(time_start, time_start + time_span, viewport)
            .expect("valid time scale");
        let value_scale = ValueScale::new(value_max, viewport).expect("valid value scale");

        prop_assert_eq!(value_scale.value_to_y(0.0), f64::from(height));
        prop_assert_eq!(value_scale.value_to_y(value_max), 0.0);
        prop_assert_eq!(time_scale.time_to_x(time_start), 0.0);
        let right = time_scale.time_to_x(time_start + time_span);
        prop_assert!((right - f64::from(width)).abs() <= 1e-9 * f64::from(width));
    }

    #[test]
    fn time_scale_round_trip_property(
        time_start in -1_000_000.0f64..1_000_000.0,
        time_span in 0.001f64..1_000_000.0,
        value_factor in 0.0f64..1.0
    ) {
        let viewport = Viewport::new(2048, 1024);
        let scale = TimeScale::new(time_start, time_start + time_span, viewport)
            .expect("valid scale");
        let value = time_start + value_factor * time_span;

        let recovered = scale.x_to_time(scale.time_to_x(value));
        prop_assert!((recovered - value).abs() <= 1e-7);
    }

    #[test]
    fn value_scale_is_monotonic_and_invertible(
        value_max in 0.001f64..1_000_000.0,
        a in 0.0f64..1.0,
        b in 0.0f64..1.0
    ) {
        let scale = ValueScale::new(value_max, Viewport::new(800, 600)).expect("valid scale");
        let (low, high) = if a <= b { (a, b) } else { (b, a) };
        let low_value = low * value_max;
        let high_value = high * value_max;

        // Larger values plot higher, i.e. at smaller y.
        prop_assert!(scale.value_to_y(high_value) <= scale.value_to_y(low_value));
        let recovered = scale.y_to_value(scale.value_to_y(high_value));
        prop_assert!((recovered - high_value).abs() <= 1e-9 * value_max.max(1.0));
    }

    #[test]
    fn series_extent_fits_time_scale(
        mut times in prop::collection::vec(0.0f64..1_000_000.0, 2..64)
    ) {
        times.sort_by(f64::total_cmp);
        prop_assume!(times[0] < times[times.len() - 1]);
        let samples: Vec<Sample> = times.iter().map(|&t| Sample::new(t, 1.0)).collect();
        let series = SampleSeries::new(samples).expect("sorted series");

        let scale = TimeScale::from_series(&series, Viewport::new(1200, 600))
            .expect("valid scale");
        for sample in series.as_slice() {
            let x = scale.time_to_x(sample.time);
            prop_assert!((-1e-9..=1200.0 + 1e-6).contains(&x));
        }
    }
}
