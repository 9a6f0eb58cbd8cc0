//! Property-based tests for the layout rule and time truncation.

use chrono::{Duration, TimeZone, Timelike, Utc};
use czml_types::{format_datetime_like, AstroTime, Cartesian3Value, Error, RgbafValue};
use proptest::prelude::*;

fn valid_length(len: usize, coords: usize) -> bool {
    len == coords || (len > 0 && len % (coords + 1) == 0)
}

proptest! {
    #[test]
    fn prop_cartesian_layout(values in prop::collection::vec(any::<f64>(), 0..40)) {
        let len = values.len();
        match Cartesian3Value::new(values.clone()) {
            Ok(value) => {
                prop_assert!(valid_length(len, 3));
                // Stored unchanged, bit for bit.
                let stored: Vec<u64> = value.values().iter().map(|v| v.to_bits()).collect();
                let given: Vec<u64> = values.iter().map(|v| v.to_bits()).collect();
                prop_assert_eq!(stored, given);
            }
            Err(err) => {
                prop_assert!(!valid_length(len, 3));
                prop_assert_eq!(err, Error::invalid_length(3, len));
            }
        }
    }

    #[test]
    fn prop_samples_cover_values(n in 1usize..10) {
        let values: Vec<f64> = (0..n * 4).map(|i| i as f64).collect();
        let value = Cartesian3Value::new(values).unwrap();
        prop_assert_eq!(value.samples().count(), n);
        prop_assert!(value.samples().all(|s| s.time.is_some() && s.coords.len() == 3));
    }

    #[test]
    fn prop_rgbaf_in_range(components in prop::collection::vec(0.0f64..=1.0, 4)) {
        prop_assert!(RgbafValue::new(components).is_ok());
    }

    #[test]
    fn prop_fraction_truncated(secs in 0i64..4_000_000_000, micros in 0i64..1_000_000) {
        let whole = Utc.timestamp_opt(secs, 0).unwrap();
        let dt = whole + Duration::microseconds(micros);
        let formatted = format_datetime_like(dt).unwrap();
        prop_assert_eq!(&formatted, &format_datetime_like(whole).unwrap());
        prop_assert_eq!(whole.nanosecond(), 0);
        prop_assert!(formatted.ends_with('Z'));
        prop_assert_eq!(formatted.len(), 20);
    }

    #[test]
    fn prop_astronomical_fraction_truncated(
        year in 1900i32..2100,
        month in 1u32..=12,
        day in 1u32..=28,
        hour in 0u32..24,
        minute in 0u32..60,
        second in 0u32..60,
        nines in 6usize..=9,
    ) {
        let whole = format!("{year:04}-{month:02}-{day:02}T{hour:02}:{minute:02}:{second:02}");
        let input = format!("{whole}.{}Z", "9".repeat(nines));
        let t = AstroTime::from_iso(&input).unwrap();
        prop_assert_eq!(format_datetime_like(t).unwrap(), format!("{whole}Z"));
    }
}
