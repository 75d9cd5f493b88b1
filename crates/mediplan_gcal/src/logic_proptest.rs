#[cfg(test)]
mod tests {
    use crate::logic::expand_schedule;
    use crate::schedule::MedicineSchedule;
    use chrono::{DateTime, Duration, NaiveDate};
    use chrono_tz::Tz;
    use proptest::prelude::*;

    // Helper function to build a schedule over an arbitrary date window
    fn make_schedule(
        times: Vec<String>,
        start_offset_days: i64,
        window_days: i64,
    ) -> MedicineSchedule {
        let base = NaiveDate::from_ymd_opt(2025, 8, 24).unwrap();
        let start = base + Duration::days(start_offset_days);
        MedicineSchedule {
            name: "Medicine A".to_string(),
            times,
            start_date: Some(start),
            end_date: Some(start + Duration::days(window_days)),
            notes: String::new(),
        }
    }

    // Strategy producing well-formed HH:MM strings
    fn valid_time() -> impl Strategy<Value = String> {
        (0u32..24, 0u32..60).prop_map(|(h, m)| format!("{:02}:{:02}", h, m))
    }

    proptest! {
        // One dose series per valid time-of-day, in input order
        #[test]
        fn one_series_per_time_in_input_order(
            times in prop::collection::vec(valid_time(), 1..8),
            start_offset_days in 0..365i64,
            window_days in 0..60i64,
        ) {
            let schedule = make_schedule(times.clone(), start_offset_days, window_days);
            let events = expand_schedule(&schedule, Tz::Asia__Kolkata);

            prop_assert_eq!(events.len(), times.len());
            for (dose, time) in events.iter().zip(times.iter()) {
                prop_assert_eq!(&dose.time_of_day, time);
            }
        }

        // Every dose event is exactly 30 minutes long
        #[test]
        fn dose_events_last_thirty_minutes(
            times in prop::collection::vec(valid_time(), 1..8),
            window_days in 0..60i64,
        ) {
            let schedule = make_schedule(times, 0, window_days);
            let events = expand_schedule(&schedule, Tz::Asia__Kolkata);

            for dose in &events {
                let start = DateTime::parse_from_rfc3339(&dose.event.start_time)
                    .expect("Failed to parse RFC3339 datetime");
                let end = DateTime::parse_from_rfc3339(&dose.event.end_time)
                    .expect("Failed to parse RFC3339 datetime");
                prop_assert_eq!(end - start, Duration::minutes(30));
            }
        }

        // Expansion is never negative-length
        #[test]
        fn reversed_date_range_yields_no_events(
            times in prop::collection::vec(valid_time(), 1..8),
            window_days in 1..60i64,
        ) {
            let base = NaiveDate::from_ymd_opt(2025, 8, 24).unwrap();
            let schedule = MedicineSchedule {
                name: "Medicine A".to_string(),
                times,
                start_date: Some(base + Duration::days(window_days)),
                end_date: Some(base),
                notes: String::new(),
            };
            prop_assert!(expand_schedule(&schedule, Tz::Asia__Kolkata).is_empty());
        }
    }
}
