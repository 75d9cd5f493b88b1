#[cfg(test)]
mod tests {
    use crate::auth::mock::MockTokenProvider;
    use crate::error::GcalError;
    use crate::logic::{push_schedules, target_timezone};
    use crate::schedule::MedicineSchedule;
    use crate::service::mock::MockCalendarService;
    use chrono::NaiveDate;

    fn schedule(name: &str, times: &[&str]) -> MedicineSchedule {
        MedicineSchedule {
            name: name.to_string(),
            times: times.iter().map(|t| t.to_string()).collect(),
            start_date: NaiveDate::from_ymd_opt(2025, 8, 24),
            end_date: NaiveDate::from_ymd_opt(2025, 8, 30),
            notes: String::new(),
        }
    }

    #[tokio::test]
    async fn all_events_are_submitted_with_one_token() {
        let tokens = MockTokenProvider::granting("bearer-abc");
        let calendar = MockCalendarService::new();
        let schedules = vec![
            schedule("Paracetamol", &["09:00", "21:00"]),
            schedule("Vitamin D3", &["07:30"]),
        ];

        let summary = push_schedules(
            &tokens,
            &calendar,
            "primary",
            target_timezone("Asia/Kolkata").unwrap(),
            &schedules,
        )
        .await
        .expect("push should complete");

        assert_eq!(summary.scheduled, 3);
        assert_eq!(summary.failed, 0);
        assert_eq!(summary.attempted(), 3);
        assert_eq!(tokens.request_count(), 1, "one token per push operation");

        // Every submission carried the same bearer credential.
        let inserted = calendar.inserted();
        assert_eq!(inserted.len(), 3);
        for (token, _) in &inserted {
            assert_eq!(token, "bearer-abc");
        }

        // Dispatch order matches expansion order.
        let summaries: Vec<&str> = inserted.iter().map(|(_, e)| e.summary.as_str()).collect();
        assert_eq!(
            summaries,
            vec!["Take Paracetamol", "Take Paracetamol", "Take Vitamin D3"]
        );
    }

    #[tokio::test]
    async fn token_denial_is_fatal_and_precedes_dispatch() {
        let tokens = MockTokenProvider::denying();
        let calendar = MockCalendarService::new();
        let schedules = vec![schedule("Paracetamol", &["09:00"])];

        let result = push_schedules(
            &tokens,
            &calendar,
            "primary",
            target_timezone("Asia/Kolkata").unwrap(),
            &schedules,
        )
        .await;

        assert!(matches!(result, Err(GcalError::TokenDenied(_))));
        assert_eq!(calendar.call_count(), 0, "no submission before the token");
    }

    #[tokio::test]
    async fn one_failed_submission_does_not_stop_the_rest() {
        let tokens = MockTokenProvider::granting("bearer-abc");
        let calendar = MockCalendarService::new();
        calendar.fail_on_call(1);

        let schedules = vec![schedule("Paracetamol", &["09:00", "15:00", "21:00"])];

        let summary = push_schedules(
            &tokens,
            &calendar,
            "primary",
            target_timezone("Asia/Kolkata").unwrap(),
            &schedules,
        )
        .await
        .expect("partial failure still completes");

        assert_eq!(summary.scheduled, 2);
        assert_eq!(summary.failed, 1);
        assert_eq!(calendar.call_count(), 3, "siblings are neither retried nor skipped");

        assert!(summary.outcomes[0].result.is_ok());
        assert!(summary.outcomes[1].result.is_err());
        assert!(summary.outcomes[2].result.is_ok());
        assert_eq!(summary.outcomes[1].time_of_day, "15:00");
    }

    #[tokio::test]
    async fn empty_schedules_skip_token_and_network_entirely() {
        let tokens = MockTokenProvider::granting("bearer-abc");
        let calendar = MockCalendarService::new();
        let schedules = vec![
            schedule("Paracetamol", &[]),
            MedicineSchedule {
                name: "Ibuprofen".to_string(),
                times: vec!["09:00".to_string()],
                start_date: None,
                end_date: None,
                notes: String::new(),
            },
        ];

        let summary = push_schedules(
            &tokens,
            &calendar,
            "primary",
            target_timezone("Asia/Kolkata").unwrap(),
            &schedules,
        )
        .await
        .expect("a no-op push succeeds");

        assert_eq!(summary.attempted(), 0);
        assert_eq!(
            summary.skipped_schedules,
            vec!["Paracetamol".to_string(), "Ibuprofen".to_string()]
        );
        assert_eq!(tokens.request_count(), 0);
        assert_eq!(calendar.call_count(), 0);
    }

    #[tokio::test]
    async fn outcomes_stay_attributable_to_their_source_pair() {
        let tokens = MockTokenProvider::granting("bearer-abc");
        let calendar = MockCalendarService::new();
        let schedules = vec![
            schedule("Paracetamol", &["09:00"]),
            schedule("Vitamin D3", &["07:30"]),
        ];

        let summary = push_schedules(
            &tokens,
            &calendar,
            "primary",
            target_timezone("Asia/Kolkata").unwrap(),
            &schedules,
        )
        .await
        .expect("push should complete");

        let pairs: Vec<(&str, &str)> = summary
            .outcomes
            .iter()
            .map(|o| (o.medicine.as_str(), o.time_of_day.as_str()))
            .collect();
        assert_eq!(
            pairs,
            vec![("Paracetamol", "09:00"), ("Vitamin D3", "07:30")]
        );
    }
}
