use proptest::prelude::*;
use service::attendance::ClockDirection;
use service::day_summary::DaySummaryService;
use time::macros::date;
use time::Time;

use super::{default_user_id, TestSetup};

fn clock_time(minutes: u32) -> Time {
    Time::from_hms((minutes / 60) as u8, (minutes % 60) as u8, 0)
        .expect("minutes below 1440 form a valid time")
}

proptest! {
    #[test]
    fn test_recompute_is_idempotent(in_minutes in 0u32..1440, out_minutes in 0u32..1440) {
        let runtime = tokio::runtime::Runtime::new().expect("Expected a tokio runtime");
        runtime.block_on(async {
            let setup = TestSetup::new();
            let user_id = default_user_id();
            let date = date!(2024 - 06 - 03);
            setup
                .punch(user_id, date, clock_time(in_minutes), ClockDirection::In)
                .await;
            setup
                .punch(user_id, date, clock_time(out_minutes), ClockDirection::Out)
                .await;

            let first = setup.day_summary_service.recompute(user_id, date).await.unwrap();
            let second = setup.day_summary_service.recompute(user_id, date).await.unwrap();

            // Row identity and derived fields are stable, only the version
            // rotates.
            assert_eq!(second.id, first.id);
            assert_eq!(second.created, first.created);
            assert_ne!(second.version, first.version);
            assert_eq!(second.worked_minutes, first.worked_minutes);
            assert_eq!(second.overtime_minutes, first.overtime_minutes);
            assert_eq!(second.absence, first.absence);
            assert_eq!(second.anomaly, first.anomaly);

            let expected_worked = out_minutes.saturating_sub(in_minutes);
            assert_eq!(first.worked_minutes, expected_worked);
            assert!(first.worked_minutes < 1440);
            assert_eq!(first.anomaly, out_minutes < in_minutes);
        });
    }
}
