use dao::clock_event::{ClockEventDao, ClockEventEntity};
use service::attendance::ClockDirection;
use service::day_summary::{AbsenceClass, ClockStatus, DaySummaryService};
use service::statistics::StatisticsService;
use tally_utils::CancellationFlag;
use time::macros::{date, datetime, time};
use uuid::uuid;

use super::{default_user_id, TestSetup};

#[tokio::test]
async fn test_punch_recompute_and_monthly_statistics() {
    let setup = TestSetup::new();
    let user_id = default_user_id();
    setup
        .punch(user_id, date!(2024 - 06 - 03), time!(08:55), ClockDirection::In)
        .await;
    setup
        .punch(user_id, date!(2024 - 06 - 03), time!(18:05), ClockDirection::Out)
        .await;

    let summary = setup
        .day_summary_service
        .recompute(user_id, date!(2024 - 06 - 03))
        .await
        .unwrap();
    assert_eq!(summary.absence, AbsenceClass::Normal);
    assert_eq!(summary.worked_minutes, 550);
    assert_eq!(summary.overtime_minutes, 5);
    assert!(!summary.anomaly);

    let statistics = setup
        .statistics_service
        .monthly_statistics(user_id, 2024, 6)
        .await
        .unwrap();
    assert_eq!(statistics.normal_days, 1);
    assert_eq!(statistics.working_days, 20);
    assert_eq!(statistics.attendance_days, 1);
    assert_eq!(statistics.attendance_rate, 5.0);
    assert_eq!(statistics.total_worked_minutes, 550);
    assert_eq!(statistics.average_worked_minutes, 550);
    assert_eq!(statistics.overtime_minutes, 5);
    assert_eq!(statistics.days.len(), 1);

    let detail = statistics.days.get("2024-06-03").unwrap();
    assert_eq!(detail.clock_in.as_deref(), Some("08:55"));
    assert_eq!(detail.clock_out.as_deref(), Some("18:05"));
}

#[tokio::test]
async fn test_late_and_absence_classification() {
    let setup = TestSetup::new();
    let user_id = default_user_id();
    setup
        .punch(user_id, date!(2024 - 06 - 04), time!(09:30), ClockDirection::In)
        .await;

    let late = setup
        .day_summary_service
        .recompute(user_id, date!(2024 - 06 - 04))
        .await
        .unwrap();
    assert_eq!(late.absence, AbsenceClass::Late);
    assert_eq!(late.clock_in_status, Some(ClockStatus::Late));

    let absent = setup
        .day_summary_service
        .recompute(user_id, date!(2024 - 06 - 05))
        .await
        .unwrap();
    assert_eq!(absent.absence, AbsenceClass::Absence);
    assert_eq!(absent.clock_in_time, None);
}

#[tokio::test]
async fn test_soft_deleted_punch_is_reevaluated() {
    let setup = TestSetup::new();
    let user_id = default_user_id();
    setup
        .punch(user_id, date!(2024 - 06 - 03), time!(08:55), ClockDirection::In)
        .await;
    let early_out = setup
        .punch(user_id, date!(2024 - 06 - 03), time!(17:00), ClockDirection::Out)
        .await;

    let first = setup
        .day_summary_service
        .recompute(user_id, date!(2024 - 06 - 03))
        .await
        .unwrap();
    assert_eq!(first.absence, AbsenceClass::EarlyLeave);
    assert_eq!(first.clock_out_status, Some(ClockStatus::EarlyLeave));

    // A correction retracts the early punch and adds the real one.
    let mut entity: ClockEventEntity = (&early_out).try_into().unwrap();
    entity.deleted = Some(datetime!(2024-06-03 19:00));
    setup
        .clock_event_dao
        .update(&entity, "correction")
        .await
        .unwrap();
    setup
        .punch(user_id, date!(2024 - 06 - 03), time!(18:00), ClockDirection::Out)
        .await;

    let second = setup
        .day_summary_service
        .recompute(user_id, date!(2024 - 06 - 03))
        .await
        .unwrap();
    assert_eq!(second.absence, AbsenceClass::Normal);
    assert_eq!(second.worked_minutes, 545);
    assert_eq!(second.id, first.id);
    assert_eq!(second.created, first.created);
    assert_ne!(second.version, first.version);
}

#[tokio::test]
async fn test_batch_recompute_covers_all_punched_users() {
    let user_a = uuid!("11111111-1111-1111-1111-111111111111");
    let user_b = uuid!("22222222-2222-2222-2222-222222222222");

    let setup = TestSetup::new();
    for user_id in [user_a, user_b] {
        setup
            .punch(user_id, date!(2024 - 06 - 03), time!(09:00), ClockDirection::In)
            .await;
        setup
            .punch(user_id, date!(2024 - 06 - 03), time!(18:00), ClockDirection::Out)
            .await;
    }

    let outcome = setup
        .day_summary_service
        .recompute_batch(date!(2024 - 06 - 03), CancellationFlag::new())
        .await
        .unwrap();
    assert_eq!(outcome.completed, 2);
    assert_eq!(outcome.failed, 0);
    assert!(!outcome.cancelled);

    for user_id in [user_a, user_b] {
        let summaries = setup
            .day_summary_service
            .find_by_user_in_range(user_id, date!(2024 - 06 - 01), date!(2024 - 06 - 30))
            .await
            .unwrap();
        assert_eq!(summaries.len(), 1);
        assert_eq!(summaries[0].worked_minutes, 540);
    }
}
