use service::attendance::ClockDirection;
use service::day_summary::{AbsenceClass, DaySummaryService};
use service::work_time_config::{WorkTimeConfig, WorkTimeConfigService};
use time::macros::{date, time};
use uuid::{uuid, Uuid};

use super::{default_user_id, TestSetup};

fn new_config(user_id: Option<Uuid>, department_id: Option<Uuid>) -> WorkTimeConfig {
    WorkTimeConfig {
        user_id,
        department_id,
        effective_from: date!(2024 - 01 - 01),
        priority: 0,
        ..WorkTimeConfig::built_in_default()
    }
}

#[tokio::test]
async fn test_user_config_widens_the_grace_window() {
    let setup = TestSetup::new();
    let user_id = default_user_id();
    setup
        .work_time_config_service
        .create(&WorkTimeConfig {
            flexible_minutes: 20,
            ..new_config(Some(user_id), None)
        })
        .await
        .unwrap();

    setup
        .punch(user_id, date!(2024 - 06 - 03), time!(09:15), ClockDirection::In)
        .await;
    let summary = setup
        .day_summary_service
        .recompute(user_id, date!(2024 - 06 - 03))
        .await
        .unwrap();
    assert_eq!(summary.absence, AbsenceClass::Normal);

    // Without a rule of their own the built-in 10 minute grace applies.
    let other_user = uuid!("11111111-1111-1111-1111-111111111111");
    setup
        .punch(other_user, date!(2024 - 06 - 03), time!(09:15), ClockDirection::In)
        .await;
    let other_summary = setup
        .day_summary_service
        .recompute(other_user, date!(2024 - 06 - 03))
        .await
        .unwrap();
    assert_eq!(other_summary.absence, AbsenceClass::Late);
}

#[tokio::test]
async fn test_department_config_applies_to_members() {
    let setup = TestSetup::new();
    let user_id = default_user_id();
    let department_id = uuid!("E35EB6DC-3F29-4C93-98B2-2A39CC25C53E");
    setup.department_dao.assign(user_id, department_id).unwrap();
    setup
        .work_time_config_service
        .create(&WorkTimeConfig {
            flexible_minutes: 0,
            ..new_config(None, Some(department_id))
        })
        .await
        .unwrap();

    setup
        .punch(user_id, date!(2024 - 06 - 03), time!(09:05), ClockDirection::In)
        .await;
    let summary = setup
        .day_summary_service
        .recompute(user_id, date!(2024 - 06 - 03))
        .await
        .unwrap();
    assert_eq!(summary.absence, AbsenceClass::Late);
}

#[tokio::test]
async fn test_global_config_fallback() {
    let setup = TestSetup::new();
    let user_id = default_user_id();
    setup
        .work_time_config_service
        .create(&WorkTimeConfig {
            morning_start: time!(08:00),
            ..new_config(None, None)
        })
        .await
        .unwrap();

    // 08:30 is late against the global 08:00 start but would pass the
    // built-in 09:00 schedule.
    setup
        .punch(user_id, date!(2024 - 06 - 03), time!(08:30), ClockDirection::In)
        .await;
    let summary = setup
        .day_summary_service
        .recompute(user_id, date!(2024 - 06 - 03))
        .await
        .unwrap();
    assert_eq!(summary.absence, AbsenceClass::Late);
}
