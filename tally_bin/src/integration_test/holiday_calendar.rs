use service::attendance::ClockDirection;
use service::day_summary::{AbsenceClass, DaySummaryService};
use service::holiday_calendar::{HolidayCalendarService, HolidayOverride, HolidayType};
use service::statistics::StatisticsService;
use time::macros::{date, time};
use uuid::Uuid;

use super::{default_user_id, TestSetup};

fn new_override(date: time::Date, day_type: HolidayType, workday: bool) -> HolidayOverride {
    HolidayOverride {
        id: Uuid::nil(),
        date,
        day_type,
        workday,
        created: None,
        deleted: None,
        version: Uuid::nil(),
    }
}

#[tokio::test]
async fn test_public_holiday_suppresses_absence() {
    let setup = TestSetup::new();
    setup
        .holiday_calendar_service
        .create_override(&new_override(
            date!(2024 - 06 - 05),
            HolidayType::PublicHoliday,
            false,
        ))
        .await
        .unwrap();

    assert!(!setup
        .holiday_calendar_service
        .is_workday(date!(2024 - 06 - 05))
        .await
        .unwrap());
    let stored = setup
        .holiday_calendar_service
        .find_override(date!(2024 - 06 - 05))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.day_type, HolidayType::PublicHoliday);

    // No punches on the holiday is fine; the Tuesday before is an absence.
    let holiday = setup
        .day_summary_service
        .recompute(default_user_id(), date!(2024 - 06 - 05))
        .await
        .unwrap();
    assert_eq!(holiday.absence, AbsenceClass::Normal);

    let weekday = setup
        .day_summary_service
        .recompute(default_user_id(), date!(2024 - 06 - 04))
        .await
        .unwrap();
    assert_eq!(weekday.absence, AbsenceClass::Absence);
}

#[tokio::test]
async fn test_substitute_workday_uses_workday_rules() {
    let setup = TestSetup::new();
    setup
        .holiday_calendar_service
        .create_override(&new_override(
            date!(2024 - 06 - 08),
            HolidayType::SubstituteWorkday,
            true,
        ))
        .await
        .unwrap();

    let user_id = default_user_id();
    setup
        .punch(user_id, date!(2024 - 06 - 08), time!(09:00), ClockDirection::In)
        .await;
    setup
        .punch(user_id, date!(2024 - 06 - 08), time!(18:00), ClockDirection::Out)
        .await;
    let substitute = setup
        .day_summary_service
        .recompute(user_id, date!(2024 - 06 - 08))
        .await
        .unwrap();
    assert_eq!(substitute.absence, AbsenceClass::Normal);
    assert_eq!(substitute.worked_minutes, 540);
    assert_eq!(substitute.overtime_minutes, 0);

    // On a plain Saturday the whole attendance counts as overtime.
    setup
        .punch(user_id, date!(2024 - 06 - 15), time!(10:00), ClockDirection::In)
        .await;
    setup
        .punch(user_id, date!(2024 - 06 - 15), time!(15:00), ClockDirection::Out)
        .await;
    let saturday = setup
        .day_summary_service
        .recompute(user_id, date!(2024 - 06 - 15))
        .await
        .unwrap();
    assert_eq!(saturday.absence, AbsenceClass::Normal);
    assert_eq!(saturday.worked_minutes, 300);
    assert_eq!(saturday.overtime_minutes, 300);
}

#[tokio::test]
async fn test_statistics_working_days_follow_overrides() {
    let setup = TestSetup::new();
    setup
        .holiday_calendar_service
        .create_override(&new_override(
            date!(2024 - 06 - 05),
            HolidayType::PublicHoliday,
            false,
        ))
        .await
        .unwrap();

    let statistics = setup
        .statistics_service
        .monthly_statistics(default_user_id(), 2024, 6)
        .await
        .unwrap();
    assert_eq!(statistics.working_days, 19);
    assert_eq!(statistics.attendance_rate, 0.0);
    assert!(statistics.days.is_empty());
}
