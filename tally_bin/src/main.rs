#[cfg(test)]
mod integration_test;

use std::sync::Arc;

use dao::clock_event::ClockEventDao;
use dao_impl_memory::{
    clock_event::ClockEventDaoImpl, day_summary::DaySummaryDaoImpl, department::DepartmentDaoImpl,
    holiday_override::HolidayOverrideDaoImpl, work_time_config::WorkTimeConfigDaoImpl,
};
use service::day_summary::DaySummaryService;
use service::scheduler::SchedulerService;
use service::statistics::StatisticsService;
use tally_utils::CancellationFlag;
use time::macros::format_description;
#[cfg(feature = "json_logging")]
use tracing_subscriber::fmt::format::FmtSpan;

type ClockService = service_impl::clock::ClockServiceImpl;
type UuidService = service_impl::uuid_service::UuidServiceImpl;
type HolidayCalendarService = service_impl::holiday_calendar::HolidayCalendarServiceImpl<
    HolidayOverrideDaoImpl,
    ClockService,
    UuidService,
>;
type WorkTimeConfigService = service_impl::work_time_config::WorkTimeConfigServiceImpl<
    WorkTimeConfigDaoImpl,
    DepartmentDaoImpl,
    ClockService,
    UuidService,
>;
type AttendanceService = service_impl::attendance::AttendanceServiceImpl<
    ClockEventDaoImpl,
    WorkTimeConfigService,
    HolidayCalendarService,
    ClockService,
    UuidService,
>;
type DaySummaryServiceImpl = service_impl::day_summary::DaySummaryServiceImpl<
    AttendanceService,
    ClockEventDaoImpl,
    DaySummaryDaoImpl,
    ClockService,
    UuidService,
>;
type StatisticsServiceImpl =
    service_impl::statistics::StatisticsServiceImpl<DaySummaryServiceImpl, HolidayCalendarService>;
type SchedulerServiceImpl =
    service_impl::scheduler::SchedulerServiceImpl<DaySummaryServiceImpl, ClockService>;

#[tokio::main]
async fn main() {
    let version = env!("CARGO_PKG_VERSION");

    #[cfg(feature = "local_logging")]
    let subscriber = tracing_subscriber::FmtSubscriber::builder()
        .with_max_level(tracing::Level::TRACE)
        .pretty()
        .with_file(true)
        .finish();

    #[cfg(feature = "json_logging")]
    let subscriber = tracing_subscriber::FmtSubscriber::builder()
        .with_max_level(tracing::Level::INFO)
        .json()
        .with_span_events(FmtSpan::CLOSE)
        .with_span_list(true)
        .with_file(true)
        .finish();
    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");

    tracing::info!("Tally backend version: {}", version);
    dotenvy::dotenv().ok();

    let clock_event_dao = Arc::new(ClockEventDaoImpl::new());
    let day_summary_dao = Arc::new(DaySummaryDaoImpl::new());
    let department_dao = Arc::new(DepartmentDaoImpl::new());
    let holiday_override_dao = Arc::new(HolidayOverrideDaoImpl::new());
    let work_time_config_dao = Arc::new(WorkTimeConfigDaoImpl::new());

    let clock_service = Arc::new(service_impl::clock::ClockServiceImpl);
    let uuid_service = Arc::new(service_impl::uuid_service::UuidServiceImpl);
    let holiday_calendar_service = Arc::new(HolidayCalendarService::new(
        holiday_override_dao.clone(),
        clock_service.clone(),
        uuid_service.clone(),
    ));
    let work_time_config_service = Arc::new(WorkTimeConfigService::new(
        work_time_config_dao.clone(),
        Some(department_dao.clone()),
        clock_service.clone(),
        uuid_service.clone(),
    ));
    let attendance_service = Arc::new(AttendanceService::new(
        clock_event_dao.clone(),
        work_time_config_service.clone(),
        holiday_calendar_service.clone(),
        clock_service.clone(),
        uuid_service.clone(),
    ));
    let day_summary_service = Arc::new(DaySummaryServiceImpl::new(
        attendance_service.clone(),
        clock_event_dao.clone(),
        day_summary_dao.clone(),
        clock_service.clone(),
        uuid_service.clone(),
    ));
    let statistics_service = Arc::new(StatisticsServiceImpl::new(
        day_summary_service.clone(),
        holiday_calendar_service.clone(),
    ));

    // One-shot mode: recompute the given date, print each punched user's
    // monthly report and exit.
    if let Ok(batch_date) = std::env::var("TALLY_BATCH_DATE") {
        let date_format = format_description!("[year]-[month]-[day]");
        let date = time::Date::parse(&batch_date, &date_format)
            .expect("TALLY_BATCH_DATE must be a calendar date like 2024-06-03");
        let outcome = day_summary_service
            .recompute_batch(date, CancellationFlag::new())
            .await
            .expect("Expected the batch recomputation to finish");
        tracing::info!(
            "Recomputed day summaries for {}: {} completed, {} failed",
            date,
            outcome.completed,
            outcome.failed
        );

        let users = clock_event_dao
            .find_users_for_date(date)
            .await
            .expect("Expected the punched users for the batch date");
        for user_id in users.iter() {
            let statistics = statistics_service
                .monthly_statistics(*user_id, date.year(), u8::from(date.month()))
                .await
                .expect("Expected the monthly statistics");
            println!(
                "{}",
                serde_json::to_string_pretty(&statistics)
                    .expect("Expected the statistics to serialize")
            );
        }
        return;
    }

    let scheduler_service =
        SchedulerServiceImpl::new(day_summary_service.clone(), clock_service.clone());
    match std::env::var("TALLY_RECOMPUTE_CRON") {
        Ok(cron) => scheduler_service
            .schedule_daily_recompute(Box::leak(cron.into_boxed_str()))
            .await
            .expect("Expected the recompute job to be scheduled"),
        Err(_) => scheduler_service
            .start()
            .await
            .expect("Expected the scheduler to start"),
    }

    tokio::signal::ctrl_c()
        .await
        .expect("Expected a shutdown signal");
    tracing::info!("Shutting down");
}
