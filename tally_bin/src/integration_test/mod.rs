mod attendance_pipeline;
mod holiday_calendar;
mod recompute_properties;
mod work_time_cascade;

use std::sync::Arc;

use dao_impl_memory::{
    clock_event::ClockEventDaoImpl, day_summary::DaySummaryDaoImpl, department::DepartmentDaoImpl,
    holiday_override::HolidayOverrideDaoImpl, work_time_config::WorkTimeConfigDaoImpl,
};
use service::attendance::{AttendanceService, ClockDirection, ClockEvent};
use time::{Date, Time};
use uuid::{uuid, Uuid};

pub fn default_user_id() -> Uuid {
    uuid!("67A7E808-C4DF-40E5-9E46-96B5A9BDF38D")
}

/// The full pipeline wired against the in-memory store, as the binary
/// assembles it.
pub struct TestSetup {
    pub clock_event_dao: Arc<ClockEventDaoImpl>,
    pub department_dao: Arc<DepartmentDaoImpl>,
    pub holiday_calendar_service: Arc<crate::HolidayCalendarService>,
    pub work_time_config_service: Arc<crate::WorkTimeConfigService>,
    pub attendance_service: Arc<crate::AttendanceService>,
    pub day_summary_service: Arc<crate::DaySummaryServiceImpl>,
    pub statistics_service: Arc<crate::StatisticsServiceImpl>,
}

impl TestSetup {
    pub fn new() -> Self {
        let clock_event_dao = Arc::new(ClockEventDaoImpl::new());
        let day_summary_dao = Arc::new(DaySummaryDaoImpl::new());
        let department_dao = Arc::new(DepartmentDaoImpl::new());
        let holiday_override_dao = Arc::new(HolidayOverrideDaoImpl::new());
        let work_time_config_dao = Arc::new(WorkTimeConfigDaoImpl::new());

        let clock_service = Arc::new(service_impl::clock::ClockServiceImpl);
        let uuid_service = Arc::new(service_impl::uuid_service::UuidServiceImpl);
        let holiday_calendar_service = Arc::new(crate::HolidayCalendarService::new(
            holiday_override_dao.clone(),
            clock_service.clone(),
            uuid_service.clone(),
        ));
        let work_time_config_service = Arc::new(crate::WorkTimeConfigService::new(
            work_time_config_dao.clone(),
            Some(department_dao.clone()),
            clock_service.clone(),
            uuid_service.clone(),
        ));
        let attendance_service = Arc::new(crate::AttendanceService::new(
            clock_event_dao.clone(),
            work_time_config_service.clone(),
            holiday_calendar_service.clone(),
            clock_service.clone(),
            uuid_service.clone(),
        ));
        let day_summary_service = Arc::new(crate::DaySummaryServiceImpl::new(
            attendance_service.clone(),
            clock_event_dao.clone(),
            day_summary_dao.clone(),
            clock_service.clone(),
            uuid_service.clone(),
        ));
        let statistics_service = Arc::new(crate::StatisticsServiceImpl::new(
            day_summary_service.clone(),
            holiday_calendar_service.clone(),
        ));

        Self {
            clock_event_dao,
            department_dao,
            holiday_calendar_service,
            work_time_config_service,
            attendance_service,
            day_summary_service,
            statistics_service,
        }
    }

    pub async fn punch(
        &self,
        user_id: Uuid,
        date: Date,
        time_of_day: Time,
        direction: ClockDirection,
    ) -> ClockEvent {
        self.attendance_service
            .record_event(&ClockEvent {
                id: Uuid::nil(),
                user_id,
                date,
                time_of_day,
                direction,
                makeup: false,
                location: None,
                device: None,
                remark: None,
                created: None,
                deleted: None,
                version: Uuid::nil(),
            })
            .await
            .expect("Expected the punch to be recorded")
    }
}

impl Default for TestSetup {
    fn default() -> Self {
        Self::new()
    }
}
