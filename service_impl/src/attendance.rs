use std::sync::Arc;

use async_trait::async_trait;
use dao::clock_event::ClockEventEntity;
use service::{
    attendance::{AttendanceService, ClockDirection, ClockEvent},
    day_summary::{AbsenceClass, ClockStatus, DaySummary},
    work_time_config::WorkTimeConfig,
    ServiceError,
};
use time::{Date, Duration};
use uuid::Uuid;

pub struct AttendanceServiceImpl<
    ClockEventDao: dao::clock_event::ClockEventDao,
    WorkTimeConfigService: service::work_time_config::WorkTimeConfigService,
    HolidayCalendarService: service::holiday_calendar::HolidayCalendarService,
    ClockService: service::clock::ClockService,
    UuidService: service::uuid_service::UuidService,
> {
    clock_event_dao: Arc<ClockEventDao>,
    work_time_config_service: Arc<WorkTimeConfigService>,
    holiday_calendar_service: Arc<HolidayCalendarService>,
    clock_service: Arc<ClockService>,
    uuid_service: Arc<UuidService>,
}

/// The punch a day is judged by: earliest time of day per direction, ties
/// broken by lowest event id.  Applied uniformly to both directions.
fn select_event(events: &[ClockEvent], direction: ClockDirection) -> Option<&ClockEvent> {
    events
        .iter()
        .filter(|event| event.deleted.is_none() && event.direction == direction)
        .min_by_key(|event| (event.time_of_day, event.id))
}

fn is_late(event: &ClockEvent, config: &WorkTimeConfig) -> bool {
    let latest_tolerated = config.morning_start + Duration::minutes(i64::from(config.flexible_minutes));
    event.time_of_day > latest_tolerated
}

fn is_early_leave(event: &ClockEvent, config: &WorkTimeConfig) -> bool {
    let earliest_tolerated =
        config.afternoon_end - Duration::minutes(i64::from(config.early_leave_minutes));
    event.time_of_day < earliest_tolerated
}

/// Classify one user-day.  Pure over its inputs, so recomputation with
/// unchanged punches, rule and workday flag yields an identical summary.
/// The returned summary carries no row identity yet.
pub fn determine_day(
    user_id: Uuid,
    date: Date,
    events: &[ClockEvent],
    config: &WorkTimeConfig,
    workday: bool,
) -> DaySummary {
    let clock_in = select_event(events, ClockDirection::In);
    let clock_out = select_event(events, ClockDirection::Out);

    let clock_in_status = clock_in.map(|event| {
        if event.makeup {
            ClockStatus::Makeup
        } else if is_late(event, config) {
            ClockStatus::Late
        } else {
            ClockStatus::Normal
        }
    });
    let clock_out_status = clock_out.map(|event| {
        if event.makeup {
            ClockStatus::Makeup
        } else if is_early_leave(event, config) {
            ClockStatus::EarlyLeave
        } else {
            ClockStatus::Normal
        }
    });

    let mut anomaly = false;
    let mut notes: Vec<Arc<str>> = Vec::new();
    if let Some(remark) = clock_in.and_then(|event| event.remark.clone()) {
        notes.push(remark);
    }
    if let Some(remark) = clock_out.and_then(|event| event.remark.clone()) {
        notes.push(remark);
    }

    let worked_minutes = match (clock_in, clock_out) {
        (Some(clock_in_event), Some(clock_out_event)) => {
            let minutes =
                (clock_out_event.time_of_day - clock_in_event.time_of_day).whole_minutes();
            if minutes < 0 {
                anomaly = true;
                notes.push("clock-out before clock-in".into());
                0
            } else {
                minutes as u32
            }
        }
        _ => 0,
    };

    let absence = if !workday {
        // Voluntary attendance outside working days is never penalized and
        // a missing punch on a free day is not an absence.
        AbsenceClass::Normal
    } else if clock_in_status == Some(ClockStatus::Late) {
        AbsenceClass::Late
    } else if clock_out_status == Some(ClockStatus::EarlyLeave) {
        AbsenceClass::EarlyLeave
    } else if clock_in.is_none() && clock_out.is_none() {
        AbsenceClass::Absence
    } else {
        AbsenceClass::Normal
    };

    let overtime_minutes = if workday {
        clock_out.map_or(0, |event| {
            let past_end = (event.time_of_day - config.afternoon_end).whole_minutes();
            if past_end > 0 && past_end >= i64::from(config.overtime_minutes) {
                past_end as u32
            } else {
                0
            }
        })
    } else {
        // On free days the whole worked duration counts as overtime.
        worked_minutes
    };

    let remark = if notes.is_empty() {
        None
    } else {
        Some(notes.join("; ").into())
    };

    DaySummary {
        id: Uuid::nil(),
        user_id,
        date,
        clock_in_time: clock_in.map(|event| event.time_of_day),
        clock_in_status,
        clock_out_time: clock_out.map(|event| event.time_of_day),
        clock_out_status,
        worked_minutes,
        overtime_minutes,
        absence,
        anomaly,
        remark,
        created: None,
        version: Uuid::nil(),
    }
}

impl<ClockEventDao, WorkTimeConfigService, HolidayCalendarService, ClockService, UuidService>
    AttendanceServiceImpl<
        ClockEventDao,
        WorkTimeConfigService,
        HolidayCalendarService,
        ClockService,
        UuidService,
    >
where
    ClockEventDao: dao::clock_event::ClockEventDao + Sync + Send,
    WorkTimeConfigService: service::work_time_config::WorkTimeConfigService + Sync + Send,
    HolidayCalendarService: service::holiday_calendar::HolidayCalendarService + Sync + Send,
    ClockService: service::clock::ClockService + Sync + Send,
    UuidService: service::uuid_service::UuidService + Sync + Send,
{
    pub fn new(
        clock_event_dao: Arc<ClockEventDao>,
        work_time_config_service: Arc<WorkTimeConfigService>,
        holiday_calendar_service: Arc<HolidayCalendarService>,
        clock_service: Arc<ClockService>,
        uuid_service: Arc<UuidService>,
    ) -> Self {
        Self {
            clock_event_dao,
            work_time_config_service,
            holiday_calendar_service,
            clock_service,
            uuid_service,
        }
    }
}

#[async_trait]
impl<
        ClockEventDao: dao::clock_event::ClockEventDao + Sync + Send,
        WorkTimeConfigService: service::work_time_config::WorkTimeConfigService + Sync + Send,
        HolidayCalendarService: service::holiday_calendar::HolidayCalendarService + Sync + Send,
        ClockService: service::clock::ClockService + Sync + Send,
        UuidService: service::uuid_service::UuidService + Sync + Send,
    > AttendanceService
    for AttendanceServiceImpl<
        ClockEventDao,
        WorkTimeConfigService,
        HolidayCalendarService,
        ClockService,
        UuidService,
    >
{
    async fn record_event(&self, event: &ClockEvent) -> Result<ClockEvent, ServiceError> {
        let mut event = event.clone();
        event.created = Some(self.clock_service.date_time_now());
        let mut entity: ClockEventEntity = (&event).try_into()?;

        if !entity.id.is_nil() {
            return Err(ServiceError::IdSetOnCreate);
        }
        if !entity.version.is_nil() {
            return Err(ServiceError::VersionSetOnCreate);
        }
        entity.id = self.uuid_service.new_uuid("attendance-service::record id");
        entity.version = self
            .uuid_service
            .new_uuid("attendance-service::record version");

        self.clock_event_dao
            .create(&entity, "attendance-service::record-event")
            .await?;
        Ok(ClockEvent::from(&entity))
    }

    async fn evaluate(&self, user_id: Uuid, date: Date) -> Result<DaySummary, ServiceError> {
        let events: Vec<ClockEvent> = self
            .clock_event_dao
            .find_by_user_and_date(user_id, date)
            .await?
            .iter()
            .map(ClockEvent::from)
            .collect();
        let config = self.work_time_config_service.resolve(user_id, date).await?;
        let workday = self.holiday_calendar_service.is_workday(date).await?;

        Ok(determine_day(user_id, date, &events, &config, workday))
    }
}
