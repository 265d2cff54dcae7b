use std::sync::Arc;

use async_trait::async_trait;
use dao::holiday_override::HolidayOverrideEntity;
use service::{
    holiday_calendar::{HolidayCalendarService, HolidayOverride},
    ServiceError,
};
use tally_utils::is_weekend;
use time::Date;

pub struct HolidayCalendarServiceImpl<
    HolidayOverrideDao: dao::holiday_override::HolidayOverrideDao,
    ClockService: service::clock::ClockService,
    UuidService: service::uuid_service::UuidService,
> {
    holiday_override_dao: Arc<HolidayOverrideDao>,
    clock_service: Arc<ClockService>,
    uuid_service: Arc<UuidService>,
}

impl<HolidayOverrideDao, ClockService, UuidService>
    HolidayCalendarServiceImpl<HolidayOverrideDao, ClockService, UuidService>
where
    HolidayOverrideDao: dao::holiday_override::HolidayOverrideDao + Sync + Send,
    ClockService: service::clock::ClockService + Sync + Send,
    UuidService: service::uuid_service::UuidService + Sync + Send,
{
    pub fn new(
        holiday_override_dao: Arc<HolidayOverrideDao>,
        clock_service: Arc<ClockService>,
        uuid_service: Arc<UuidService>,
    ) -> Self {
        Self {
            holiday_override_dao,
            clock_service,
            uuid_service,
        }
    }
}

#[async_trait]
impl<
        HolidayOverrideDao: dao::holiday_override::HolidayOverrideDao + Sync + Send,
        ClockService: service::clock::ClockService + Sync + Send,
        UuidService: service::uuid_service::UuidService + Sync + Send,
    > HolidayCalendarService
    for HolidayCalendarServiceImpl<HolidayOverrideDao, ClockService, UuidService>
{
    async fn is_workday(&self, date: Date) -> Result<bool, ServiceError> {
        match self.holiday_override_dao.find_by_date(date).await? {
            Some(holiday_override) => Ok(holiday_override.workday),
            None => Ok(!is_weekend(date)),
        }
    }

    async fn find_override(&self, date: Date) -> Result<Option<HolidayOverride>, ServiceError> {
        Ok(self
            .holiday_override_dao
            .find_by_date(date)
            .await?
            .as_ref()
            .map(HolidayOverride::from))
    }

    async fn create_override(
        &self,
        holiday_override: &HolidayOverride,
    ) -> Result<HolidayOverride, ServiceError> {
        let mut holiday_override = holiday_override.clone();
        holiday_override.created = Some(self.clock_service.date_time_now());
        let mut entity: HolidayOverrideEntity = (&holiday_override).try_into()?;

        if !entity.id.is_nil() {
            return Err(ServiceError::IdSetOnCreate);
        }
        if !entity.version.is_nil() {
            return Err(ServiceError::VersionSetOnCreate);
        }
        entity.id = self
            .uuid_service
            .new_uuid("holiday-calendar-service::create id");
        entity.version = self
            .uuid_service
            .new_uuid("holiday-calendar-service::create version");

        self.holiday_override_dao
            .create(&entity, "holiday-calendar-service::create-override")
            .await?;
        Ok(HolidayOverride::from(&entity))
    }
}
