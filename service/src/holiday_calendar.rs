use async_trait::async_trait;
use dao::holiday_override::{HolidayOverrideEntity, HolidayTypeEntity};
use mockall::automock;
use time::Date;
use uuid::Uuid;

use crate::ServiceError;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HolidayType {
    PublicHoliday,
    SubstituteWorkday,
}
impl From<&HolidayTypeEntity> for HolidayType {
    fn from(entity: &HolidayTypeEntity) -> Self {
        match entity {
            HolidayTypeEntity::PublicHoliday => Self::PublicHoliday,
            HolidayTypeEntity::SubstituteWorkday => Self::SubstituteWorkday,
        }
    }
}
impl From<&HolidayType> for HolidayTypeEntity {
    fn from(holiday_type: &HolidayType) -> Self {
        match holiday_type {
            HolidayType::PublicHoliday => Self::PublicHoliday,
            HolidayType::SubstituteWorkday => Self::SubstituteWorkday,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HolidayOverride {
    pub id: Uuid,
    pub date: Date,
    pub day_type: HolidayType,
    pub workday: bool,
    pub created: Option<time::PrimitiveDateTime>,
    pub deleted: Option<time::PrimitiveDateTime>,
    pub version: Uuid,
}
impl From<&HolidayOverrideEntity> for HolidayOverride {
    fn from(entity: &HolidayOverrideEntity) -> Self {
        Self {
            id: entity.id,
            date: entity.date,
            day_type: (&entity.day_type).into(),
            workday: entity.workday,
            created: Some(entity.created),
            deleted: entity.deleted,
            version: entity.version,
        }
    }
}
tally_utils::derive_from_reference!(HolidayOverrideEntity, HolidayOverride);
impl TryFrom<&HolidayOverride> for HolidayOverrideEntity {
    type Error = ServiceError;

    fn try_from(holiday_override: &HolidayOverride) -> Result<Self, Self::Error> {
        Ok(Self {
            id: holiday_override.id,
            date: holiday_override.date,
            day_type: (&holiday_override.day_type).into(),
            workday: holiday_override.workday,
            created: holiday_override.created.ok_or(ServiceError::InternalError)?,
            deleted: holiday_override.deleted,
            version: holiday_override.version,
        })
    }
}

#[automock]
#[async_trait]
pub trait HolidayCalendarService {
    /// True when attendance rules apply on the given date.  An override row
    /// wins; without one, Monday through Friday are workdays.
    async fn is_workday(&self, date: Date) -> Result<bool, ServiceError>;

    async fn find_override(&self, date: Date) -> Result<Option<HolidayOverride>, ServiceError>;

    async fn create_override(
        &self,
        holiday_override: &HolidayOverride,
    ) -> Result<HolidayOverride, ServiceError>;
}
