use async_trait::async_trait;
use mockall::automock;
use time::{Date, PrimitiveDateTime};
use uuid::Uuid;

use crate::DaoError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HolidayTypeEntity {
    PublicHoliday,
    SubstituteWorkday,
}

/// Calendar override for a single date.  When a row exists its `workday`
/// flag wins over the weekday rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HolidayOverrideEntity {
    pub id: Uuid,
    pub date: Date,
    pub day_type: HolidayTypeEntity,
    pub workday: bool,
    pub created: PrimitiveDateTime,
    pub deleted: Option<PrimitiveDateTime>,
    pub version: Uuid,
}

#[automock]
#[async_trait]
pub trait HolidayOverrideDao {
    async fn find_by_date(&self, date: Date) -> Result<Option<HolidayOverrideEntity>, DaoError>;

    async fn create(&self, entity: &HolidayOverrideEntity, process: &str)
        -> Result<(), DaoError>;
}
