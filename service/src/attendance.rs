use std::sync::Arc;

use async_trait::async_trait;
use dao::clock_event::{ClockDirectionEntity, ClockEventEntity};
use mockall::automock;
use time::{Date, Time};
use uuid::Uuid;

use crate::day_summary::DaySummary;
use crate::ServiceError;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClockDirection {
    In,
    Out,
}
impl From<&ClockDirectionEntity> for ClockDirection {
    fn from(entity: &ClockDirectionEntity) -> Self {
        match entity {
            ClockDirectionEntity::In => Self::In,
            ClockDirectionEntity::Out => Self::Out,
        }
    }
}
impl From<&ClockDirection> for ClockDirectionEntity {
    fn from(direction: &ClockDirection) -> Self {
        match direction {
            ClockDirection::In => Self::In,
            ClockDirection::Out => Self::Out,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClockEvent {
    pub id: Uuid,
    pub user_id: Uuid,
    pub date: Date,
    pub time_of_day: Time,
    pub direction: ClockDirection,
    pub makeup: bool,
    pub location: Option<Arc<str>>,
    pub device: Option<Arc<str>>,
    pub remark: Option<Arc<str>>,
    pub created: Option<time::PrimitiveDateTime>,
    pub deleted: Option<time::PrimitiveDateTime>,
    pub version: Uuid,
}
impl From<&ClockEventEntity> for ClockEvent {
    fn from(entity: &ClockEventEntity) -> Self {
        Self {
            id: entity.id,
            user_id: entity.user_id,
            date: entity.date,
            time_of_day: entity.time_of_day,
            direction: (&entity.direction).into(),
            makeup: entity.makeup,
            location: entity.location.clone(),
            device: entity.device.clone(),
            remark: entity.remark.clone(),
            created: Some(entity.created),
            deleted: entity.deleted,
            version: entity.version,
        }
    }
}
tally_utils::derive_from_reference!(ClockEventEntity, ClockEvent);
impl TryFrom<&ClockEvent> for ClockEventEntity {
    type Error = ServiceError;

    fn try_from(event: &ClockEvent) -> Result<Self, Self::Error> {
        Ok(Self {
            id: event.id,
            user_id: event.user_id,
            date: event.date,
            time_of_day: event.time_of_day,
            direction: (&event.direction).into(),
            makeup: event.makeup,
            location: event.location.clone(),
            device: event.device.clone(),
            remark: event.remark.clone(),
            created: event.created.ok_or(ServiceError::InternalError)?,
            deleted: event.deleted,
            version: event.version,
        })
    }
}

#[automock]
#[async_trait]
pub trait AttendanceService {
    /// Persist a punch.  Id and version must be nil on the way in; the
    /// service assigns them along with the creation timestamp.
    async fn record_event(&self, event: &ClockEvent) -> Result<ClockEvent, ServiceError>;

    /// Classify one user-day from its raw punches.  Returns an unsaved
    /// determination; persisting it is the summary service's job.
    async fn evaluate(&self, user_id: Uuid, date: Date) -> Result<DaySummary, ServiceError>;
}
