use std::sync::Arc;

use async_trait::async_trait;
use dao::day_summary::{AbsenceClassEntity, ClockStatusEntity, DaySummaryEntity};
use mockall::automock;
use serde::Serialize;
use tally_utils::CancellationFlag;
use time::{Date, Time};
use uuid::Uuid;

use crate::ServiceError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ClockStatus {
    Normal,
    Late,
    EarlyLeave,
    Makeup,
}
impl From<&ClockStatusEntity> for ClockStatus {
    fn from(entity: &ClockStatusEntity) -> Self {
        match entity {
            ClockStatusEntity::Normal => Self::Normal,
            ClockStatusEntity::Late => Self::Late,
            ClockStatusEntity::EarlyLeave => Self::EarlyLeave,
            ClockStatusEntity::Makeup => Self::Makeup,
        }
    }
}
impl From<&ClockStatus> for ClockStatusEntity {
    fn from(status: &ClockStatus) -> Self {
        match status {
            ClockStatus::Normal => Self::Normal,
            ClockStatus::Late => Self::Late,
            ClockStatus::EarlyLeave => Self::EarlyLeave,
            ClockStatus::Makeup => Self::Makeup,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AbsenceClass {
    Normal,
    Late,
    EarlyLeave,
    Absence,
    Leave,
    OutsideWork,
}
impl From<&AbsenceClassEntity> for AbsenceClass {
    fn from(entity: &AbsenceClassEntity) -> Self {
        match entity {
            AbsenceClassEntity::Normal => Self::Normal,
            AbsenceClassEntity::Late => Self::Late,
            AbsenceClassEntity::EarlyLeave => Self::EarlyLeave,
            AbsenceClassEntity::Absence => Self::Absence,
            AbsenceClassEntity::Leave => Self::Leave,
            AbsenceClassEntity::OutsideWork => Self::OutsideWork,
        }
    }
}
impl From<&AbsenceClass> for AbsenceClassEntity {
    fn from(class: &AbsenceClass) -> Self {
        match class {
            AbsenceClass::Normal => Self::Normal,
            AbsenceClass::Late => Self::Late,
            AbsenceClass::EarlyLeave => Self::EarlyLeave,
            AbsenceClass::Absence => Self::Absence,
            AbsenceClass::Leave => Self::Leave,
            AbsenceClass::OutsideWork => Self::OutsideWork,
        }
    }
}

/// The determination for one user on one date.  At most one per (user, date);
/// recomputing replaces the derived fields and keeps the row identity.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DaySummary {
    pub id: Uuid,
    pub user_id: Uuid,
    pub date: Date,
    pub clock_in_time: Option<Time>,
    pub clock_in_status: Option<ClockStatus>,
    pub clock_out_time: Option<Time>,
    pub clock_out_status: Option<ClockStatus>,
    pub worked_minutes: u32,
    pub overtime_minutes: u32,
    pub absence: AbsenceClass,
    pub anomaly: bool,
    pub remark: Option<Arc<str>>,
    pub created: Option<time::PrimitiveDateTime>,
    pub version: Uuid,
}
impl From<&DaySummaryEntity> for DaySummary {
    fn from(entity: &DaySummaryEntity) -> Self {
        Self {
            id: entity.id,
            user_id: entity.user_id,
            date: entity.date,
            clock_in_time: entity.clock_in_time,
            clock_in_status: entity.clock_in_status.as_ref().map(ClockStatus::from),
            clock_out_time: entity.clock_out_time,
            clock_out_status: entity.clock_out_status.as_ref().map(ClockStatus::from),
            worked_minutes: entity.worked_minutes,
            overtime_minutes: entity.overtime_minutes,
            absence: (&entity.absence).into(),
            anomaly: entity.anomaly,
            remark: entity.remark.clone(),
            created: Some(entity.created),
            version: entity.version,
        }
    }
}
tally_utils::derive_from_reference!(DaySummaryEntity, DaySummary);
impl TryFrom<&DaySummary> for DaySummaryEntity {
    type Error = ServiceError;

    fn try_from(summary: &DaySummary) -> Result<Self, Self::Error> {
        Ok(Self {
            id: summary.id,
            user_id: summary.user_id,
            date: summary.date,
            clock_in_time: summary.clock_in_time,
            clock_in_status: summary.clock_in_status.as_ref().map(ClockStatusEntity::from),
            clock_out_time: summary.clock_out_time,
            clock_out_status: summary.clock_out_status.as_ref().map(ClockStatusEntity::from),
            worked_minutes: summary.worked_minutes,
            overtime_minutes: summary.overtime_minutes,
            absence: (&summary.absence).into(),
            anomaly: summary.anomaly,
            remark: summary.remark.clone(),
            created: summary.created.ok_or(ServiceError::InternalError)?,
            version: summary.version,
        })
    }
}

/// Result of a batch recomputation run.  `cancelled` marks a partial run;
/// the counters then cover only the users reached before the stop.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BatchOutcome {
    pub completed: u32,
    pub failed: u32,
    pub cancelled: bool,
}

#[automock]
#[async_trait]
pub trait DaySummaryService {
    /// Evaluate one user-day and persist the result.  Safe to call
    /// repeatedly; concurrent calls for the same (user, date) are
    /// serialized.
    async fn recompute(&self, user_id: Uuid, date: Date) -> Result<DaySummary, ServiceError>;

    /// Recompute every user with punches on the date.  Per-user failures
    /// are counted, not fatal.  The flag stops the run between users.
    async fn recompute_batch(
        &self,
        date: Date,
        cancel: CancellationFlag,
    ) -> Result<BatchOutcome, ServiceError>;

    async fn find_by_user_in_range(
        &self,
        user_id: Uuid,
        from: Date,
        to: Date,
    ) -> Result<Arc<[DaySummary]>, ServiceError>;
}
