use std::sync::Arc;

use async_trait::async_trait;
use mockall::automock;
use time::{Date, PrimitiveDateTime, Time};
use uuid::Uuid;

use crate::DaoError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClockStatusEntity {
    Normal,
    Late,
    EarlyLeave,
    Makeup,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AbsenceClassEntity {
    Normal,
    Late,
    EarlyLeave,
    Absence,
    Leave,
    OutsideWork,
}

/// Materialized per-user per-day attendance determination.  Exactly one row
/// per (user, date); recomputation replaces the derived fields in place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DaySummaryEntity {
    pub id: Uuid,
    pub user_id: Uuid,
    pub date: Date,
    pub clock_in_time: Option<Time>,
    pub clock_in_status: Option<ClockStatusEntity>,
    pub clock_out_time: Option<Time>,
    pub clock_out_status: Option<ClockStatusEntity>,
    pub worked_minutes: u32,
    pub overtime_minutes: u32,
    pub absence: AbsenceClassEntity,
    pub anomaly: bool,
    pub remark: Option<Arc<str>>,
    pub created: PrimitiveDateTime,
    pub version: Uuid,
}

#[automock]
#[async_trait]
pub trait DaySummaryDao {
    async fn find_by_user_and_date(
        &self,
        user_id: Uuid,
        date: Date,
    ) -> Result<Option<DaySummaryEntity>, DaoError>;

    async fn find_by_user_in_range(
        &self,
        user_id: Uuid,
        from: Date,
        to: Date,
    ) -> Result<Arc<[DaySummaryEntity]>, DaoError>;

    /// Insert or replace the row keyed by (user, date).
    async fn upsert(&self, entity: &DaySummaryEntity, process: &str) -> Result<(), DaoError>;
}
