use std::collections::BTreeMap;

use async_trait::async_trait;
use mockall::automock;
use serde::Serialize;
use uuid::Uuid;

use crate::day_summary::AbsenceClass;
use crate::ServiceError;

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DayDetail {
    pub absence: AbsenceClass,
    pub clock_in: Option<String>,
    pub clock_out: Option<String>,
    pub worked_minutes: u32,
    pub overtime_minutes: u32,
    pub anomaly: bool,
}

/// Monthly rollup for one user.  Derived on demand, never persisted.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MonthlyStatistics {
    pub user_id: Uuid,
    pub year: i32,
    pub month: u8,
    pub normal_days: u32,
    pub late_days: u32,
    pub early_leave_days: u32,
    pub absence_days: u32,
    pub leave_days: u32,
    pub outside_work_days: u32,
    pub working_days: u32,
    pub attendance_days: u32,
    /// Percent, rounded to two decimals.  Zero when the month has no
    /// working days.
    pub attendance_rate: f64,
    pub total_worked_minutes: u32,
    pub average_worked_minutes: u32,
    pub overtime_minutes: u32,
    /// Per-day detail keyed by ISO date, so serialized output is ordered.
    pub days: BTreeMap<String, DayDetail>,
}

#[automock]
#[async_trait]
pub trait StatisticsService {
    async fn monthly_statistics(
        &self,
        user_id: Uuid,
        year: i32,
        month: u8,
    ) -> Result<MonthlyStatistics, ServiceError>;
}
