use std::sync::Arc;

use async_trait::async_trait;
use mockall::automock;
use time::{Date, PrimitiveDateTime, Time};
use uuid::Uuid;

use crate::DaoError;

/// A work-time rule row.  Scope is encoded by which of `user_id` and
/// `department_id` is set: user beats department beats global (both unset).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkTimeConfigEntity {
    pub id: Uuid,
    pub user_id: Option<Uuid>,
    pub department_id: Option<Uuid>,
    pub morning_start: Time,
    pub morning_end: Time,
    pub afternoon_start: Time,
    pub afternoon_end: Time,
    pub flexible_minutes: u32,
    pub early_leave_minutes: u32,
    pub overtime_minutes: u32,
    pub effective_from: Date,
    pub expires_at: Option<Date>,
    pub active: bool,
    pub priority: i32,
    pub created: PrimitiveDateTime,
    pub deleted: Option<PrimitiveDateTime>,
    pub version: Uuid,
}

#[automock]
#[async_trait]
pub trait WorkTimeConfigDao {
    async fn find_by_user_id(
        &self,
        user_id: Uuid,
    ) -> Result<Arc<[WorkTimeConfigEntity]>, DaoError>;

    async fn find_by_department_id(
        &self,
        department_id: Uuid,
    ) -> Result<Arc<[WorkTimeConfigEntity]>, DaoError>;

    /// Rows with neither user nor department scope.
    async fn find_global(&self) -> Result<Arc<[WorkTimeConfigEntity]>, DaoError>;

    async fn create(&self, entity: &WorkTimeConfigEntity, process: &str) -> Result<(), DaoError>;
}
