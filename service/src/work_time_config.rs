use async_trait::async_trait;
use dao::work_time_config::WorkTimeConfigEntity;
use mockall::automock;
use time::macros::time;
use time::{Date, Time};
use uuid::Uuid;

use crate::ServiceError;

/// A resolved or stored work-time rule.  Scope is encoded by which of
/// `user_id` and `department_id` is set; both unset means global.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WorkTimeConfig {
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
    pub created: Option<time::PrimitiveDateTime>,
    pub deleted: Option<time::PrimitiveDateTime>,
    pub version: Uuid,
}

impl WorkTimeConfig {
    /// Fallback schedule used when no stored rule matches: 09:00-12:00 and
    /// 13:00-18:00 with a 10 minute grace on both ends and no overtime
    /// threshold.  Never expires, never inactive.
    pub fn built_in_default() -> Self {
        Self {
            id: Uuid::nil(),
            user_id: None,
            department_id: None,
            morning_start: time!(09:00),
            morning_end: time!(12:00),
            afternoon_start: time!(13:00),
            afternoon_end: time!(18:00),
            flexible_minutes: 10,
            early_leave_minutes: 10,
            overtime_minutes: 0,
            effective_from: Date::MIN,
            expires_at: None,
            active: true,
            priority: i32::MIN,
            created: None,
            deleted: None,
            version: Uuid::nil(),
        }
    }

    /// Candidate filter: active, not soft-deleted and the date falls inside
    /// the `effective_from..=expires_at` window.
    pub fn applies_on(&self, date: Date) -> bool {
        self.active
            && self.deleted.is_none()
            && self.effective_from <= date
            && !self.expires_at.is_some_and(|expires| date > expires)
    }
}

impl From<&WorkTimeConfigEntity> for WorkTimeConfig {
    fn from(entity: &WorkTimeConfigEntity) -> Self {
        Self {
            id: entity.id,
            user_id: entity.user_id,
            department_id: entity.department_id,
            morning_start: entity.morning_start,
            morning_end: entity.morning_end,
            afternoon_start: entity.afternoon_start,
            afternoon_end: entity.afternoon_end,
            flexible_minutes: entity.flexible_minutes,
            early_leave_minutes: entity.early_leave_minutes,
            overtime_minutes: entity.overtime_minutes,
            effective_from: entity.effective_from,
            expires_at: entity.expires_at,
            active: entity.active,
            priority: entity.priority,
            created: Some(entity.created),
            deleted: entity.deleted,
            version: entity.version,
        }
    }
}
tally_utils::derive_from_reference!(WorkTimeConfigEntity, WorkTimeConfig);
impl TryFrom<&WorkTimeConfig> for WorkTimeConfigEntity {
    type Error = ServiceError;

    fn try_from(config: &WorkTimeConfig) -> Result<Self, Self::Error> {
        Ok(Self {
            id: config.id,
            user_id: config.user_id,
            department_id: config.department_id,
            morning_start: config.morning_start,
            morning_end: config.morning_end,
            afternoon_start: config.afternoon_start,
            afternoon_end: config.afternoon_end,
            flexible_minutes: config.flexible_minutes,
            early_leave_minutes: config.early_leave_minutes,
            overtime_minutes: config.overtime_minutes,
            effective_from: config.effective_from,
            expires_at: config.expires_at,
            active: config.active,
            priority: config.priority,
            created: config.created.ok_or(ServiceError::InternalError)?,
            deleted: config.deleted,
            version: config.version,
        })
    }
}

#[automock]
#[async_trait]
pub trait WorkTimeConfigService {
    /// The single rule governing the user on the given date.  Cascades
    /// user scope, then department scope, then global scope and falls back
    /// to [`WorkTimeConfig::built_in_default`].  Never fails for lack of
    /// configuration.
    async fn resolve(&self, user_id: Uuid, date: Date) -> Result<WorkTimeConfig, ServiceError>;

    async fn create(&self, config: &WorkTimeConfig) -> Result<WorkTimeConfig, ServiceError>;
}
