use std::sync::Arc;

use async_trait::async_trait;
use mockall::automock;
use time::{Date, PrimitiveDateTime, Time};
use uuid::Uuid;

use crate::DaoError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ClockDirectionEntity {
    In,
    Out,
}

/// One raw punch as it arrived from a terminal or the makeup workflow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClockEventEntity {
    pub id: Uuid,
    pub user_id: Uuid,
    pub date: Date,
    pub time_of_day: Time,
    pub direction: ClockDirectionEntity,
    pub makeup: bool,
    pub location: Option<Arc<str>>,
    pub device: Option<Arc<str>>,
    pub remark: Option<Arc<str>>,
    pub created: PrimitiveDateTime,
    pub deleted: Option<PrimitiveDateTime>,
    pub version: Uuid,
}

#[automock]
#[async_trait]
pub trait ClockEventDao {
    async fn find_by_user_and_date(
        &self,
        user_id: Uuid,
        date: Date,
    ) -> Result<Arc<[ClockEventEntity]>, DaoError>;

    /// Every user that has at least one punch on the given date.
    async fn find_users_for_date(&self, date: Date) -> Result<Arc<[Uuid]>, DaoError>;

    async fn create(&self, entity: &ClockEventEntity, process: &str) -> Result<(), DaoError>;

    async fn update(&self, entity: &ClockEventEntity, process: &str) -> Result<(), DaoError>;
}
