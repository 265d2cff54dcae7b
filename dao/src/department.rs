use async_trait::async_trait;
use mockall::automock;
use uuid::Uuid;

use crate::DaoError;

/// Org lookup used while cascading work-time rules.  Kept narrow on purpose,
/// the attendance side only ever needs the membership edge.
#[automock]
#[async_trait]
pub trait DepartmentDao {
    async fn department_of(&self, user_id: Uuid) -> Result<Option<Uuid>, DaoError>;
}
