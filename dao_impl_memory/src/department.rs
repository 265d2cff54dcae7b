use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use dao::{department::DepartmentDao, DaoError};
use tracing::debug;
use uuid::Uuid;

use crate::{read_lock, write_lock};

pub struct DepartmentDaoImpl {
    memberships: RwLock<HashMap<Uuid, Uuid>>,
}

impl DepartmentDaoImpl {
    pub fn new() -> Self {
        Self {
            memberships: RwLock::new(HashMap::new()),
        }
    }

    pub fn assign(&self, user_id: Uuid, department_id: Uuid) -> Result<(), DaoError> {
        debug!("Assigning user {} to department {}", user_id, department_id);
        let mut memberships = write_lock(&self.memberships, "department")?;
        memberships.insert(user_id, department_id);
        Ok(())
    }
}

impl Default for DepartmentDaoImpl {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DepartmentDao for DepartmentDaoImpl {
    async fn department_of(&self, user_id: Uuid) -> Result<Option<Uuid>, DaoError> {
        let memberships = read_lock(&self.memberships, "department")?;
        Ok(memberships.get(&user_id).copied())
    }
}
