use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use dao::{
    work_time_config::{WorkTimeConfigDao, WorkTimeConfigEntity},
    DaoError,
};
use tracing::debug;
use uuid::Uuid;

use crate::{read_lock, write_lock};

pub struct WorkTimeConfigDaoImpl {
    configs: RwLock<Vec<WorkTimeConfigEntity>>,
}

impl WorkTimeConfigDaoImpl {
    pub fn new() -> Self {
        Self {
            configs: RwLock::new(Vec::new()),
        }
    }
}

impl Default for WorkTimeConfigDaoImpl {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl WorkTimeConfigDao for WorkTimeConfigDaoImpl {
    async fn find_by_user_id(
        &self,
        user_id: Uuid,
    ) -> Result<Arc<[WorkTimeConfigEntity]>, DaoError> {
        let configs = read_lock(&self.configs, "work_time_config")?;
        Ok(configs
            .iter()
            .filter(|config| config.user_id == Some(user_id))
            .cloned()
            .collect())
    }

    async fn find_by_department_id(
        &self,
        department_id: Uuid,
    ) -> Result<Arc<[WorkTimeConfigEntity]>, DaoError> {
        let configs = read_lock(&self.configs, "work_time_config")?;
        Ok(configs
            .iter()
            .filter(|config| {
                config.user_id.is_none() && config.department_id == Some(department_id)
            })
            .cloned()
            .collect())
    }

    async fn find_global(&self) -> Result<Arc<[WorkTimeConfigEntity]>, DaoError> {
        let configs = read_lock(&self.configs, "work_time_config")?;
        Ok(configs
            .iter()
            .filter(|config| config.user_id.is_none() && config.department_id.is_none())
            .cloned()
            .collect())
    }

    async fn create(&self, entity: &WorkTimeConfigEntity, process: &str) -> Result<(), DaoError> {
        debug!(
            "Storing work time config {} (process: {})",
            entity.id, process
        );
        let mut configs = write_lock(&self.configs, "work_time_config")?;
        configs.push(entity.clone());
        Ok(())
    }
}
