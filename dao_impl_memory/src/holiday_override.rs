use std::sync::RwLock;

use async_trait::async_trait;
use dao::{
    holiday_override::{HolidayOverrideDao, HolidayOverrideEntity},
    DaoError,
};
use time::Date;
use tracing::debug;

use crate::{read_lock, write_lock};

pub struct HolidayOverrideDaoImpl {
    overrides: RwLock<Vec<HolidayOverrideEntity>>,
}

impl HolidayOverrideDaoImpl {
    pub fn new() -> Self {
        Self {
            overrides: RwLock::new(Vec::new()),
        }
    }
}

impl Default for HolidayOverrideDaoImpl {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HolidayOverrideDao for HolidayOverrideDaoImpl {
    async fn find_by_date(&self, date: Date) -> Result<Option<HolidayOverrideEntity>, DaoError> {
        let overrides = read_lock(&self.overrides, "holiday_override")?;
        Ok(overrides
            .iter()
            .find(|entry| entry.date == date && entry.deleted.is_none())
            .cloned())
    }

    async fn create(
        &self,
        entity: &HolidayOverrideEntity,
        process: &str,
    ) -> Result<(), DaoError> {
        debug!(
            "Storing holiday override for {} (process: {})",
            entity.date, process
        );
        let mut overrides = write_lock(&self.overrides, "holiday_override")?;
        overrides.push(entity.clone());
        Ok(())
    }
}
