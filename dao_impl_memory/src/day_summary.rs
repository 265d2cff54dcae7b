use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use dao::{
    day_summary::{DaySummaryDao, DaySummaryEntity},
    DaoError,
};
use time::Date;
use tracing::debug;
use uuid::Uuid;

use crate::{read_lock, write_lock};

pub struct DaySummaryDaoImpl {
    summaries: RwLock<Vec<DaySummaryEntity>>,
}

impl DaySummaryDaoImpl {
    pub fn new() -> Self {
        Self {
            summaries: RwLock::new(Vec::new()),
        }
    }
}

impl Default for DaySummaryDaoImpl {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DaySummaryDao for DaySummaryDaoImpl {
    async fn find_by_user_and_date(
        &self,
        user_id: Uuid,
        date: Date,
    ) -> Result<Option<DaySummaryEntity>, DaoError> {
        let summaries = read_lock(&self.summaries, "day_summary")?;
        Ok(summaries
            .iter()
            .find(|summary| summary.user_id == user_id && summary.date == date)
            .cloned())
    }

    async fn find_by_user_in_range(
        &self,
        user_id: Uuid,
        from: Date,
        to: Date,
    ) -> Result<Arc<[DaySummaryEntity]>, DaoError> {
        let summaries = read_lock(&self.summaries, "day_summary")?;
        let mut rows: Vec<DaySummaryEntity> = summaries
            .iter()
            .filter(|summary| {
                summary.user_id == user_id && summary.date >= from && summary.date <= to
            })
            .cloned()
            .collect();
        rows.sort_by_key(|summary| summary.date);
        Ok(rows.into())
    }

    async fn upsert(&self, entity: &DaySummaryEntity, process: &str) -> Result<(), DaoError> {
        debug!(
            "Upserting day summary for {} on {} (process: {})",
            entity.user_id, entity.date, process
        );
        let mut summaries = write_lock(&self.summaries, "day_summary")?;
        match summaries
            .iter_mut()
            .find(|summary| summary.user_id == entity.user_id && summary.date == entity.date)
        {
            Some(stored) => *stored = entity.clone(),
            None => summaries.push(entity.clone()),
        }
        Ok(())
    }
}
