use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use dao::{
    clock_event::{ClockEventDao, ClockEventEntity},
    DaoError,
};
use time::Date;
use tracing::debug;
use uuid::Uuid;

use crate::{read_lock, write_lock};

pub struct ClockEventDaoImpl {
    events: RwLock<Vec<ClockEventEntity>>,
}

impl ClockEventDaoImpl {
    pub fn new() -> Self {
        Self {
            events: RwLock::new(Vec::new()),
        }
    }
}

impl Default for ClockEventDaoImpl {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ClockEventDao for ClockEventDaoImpl {
    async fn find_by_user_and_date(
        &self,
        user_id: Uuid,
        date: Date,
    ) -> Result<Arc<[ClockEventEntity]>, DaoError> {
        let events = read_lock(&self.events, "clock_event")?;
        Ok(events
            .iter()
            .filter(|event| event.user_id == user_id && event.date == date)
            .cloned()
            .collect())
    }

    async fn find_users_for_date(&self, date: Date) -> Result<Arc<[Uuid]>, DaoError> {
        let events = read_lock(&self.events, "clock_event")?;
        let mut users: Vec<Uuid> = events
            .iter()
            .filter(|event| event.date == date)
            .map(|event| event.user_id)
            .collect();
        users.sort();
        users.dedup();
        Ok(users.into())
    }

    async fn create(&self, entity: &ClockEventEntity, process: &str) -> Result<(), DaoError> {
        debug!("Storing clock event {} (process: {})", entity.id, process);
        let mut events = write_lock(&self.events, "clock_event")?;
        events.push(entity.clone());
        Ok(())
    }

    async fn update(&self, entity: &ClockEventEntity, process: &str) -> Result<(), DaoError> {
        debug!("Updating clock event {} (process: {})", entity.id, process);
        let mut events = write_lock(&self.events, "clock_event")?;
        match events.iter_mut().find(|event| event.id == entity.id) {
            Some(stored) => {
                *stored = entity.clone();
                Ok(())
            }
            None => Err(DaoError::DatabaseQueryError(
                format!("no clock event with id {}", entity.id).into(),
            )),
        }
    }
}
