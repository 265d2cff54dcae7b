use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use dao::DaoError;

pub mod clock_event;
pub mod day_summary;
pub mod department;
pub mod holiday_override;
pub mod work_time_config;


pub(crate) fn read_lock<'a, T>(
    lock: &'a RwLock<T>,
    table: &'static str,
) -> Result<RwLockReadGuard<'a, T>, DaoError> {
    lock.read().map_err(|_| poisoned(table))
}

pub(crate) fn write_lock<'a, T>(
    lock: &'a RwLock<T>,
    table: &'static str,
) -> Result<RwLockWriteGuard<'a, T>, DaoError> {
    lock.write().map_err(|_| poisoned(table))
}

fn poisoned(table: &'static str) -> DaoError {
    DaoError::DatabaseQueryError(format!("{} store lock poisoned", table).into())
}
