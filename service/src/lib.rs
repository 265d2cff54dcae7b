use thiserror::Error;

pub mod attendance;
pub mod clock;
pub mod day_summary;
pub mod holiday_calendar;
pub mod scheduler;
pub mod statistics;
pub mod uuid_service;
pub mod work_time_config;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Database query error: {0}")]
    DatabaseQueryError(#[from] dao::DaoError),

    #[error("Invalid date: {0}")]
    InvalidDate(#[from] tally_utils::TallyDateUtilsError),

    #[error("ID cannot be set on create")]
    IdSetOnCreate,

    #[error("Version cannot be set on create")]
    VersionSetOnCreate,

    #[error("Internal error")]
    InternalError,
}
