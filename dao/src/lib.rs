use thiserror::Error;

pub mod clock_event;
pub mod day_summary;
pub mod department;
pub mod holiday_override;
pub mod work_time_config;

#[derive(Error, Debug)]
pub enum DaoError {
    #[error("Database query error: {0}")]
    DatabaseQueryError(#[from] Box<dyn std::error::Error + Send + Sync>),

    #[error("Record store call timed out: {0}")]
    Timeout(&'static str),
}
