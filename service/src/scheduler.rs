use async_trait::async_trait;
use mockall::automock;

use crate::ServiceError;

#[automock]
#[async_trait]
pub trait SchedulerService {
    /// Start the scheduler in a background task.
    /// After calling this, scheduled jobs (added via other methods) will run automatically.
    async fn start(&self) -> Result<(), ServiceError>;

    /// Schedules a periodic job that recomputes day summaries for the previous day.
    /// The `cron` parameter is a cron expression (e.g. `"0 0 2 * * *"` to run nightly).
    async fn schedule_daily_recompute(&self, cron: &'static str) -> Result<(), ServiceError>;
}
