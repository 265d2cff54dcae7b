use std::sync::Arc;

use async_trait::async_trait;
use chrono::Local;
use service::{scheduler::SchedulerService, ServiceError};
use tally_utils::CancellationFlag;
use time::Duration;
use tokio::sync::Mutex;
use tokio_cron::{Job, Scheduler};
use tracing::{error, info};

pub struct SchedulerServiceImpl<
    DaySummaryService: service::day_summary::DaySummaryService,
    ClockService: service::clock::ClockService,
> {
    day_summary_service: Arc<DaySummaryService>,
    clock_service: Arc<ClockService>,
    scheduler: Arc<Mutex<Scheduler<Local>>>,
}

impl<DaySummaryService, ClockService> SchedulerServiceImpl<DaySummaryService, ClockService>
where
    DaySummaryService: service::day_summary::DaySummaryService + Sync + Send + 'static,
    ClockService: service::clock::ClockService + Sync + Send + 'static,
{
    pub fn new(
        day_summary_service: Arc<DaySummaryService>,
        clock_service: Arc<ClockService>,
    ) -> Self {
        let scheduler = Arc::new(Mutex::new(Scheduler::local()));

        Self {
            day_summary_service,
            clock_service,
            scheduler,
        }
    }
}

#[async_trait]
impl<
        DaySummaryService: service::day_summary::DaySummaryService + Sync + Send + 'static,
        ClockService: service::clock::ClockService + Sync + Send + 'static,
    > SchedulerService for SchedulerServiceImpl<DaySummaryService, ClockService>
{
    // Start the scheduler in a background task
    async fn start(&self) -> Result<(), ServiceError> {
        self.schedule_daily_recompute("0 0 2 * * *").await?;
        Ok(())
    }

    async fn schedule_daily_recompute(&self, cron: &'static str) -> Result<(), ServiceError> {
        let mut sched = self.scheduler.lock().await;

        let day_summary_service = self.day_summary_service.clone();
        let clock_service = self.clock_service.clone();

        sched.add(Job::new(cron, move || {
            let day_summary_service = day_summary_service.clone();
            let clock_service = clock_service.clone();
            async move {
                let date = clock_service.date_now().saturating_sub(Duration::days(1));
                match day_summary_service
                    .recompute_batch(date, CancellationFlag::new())
                    .await
                {
                    Err(e) => {
                        error!("Failed to recompute day summaries for {}: {:?}", date, e);
                    }
                    Ok(outcome) => {
                        info!(
                            "Recomputed day summaries for {} (cron job): {} completed, {} failed",
                            date, outcome.completed, outcome.failed
                        );
                    }
                }
            }
        }));

        info!("Scheduled daily summary recomputation with cron expression: {}", cron);
        Ok(())
    }
}
