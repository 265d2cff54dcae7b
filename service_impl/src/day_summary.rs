use std::sync::Arc;

use async_trait::async_trait;
use dao::day_summary::DaySummaryEntity;
use service::{
    day_summary::{BatchOutcome, DaySummary, DaySummaryService},
    ServiceError,
};
use tally_utils::CancellationFlag;
use time::Date;
use tokio::task::{JoinError, JoinSet};
use tracing::warn;
use uuid::Uuid;

use crate::keyed_lock::KeyedLock;

/// Upper bound on concurrently recomputed users during a batch run.
const BATCH_WORKER_CAP: usize = 8;

pub struct DaySummaryServiceImpl<
    AttendanceService: service::attendance::AttendanceService,
    ClockEventDao: dao::clock_event::ClockEventDao,
    DaySummaryDao: dao::day_summary::DaySummaryDao,
    ClockService: service::clock::ClockService,
    UuidService: service::uuid_service::UuidService,
> {
    attendance_service: Arc<AttendanceService>,
    clock_event_dao: Arc<ClockEventDao>,
    day_summary_dao: Arc<DaySummaryDao>,
    clock_service: Arc<ClockService>,
    uuid_service: Arc<UuidService>,
    recompute_locks: Arc<KeyedLock<(Uuid, Date)>>,
}

impl<AttendanceService, ClockEventDao, DaySummaryDao, ClockService, UuidService> Clone
    for DaySummaryServiceImpl<AttendanceService, ClockEventDao, DaySummaryDao, ClockService, UuidService>
where
    AttendanceService: service::attendance::AttendanceService,
    ClockEventDao: dao::clock_event::ClockEventDao,
    DaySummaryDao: dao::day_summary::DaySummaryDao,
    ClockService: service::clock::ClockService,
    UuidService: service::uuid_service::UuidService,
{
    fn clone(&self) -> Self {
        Self {
            attendance_service: self.attendance_service.clone(),
            clock_event_dao: self.clock_event_dao.clone(),
            day_summary_dao: self.day_summary_dao.clone(),
            clock_service: self.clock_service.clone(),
            uuid_service: self.uuid_service.clone(),
            recompute_locks: self.recompute_locks.clone(),
        }
    }
}

fn record_outcome(
    outcome: &mut BatchOutcome,
    result: Result<(Uuid, Result<DaySummary, ServiceError>), JoinError>,
) {
    match result {
        Ok((_, Ok(_))) => outcome.completed += 1,
        Ok((user_id, Err(err))) => {
            warn!("Day summary recomputation failed for user {}: {}", user_id, err);
            outcome.failed += 1;
        }
        Err(err) => {
            warn!("Day summary recomputation task panicked: {}", err);
            outcome.failed += 1;
        }
    }
}

impl<AttendanceService, ClockEventDao, DaySummaryDao, ClockService, UuidService>
    DaySummaryServiceImpl<AttendanceService, ClockEventDao, DaySummaryDao, ClockService, UuidService>
where
    AttendanceService: service::attendance::AttendanceService + Sync + Send + 'static,
    ClockEventDao: dao::clock_event::ClockEventDao + Sync + Send + 'static,
    DaySummaryDao: dao::day_summary::DaySummaryDao + Sync + Send + 'static,
    ClockService: service::clock::ClockService + Sync + Send + 'static,
    UuidService: service::uuid_service::UuidService + Sync + Send + 'static,
{
    pub fn new(
        attendance_service: Arc<AttendanceService>,
        clock_event_dao: Arc<ClockEventDao>,
        day_summary_dao: Arc<DaySummaryDao>,
        clock_service: Arc<ClockService>,
        uuid_service: Arc<UuidService>,
    ) -> Self {
        Self {
            attendance_service,
            clock_event_dao,
            day_summary_dao,
            clock_service,
            uuid_service,
            recompute_locks: Arc::new(KeyedLock::new()),
        }
    }

    async fn recompute_day(&self, user_id: Uuid, date: Date) -> Result<DaySummary, ServiceError> {
        let _guard = self.recompute_locks.acquire((user_id, date)).await;

        let mut summary = self.attendance_service.evaluate(user_id, date).await?;
        match self
            .day_summary_dao
            .find_by_user_and_date(user_id, date)
            .await?
        {
            Some(existing) => {
                // Keep the row identity so recomputation overwrites instead
                // of duplicating.
                summary.id = existing.id;
                summary.created = Some(existing.created);
            }
            None => {
                summary.id = self
                    .uuid_service
                    .new_uuid("day-summary-service::recompute id");
                summary.created = Some(self.clock_service.date_time_now());
            }
        }
        summary.version = self
            .uuid_service
            .new_uuid("day-summary-service::recompute version");

        let entity: DaySummaryEntity = (&summary).try_into()?;
        self.day_summary_dao
            .upsert(&entity, "day-summary-service::recompute")
            .await?;
        Ok(DaySummary::from(&entity))
    }
}

#[async_trait]
impl<
        AttendanceService: service::attendance::AttendanceService + Sync + Send + 'static,
        ClockEventDao: dao::clock_event::ClockEventDao + Sync + Send + 'static,
        DaySummaryDao: dao::day_summary::DaySummaryDao + Sync + Send + 'static,
        ClockService: service::clock::ClockService + Sync + Send + 'static,
        UuidService: service::uuid_service::UuidService + Sync + Send + 'static,
    > DaySummaryService
    for DaySummaryServiceImpl<AttendanceService, ClockEventDao, DaySummaryDao, ClockService, UuidService>
{
    async fn recompute(&self, user_id: Uuid, date: Date) -> Result<DaySummary, ServiceError> {
        self.recompute_day(user_id, date).await
    }

    async fn recompute_batch(
        &self,
        date: Date,
        cancel: CancellationFlag,
    ) -> Result<BatchOutcome, ServiceError> {
        let user_ids = self.clock_event_dao.find_users_for_date(date).await?;
        let mut pending = user_ids.iter().copied();
        let mut join_set = JoinSet::new();
        let mut outcome = BatchOutcome::default();

        loop {
            if cancel.is_cancelled() {
                outcome.cancelled = true;
                break;
            }
            while join_set.len() < BATCH_WORKER_CAP {
                match pending.next() {
                    Some(user_id) => {
                        let service = self.clone();
                        join_set.spawn(async move {
                            (user_id, service.recompute_day(user_id, date).await)
                        });
                    }
                    None => break,
                }
            }
            match join_set.join_next().await {
                Some(result) => record_outcome(&mut outcome, result),
                None => break,
            }
        }

        // A cancelled run lets in-flight workers finish; only unscheduled
        // users are dropped.
        while let Some(result) = join_set.join_next().await {
            record_outcome(&mut outcome, result);
        }

        Ok(outcome)
    }

    async fn find_by_user_in_range(
        &self,
        user_id: Uuid,
        from: Date,
        to: Date,
    ) -> Result<Arc<[DaySummary]>, ServiceError> {
        Ok(self
            .day_summary_dao
            .find_by_user_in_range(user_id, from, to)
            .await?
            .iter()
            .map(DaySummary::from)
            .collect())
    }
}
