use std::cmp::Reverse;
use std::sync::Arc;

use async_trait::async_trait;
use dao::work_time_config::WorkTimeConfigEntity;
use service::{
    work_time_config::{WorkTimeConfig, WorkTimeConfigService},
    ServiceError,
};
use time::Date;
use tracing::warn;
use uuid::Uuid;

pub struct WorkTimeConfigServiceImpl<
    WorkTimeConfigDao: dao::work_time_config::WorkTimeConfigDao,
    DepartmentDao: dao::department::DepartmentDao,
    ClockService: service::clock::ClockService,
    UuidService: service::uuid_service::UuidService,
> {
    work_time_config_dao: Arc<WorkTimeConfigDao>,
    department_dao: Option<Arc<DepartmentDao>>,
    clock_service: Arc<ClockService>,
    uuid_service: Arc<UuidService>,
}

/// Winner within one scope tier: highest priority, ties broken by lowest id.
fn pick_effective(entities: &[WorkTimeConfigEntity], date: Date) -> Option<WorkTimeConfig> {
    entities
        .iter()
        .map(WorkTimeConfig::from)
        .filter(|config| config.applies_on(date))
        .max_by_key(|config| (config.priority, Reverse(config.id)))
}

impl<WorkTimeConfigDao, DepartmentDao, ClockService, UuidService>
    WorkTimeConfigServiceImpl<WorkTimeConfigDao, DepartmentDao, ClockService, UuidService>
where
    WorkTimeConfigDao: dao::work_time_config::WorkTimeConfigDao + Sync + Send,
    DepartmentDao: dao::department::DepartmentDao + Sync + Send,
    ClockService: service::clock::ClockService + Sync + Send,
    UuidService: service::uuid_service::UuidService + Sync + Send,
{
    /// The department lookup is optional.  Without it the department tier is
    /// skipped and resolution falls through to the global tier.
    pub fn new(
        work_time_config_dao: Arc<WorkTimeConfigDao>,
        department_dao: Option<Arc<DepartmentDao>>,
        clock_service: Arc<ClockService>,
        uuid_service: Arc<UuidService>,
    ) -> Self {
        Self {
            work_time_config_dao,
            department_dao,
            clock_service,
            uuid_service,
        }
    }

    async fn department_of(&self, user_id: Uuid) -> Option<Uuid> {
        let department_dao = self.department_dao.as_ref()?;
        match department_dao.department_of(user_id).await {
            Ok(department_id) => department_id,
            Err(err) => {
                warn!(
                    "Department lookup failed for user {}, skipping department scope: {}",
                    user_id, err
                );
                None
            }
        }
    }
}

#[async_trait]
impl<
        WorkTimeConfigDao: dao::work_time_config::WorkTimeConfigDao + Sync + Send,
        DepartmentDao: dao::department::DepartmentDao + Sync + Send,
        ClockService: service::clock::ClockService + Sync + Send,
        UuidService: service::uuid_service::UuidService + Sync + Send,
    > WorkTimeConfigService
    for WorkTimeConfigServiceImpl<WorkTimeConfigDao, DepartmentDao, ClockService, UuidService>
{
    async fn resolve(&self, user_id: Uuid, date: Date) -> Result<WorkTimeConfig, ServiceError> {
        let user_configs = self.work_time_config_dao.find_by_user_id(user_id).await?;
        if let Some(config) = pick_effective(&user_configs, date) {
            return Ok(config);
        }

        if let Some(department_id) = self.department_of(user_id).await {
            let department_configs = self
                .work_time_config_dao
                .find_by_department_id(department_id)
                .await?;
            if let Some(config) = pick_effective(&department_configs, date) {
                return Ok(config);
            }
        }

        let global_configs = self.work_time_config_dao.find_global().await?;
        if let Some(config) = pick_effective(&global_configs, date) {
            return Ok(config);
        }

        Ok(WorkTimeConfig::built_in_default())
    }

    async fn create(&self, config: &WorkTimeConfig) -> Result<WorkTimeConfig, ServiceError> {
        let mut config = config.clone();
        config.created = Some(self.clock_service.date_time_now());
        let mut entity: WorkTimeConfigEntity = (&config).try_into()?;

        if !entity.id.is_nil() {
            return Err(ServiceError::IdSetOnCreate);
        }
        if !entity.version.is_nil() {
            return Err(ServiceError::VersionSetOnCreate);
        }
        entity.id = self
            .uuid_service
            .new_uuid("work-time-config-service::create id");
        entity.version = self
            .uuid_service
            .new_uuid("work-time-config-service::create version");

        self.work_time_config_dao
            .create(&entity, "work-time-config-service::create")
            .await?;
        Ok(WorkTimeConfig::from(&entity))
    }
}
