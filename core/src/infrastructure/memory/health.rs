use crate::domain::{
    common::entities::app_errors::CoreError,
    health::{entities::DatabaseHealthStatus, ports::HealthCheckRepository},
};

#[derive(Debug, Clone, Copy, Default)]
pub struct InMemoryHealthCheckRepository;

impl HealthCheckRepository for InMemoryHealthCheckRepository {
    async fn readness(&self) -> Result<DatabaseHealthStatus, CoreError> {
        Ok(DatabaseHealthStatus::up("memory", 0))
    }

    async fn health(&self) -> Result<u64, CoreError> {
        Ok(0)
    }
}
