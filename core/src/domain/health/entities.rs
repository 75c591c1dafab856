use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct DatabaseHealthStatus {
    /// Backend answering the probe, `postgres` or `memory`.
    pub backend: String,
    pub status: String,
    pub response_time_ms: u64,
}

impl DatabaseHealthStatus {
    pub fn up(backend: &str, response_time_ms: u64) -> Self {
        Self {
            backend: backend.to_string(),
            status: "up".to_string(),
            response_time_ms,
        }
    }
}
