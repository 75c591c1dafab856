use chrono::{DateTime, Utc};
use uuid::{NoContext, Timestamp, Uuid};

pub mod entities;
pub mod generation;
pub mod services;

#[derive(Clone, Debug)]
pub struct NutriclinicConfig {
    pub storage: StorageConfig,
    /// JSON seed file loaded at startup. The memory store takes its foods and
    /// plans; Postgres imports the foods that are not stored yet.
    pub seed_path: Option<String>,
}

#[derive(Clone, Debug)]
pub enum StorageConfig {
    Postgres(DatabaseConfig),
    /// In-process store, lost on restart.
    Memory,
}

#[derive(Clone, Debug)]
pub struct DatabaseConfig {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    pub name: String,
}

impl DatabaseConfig {
    pub fn url(&self) -> String {
        format!(
            "postgres://{}:{}@{}:{}/{}",
            self.username, self.password, self.host, self.port, self.name
        )
    }
}

pub fn generate_timestamp() -> (DateTime<Utc>, Timestamp) {
    let now = Utc::now();
    let seconds = now.timestamp().try_into().unwrap_or(0);
    let timestamp = Timestamp::from_unix(NoContext, seconds, now.timestamp_subsec_nanos());

    (now, timestamp)
}

pub fn generate_uuid_v7() -> Uuid {
    let (_, timestamp) = generate_timestamp();
    Uuid::new_v7(timestamp)
}
