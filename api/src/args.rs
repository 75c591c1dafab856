use clap::{Parser, ValueEnum};
use nutriclinic_core::domain::common::{DatabaseConfig, NutriclinicConfig, StorageConfig};

#[derive(Debug, Clone, Parser)]
#[command(name = "nutriclinic-api", about = "Food equivalence and meal plan API")]
pub struct Args {
    #[command(flatten)]
    pub server: ServerArgs,

    #[command(flatten)]
    pub database: DatabaseArgs,

    #[command(flatten)]
    pub storage: StorageArgs,

    #[command(flatten)]
    pub log: LogArgs,
}

#[derive(Debug, Clone, clap::Args)]
pub struct ServerArgs {
    #[arg(id = "server_host", long = "server-host", env = "SERVER_HOST", default_value = "0.0.0.0")]
    pub host: String,

    #[arg(id = "server_port", long = "server-port", env = "SERVER_PORT", default_value_t = 3333)]
    pub port: u16,

    #[arg(
        long = "allowed-origins",
        env = "ALLOWED_ORIGINS",
        value_delimiter = ',',
        default_value = "http://localhost:5173"
    )]
    pub allowed_origins: Vec<String>,

    #[arg(long = "root-path", env = "ROOT_PATH", default_value = "")]
    pub root_path: String,
}

#[derive(Debug, Clone, clap::Args)]
pub struct DatabaseArgs {
    #[arg(id = "database_host", long = "database-host", env = "DATABASE_HOST", default_value = "localhost")]
    pub host: String,

    #[arg(id = "database_port", long = "database-port", env = "DATABASE_PORT", default_value_t = 5432)]
    pub port: u16,

    #[arg(long = "database-user", env = "DATABASE_USER", default_value = "postgres")]
    pub user: String,

    #[arg(long = "database-password", env = "DATABASE_PASSWORD", default_value = "postgres")]
    pub password: String,

    #[arg(long = "database-name", env = "DATABASE_NAME", default_value = "nutriclinic")]
    pub name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StorageBackend {
    Postgres,
    Memory,
}

#[derive(Debug, Clone, clap::Args)]
pub struct StorageArgs {
    #[arg(long = "storage", env = "STORAGE_BACKEND", value_enum, default_value_t = StorageBackend::Postgres)]
    pub backend: StorageBackend,

    /// JSON file with foods (and, for the memory backend, plans) loaded at startup.
    #[arg(long = "seed-path", env = "SEED_PATH")]
    pub seed_path: Option<String>,
}

#[derive(Debug, Clone, clap::Args)]
pub struct LogArgs {
    #[arg(long = "log-filter", env = "LOG_FILTER", default_value = "info")]
    pub filter: String,

    #[arg(long = "log-json", env = "LOG_JSON", default_value_t = false)]
    pub json: bool,
}

impl From<Args> for NutriclinicConfig {
    fn from(args: Args) -> Self {
        let storage = match args.storage.backend {
            StorageBackend::Postgres => StorageConfig::Postgres(DatabaseConfig {
                host: args.database.host,
                port: args.database.port,
                username: args.database.user,
                password: args.database.password,
                name: args.database.name,
            }),
            StorageBackend::Memory => StorageConfig::Memory,
        };

        NutriclinicConfig {
            storage,
            seed_path: args.storage.seed_path,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_backend_from_flags() {
        let args = Args::parse_from([
            "nutriclinic-api",
            "--storage",
            "memory",
            "--allowed-origins",
            "http://a.test,http://b.test",
        ]);

        assert_eq!(args.server.allowed_origins.len(), 2);
        let config = NutriclinicConfig::from(args);
        assert!(matches!(config.storage, StorageConfig::Memory));
        assert_eq!(config.seed_path, None);
    }
}
