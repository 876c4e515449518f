use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::anyhow;
use config::{ConfigError, Map, Source, Value, ValueKind};
use serde::{Deserialize, Serialize};

use mymodule_common::StdResult;
use mymodule_common::entities::Tenant;
use mymodule_persistence::naming::TableNaming;

/// Extension of the SQLite files holding the tenant databases
const TENANT_DATABASE_EXTENSION: &str = "sqlite3";

/// Different kinds of execution environments
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub enum ExecutionEnvironment {
    /// Test environment, maximum logging, memory stores etc.
    Test,

    /// Production environment, minimum logging, persistent stores etc.
    Production,
}

impl FromStr for ExecutionEnvironment {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "production" => Ok(Self::Production),
            "test" => Ok(Self::Test),
            _ => Err(ConfigError::Message(format!(
                "Unknown execution environment {s}"
            ))),
        }
    }
}

impl From<ExecutionEnvironment> for ValueKind {
    fn from(value: ExecutionEnvironment) -> Self {
        match value {
            ExecutionEnvironment::Production => ValueKind::String("Production".to_string()),
            ExecutionEnvironment::Test => ValueKind::String("Test".to_string()),
        }
    }
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Configuration {
    /// What kind of runtime environment the configuration is meant to.
    pub environment: ExecutionEnvironment,

    /// Server listening IP
    pub server_ip: String,

    /// Server listening port
    pub server_port: u16,

    /// Directory holding one SQLite database per tenant
    pub data_stores_directory: PathBuf,

    /// Tenants served, comma separated
    pub tenants: String,

    /// Tenant used when a request does not name one
    pub default_tenant: String,

    /// How logical table names are turned into physical ones
    pub table_naming: TableNaming,

    /// Number of connections opened to each tenant database
    pub connection_pool_size: usize,
}

impl Configuration {
    /// Create a sample configuration mainly for tests
    pub fn new_sample<P: AsRef<Path>>(data_stores_directory: P) -> Self {
        Self {
            environment: ExecutionEnvironment::Test,
            server_ip: "127.0.0.1".to_string(),
            server_port: 0,
            data_stores_directory: data_stores_directory.as_ref().to_path_buf(),
            tenants: "main".to_string(),
            default_tenant: "main".to_string(),
            table_naming: TableNaming::Verbatim,
            connection_pool_size: 1,
        }
    }

    /// List the configured tenants, the default tenant included.
    pub fn list_tenants(&self) -> StdResult<Vec<Tenant>> {
        let mut tenants: BTreeSet<Tenant> = self
            .tenants
            .split(',')
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(Tenant::new)
            .collect();
        tenants.insert(self.default_tenant()?);

        Ok(tenants.into_iter().collect())
    }

    /// Tenant used when a request does not name one
    pub fn default_tenant(&self) -> StdResult<Tenant> {
        let name = self.default_tenant.trim();
        if name.is_empty() {
            return Err(anyhow!("The default tenant can not be empty"));
        }

        Ok(Tenant::new(name))
    }

    /// Path of the SQLite file of the given tenant
    pub fn tenant_database_path(&self, tenant: &Tenant) -> PathBuf {
        self.data_stores_directory
            .join(format!("{}.{TENANT_DATABASE_EXTENSION}", tenant.name))
    }
}

/// Default configuration with all the default values for configurations.
#[derive(Debug, Clone)]
pub struct DefaultConfiguration {
    /// Execution environment
    pub environment: ExecutionEnvironment,

    /// Server listening IP
    pub server_ip: String,

    /// Server listening port
    pub server_port: String,

    /// Tenants served, comma separated
    pub tenants: String,

    /// Tenant used when a request does not name one
    pub default_tenant: String,

    /// How logical table names are turned into physical ones
    pub table_naming: String,

    /// Number of connections opened to each tenant database
    pub connection_pool_size: u64,
}

impl Default for DefaultConfiguration {
    fn default() -> Self {
        Self {
            environment: ExecutionEnvironment::Production,
            server_ip: "0.0.0.0".to_string(),
            server_port: "8080".to_string(),
            tenants: "main".to_string(),
            default_tenant: "main".to_string(),
            table_naming: "verbatim".to_string(),
            connection_pool_size: 4,
        }
    }
}

impl Source for DefaultConfiguration {
    fn clone_into_box(&self) -> Box<dyn Source + Send + Sync> {
        Box::new(self.clone())
    }

    fn collect(&self) -> Result<Map<String, Value>, ConfigError> {
        let mut result = Map::new();
        let namespace = "default configuration".to_string();
        let myself = self.clone();
        result.insert(
            "environment".to_string(),
            Value::new(Some(&namespace), ValueKind::from(myself.environment)),
        );
        result.insert(
            "server_ip".to_string(),
            Value::new(Some(&namespace), ValueKind::from(myself.server_ip)),
        );
        result.insert(
            "server_port".to_string(),
            Value::new(Some(&namespace), ValueKind::from(myself.server_port)),
        );
        result.insert(
            "tenants".to_string(),
            Value::new(Some(&namespace), ValueKind::from(myself.tenants)),
        );
        result.insert(
            "default_tenant".to_string(),
            Value::new(Some(&namespace), ValueKind::from(myself.default_tenant)),
        );
        result.insert(
            "table_naming".to_string(),
            Value::new(Some(&namespace), ValueKind::from(myself.table_naming)),
        );
        result.insert(
            "connection_pool_size".to_string(),
            Value::new(
                Some(&namespace),
                ValueKind::from(myself.connection_pool_size),
            ),
        );

        Ok(result)
    }
}
