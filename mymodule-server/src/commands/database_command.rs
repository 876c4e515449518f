use anyhow::Context;
use clap::{Parser, Subcommand};
use config::builder::{ConfigBuilder, DefaultState};
use slog::{Logger, debug, info};

use mymodule_common::StdResult;
use mymodule_common::entities::Tenant;

use crate::Configuration;
use crate::dependency_injection::DependenciesBuilder;

/// Database tools
#[derive(Debug, Clone, Subcommand)]
pub enum DatabaseSubCommand {
    /// Apply the pending migrations of the module in every tenant database
    Migrate(MigrateCommand),

    /// Revert the migrations of the module, dropping its table
    Rollback(RollbackCommand),
}

impl DatabaseSubCommand {
    pub async fn execute(
        &self,
        root_logger: Logger,
        config_builder: ConfigBuilder<DefaultState>,
    ) -> StdResult<()> {
        let config: Configuration = config_builder
            .build()
            .with_context(|| "configuration build error")?
            .try_deserialize()
            .with_context(|| "configuration deserialize error")?;
        debug!(root_logger, "DATABASE command"; "config" => format!("{config:?}"));

        match self {
            Self::Migrate(cmd) => cmd.execute(root_logger, config).await,
            Self::Rollback(cmd) => cmd.execute(root_logger, config).await,
        }
    }
}

#[derive(Parser, Debug, Clone)]
pub struct MigrateCommand {}

impl MigrateCommand {
    pub async fn execute(&self, root_logger: Logger, config: Configuration) -> StdResult<()> {
        println!(
            "Migrating tenant databases in stores directory: {}",
            config.data_stores_directory.to_string_lossy()
        );
        let mut dependencies_builder = DependenciesBuilder::new(root_logger.clone(), config);
        let manager = dependencies_builder
            .get_manager()
            .with_context(|| "Dependencies Builder can not create the module manager")?;
        let databases = dependencies_builder
            .get_tenant_databases()
            .with_context(|| "Dependencies Builder can not open the tenant databases")?;

        for tenant in databases.tenants() {
            let applied = manager.install(&tenant)?;
            info!(root_logger, "DATABASE MIGRATE"; "tenant" => %tenant, "applied" => applied.len());
            println!("{tenant}: {} migration(s) applied", applied.len());
        }

        Ok(())
    }
}

#[derive(Parser, Debug, Clone)]
pub struct RollbackCommand {
    /// Tenant to uninstall the module from, every configured tenant if not set
    #[clap(long)]
    pub tenant: Option<String>,
}

impl RollbackCommand {
    pub async fn execute(&self, root_logger: Logger, config: Configuration) -> StdResult<()> {
        let mut dependencies_builder = DependenciesBuilder::new(root_logger.clone(), config);
        let manager = dependencies_builder
            .get_manager()
            .with_context(|| "Dependencies Builder can not create the module manager")?;
        let tenants = match &self.tenant {
            Some(name) => vec![Tenant::new(name.as_str())],
            None => dependencies_builder
                .get_tenant_databases()
                .with_context(|| "Dependencies Builder can not open the tenant databases")?
                .tenants(),
        };

        for tenant in tenants {
            let reverted = manager.uninstall(&tenant)?;
            info!(root_logger, "DATABASE ROLLBACK"; "tenant" => %tenant, "reverted" => reverted.len());
            println!("{tenant}: {} migration(s) reverted", reverted.len());
        }

        Ok(())
    }
}
