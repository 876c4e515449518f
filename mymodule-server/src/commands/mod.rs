mod database_command;
mod serve_command;

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use config::{Map, Source, Value};
use slog::{Drain, Level, Logger, debug};

use mymodule_common::StdResult;

use crate::DefaultConfiguration;

/// Main command selector
#[derive(Debug, Clone, Subcommand)]
pub enum MainCommand {
    /// Database tools
    #[clap(subcommand)]
    Database(database_command::DatabaseSubCommand),

    /// Install the module for every tenant then serve its HTTP API
    Serve(serve_command::ServeCommand),
}

impl Source for MainCommand {
    fn clone_into_box(&self) -> Box<dyn Source + Send + Sync> {
        Box::new(self.clone())
    }

    fn collect(&self) -> Result<Map<String, Value>, config::ConfigError> {
        match self {
            Self::Database(_) => Ok(Map::new()),
            Self::Serve(cmd) => cmd.collect(),
        }
    }
}

impl MainCommand {
    /// Execute the selected command with the given configuration sources
    pub async fn execute(
        &self,
        root_logger: Logger,
        config_builder: config::builder::ConfigBuilder<config::builder::DefaultState>,
    ) -> StdResult<()> {
        match self {
            Self::Database(cmd) => cmd.execute(root_logger, config_builder).await,
            Self::Serve(cmd) => cmd.execute(root_logger, config_builder).await,
        }
    }
}

/// Main application command line parameters
#[derive(Parser, Debug, Clone)]
#[command(version)]
pub struct MainOpts {
    /// application main command
    #[clap(subcommand)]
    pub command: MainCommand,

    /// Run Mode
    #[clap(short, long, env = "RUN_MODE", default_value = "dev")]
    pub run_mode: String,

    /// Verbosity level (-v=warning, -vv=info, -vvv=debug)
    #[clap(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Directory of the configuration files
    #[clap(long, default_value = "./config")]
    pub config_directory: PathBuf,
}

impl MainOpts {
    /// Execute the command
    pub async fn execute(&self, root_logger: Logger) -> StdResult<()> {
        let config_file_path = self
            .config_directory
            .join(format!("{}.json", self.run_mode));
        let config_builder = config::Config::builder()
            .add_source(DefaultConfiguration::default())
            .add_source(
                config::File::with_name(&config_file_path.to_string_lossy()).required(false),
            )
            .add_source(config::Environment::default())
            .add_source(self.command.clone());
        debug!(root_logger, "Started"; "run_mode" => &self.run_mode, "config_file" => %config_file_path.display());

        self.command.execute(root_logger, config_builder).await
    }

    /// get log level from parameters
    pub fn log_level(&self) -> Level {
        match self.verbose {
            0 => Level::Warning,
            1 => Level::Info,
            2 => Level::Debug,
            _ => Level::Trace,
        }
    }

    /// Build a logger from args.
    pub fn build_logger(&self) -> Logger {
        let drain = slog_bunyan::new(std::io::stdout())
            .set_pretty(false)
            .build()
            .fuse();
        let drain = slog::LevelFilter::new(drain, self.log_level()).fuse();
        let drain = slog_async::Async::new(drain).build().fuse();

        Logger::root(Arc::new(drain), slog::o!())
    }
}
