use std::net::IpAddr;

use anyhow::{Context, anyhow};
use clap::Parser;
use config::builder::{ConfigBuilder, DefaultState};
use config::{Map, Source, Value, ValueKind};
use slog::{Logger, crit, debug, info};
use tokio::sync::oneshot;
use tokio::task::JoinSet;

use mymodule_common::StdResult;

use crate::Configuration;
use crate::dependency_injection::DependenciesBuilder;

/// Server runtime mode
#[derive(Parser, Debug, Clone)]
pub struct ServeCommand {
    /// Server listening IP
    #[clap(long)]
    pub server_ip: Option<String>,

    /// Server TCP port
    #[clap(long)]
    pub server_port: Option<u16>,
}

impl Source for ServeCommand {
    fn clone_into_box(&self) -> Box<dyn Source + Send + Sync> {
        Box::new(self.clone())
    }

    fn collect(&self) -> Result<Map<String, Value>, config::ConfigError> {
        let mut result = Map::new();
        let namespace = "clap arguments".to_string();

        if let Some(server_ip) = self.server_ip.clone() {
            result.insert(
                "server_ip".to_string(),
                Value::new(Some(&namespace), ValueKind::from(server_ip)),
            );
        }
        if let Some(server_port) = self.server_port {
            result.insert(
                "server_port".to_string(),
                Value::new(Some(&namespace), ValueKind::from(server_port)),
            );
        }

        Ok(result)
    }
}

impl ServeCommand {
    pub async fn execute(
        &self,
        root_logger: Logger,
        mut config_builder: ConfigBuilder<DefaultState>,
    ) -> StdResult<()> {
        config_builder = config_builder.add_source(self.clone());
        let config: Configuration = config_builder
            .build()
            .with_context(|| "configuration build error")?
            .try_deserialize()
            .with_context(|| "configuration deserialize error")?;
        debug!(root_logger, "SERVE command"; "config" => format!("{config:?}"));
        let server_ip = config
            .server_ip
            .parse::<IpAddr>()
            .with_context(|| format!("Invalid server IP: '{}'", config.server_ip))?;
        let server_port = config.server_port;
        let mut dependencies_builder = DependenciesBuilder::new(root_logger.clone(), config);

        // install the module before accepting requests
        let manager = dependencies_builder
            .get_manager()
            .with_context(|| "Dependencies Builder can not create the module manager")?;
        manager
            .install_all()
            .with_context(|| "Could not install the module for the configured tenants")?;

        println!("Starting server...");
        println!("Press Ctrl+C to stop");

        let (shutdown_tx, shutdown_rx) = oneshot::channel();
        let routes = dependencies_builder
            .create_http_routes()
            .with_context(|| "Dependencies Builder can not create http routes")?;
        let mut join_set: JoinSet<StdResult<()>> = JoinSet::new();
        join_set.spawn(async move {
            let (address, server) = warp::serve(routes).bind_with_graceful_shutdown(
                (server_ip, server_port),
                async {
                    shutdown_rx.await.ok();
                },
            );
            println!("Server listening on {address}");
            server.await;

            Ok(())
        });
        join_set.spawn(async { tokio::signal::ctrl_c().await.map_err(|e| anyhow!(e)) });

        if let Some(Err(e)) = join_set
            .join_next()
            .await
            .transpose()
            .with_context(|| "A server task panicked")?
        {
            crit!(root_logger, "A critical error occurred"; "error" => ?e);
        }

        // stop the server
        let _ = shutdown_tx.send(());
        join_set.shutdown().await;
        info!(root_logger, "Server stopped");
        println!("Services stopped, exiting.");

        Ok(())
    }
}
