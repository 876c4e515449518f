#![doc = include_str!("../README.md")]

use clap::Parser;
use slog::{crit, info};

use mymodule_common::StdResult;
use mymodule_server::MainOpts;

#[tokio::main]
async fn main() -> StdResult<()> {
    // Load args
    let args = MainOpts::parse();
    let root_logger = args.build_logger();
    info!(root_logger, "Starting"; "node_version" => env!("CARGO_PKG_VERSION"));

    let result = args.execute(root_logger.clone()).await;
    if let Err(error) = &result {
        crit!(root_logger, "Application ends abnormally"; "error" => ?error);
        eprintln!("ERROR: application ends abnormally: {error:?}");
    }

    result
}
