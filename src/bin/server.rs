//! Entry point for the legacy demo server.
//!
//! Resolves the configuration file, loads it into the global configuration,
//! and hands control to the server run loop.

use std::path::PathBuf;
use std::process;

use clap::Parser;

use renderproof::server;

#[derive(Parser, Debug)]
#[command(
    name = "renderproof-server",
    version,
    about = "Start the renderproof demo web server"
)]
struct Cli {
    /// Configuration file to load, overriding the search precedence
    config_file: Option<PathBuf>,
}

#[tokio::main]
async fn main() {
    env_logger::init();
    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        eprintln!("{}", e);
        process::exit(1);
    }
}

async fn run(cli: Cli) -> renderproof::Result<()> {
    let locations = server::ConfigLocations::discover()?;
    let configfile = server::resolve_config_file(cli.config_file.as_deref(), &locations)?;
    server::update_config(&configfile)?;
    server::start_server().await
}
