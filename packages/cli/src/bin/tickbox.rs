// ABOUTME: Entry point for the tickbox server binary
// ABOUTME: Loads .env, applies --host/--port overrides and reports fatal errors

use std::process;

use anyhow::Context;
use clap::Parser;
use colored::*;

use tickbox_cli::{init_tracing, run_server};
use tickbox_config::Config;

#[derive(Parser)]
#[command(name = "tickbox")]
#[command(about = "Tickbox - todo list HTTP API")]
#[command(version)]
struct Cli {
    /// Address to bind (overrides HOST)
    #[arg(long)]
    host: Option<String>,

    /// Port to listen on (overrides PORT)
    #[arg(long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        eprintln!("{} {:#}", "Error:".red().bold(), e);
        process::exit(1);
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    init_tracing();

    let mut config = Config::from_env().context("Invalid configuration")?;

    if let Some(host) = cli.host {
        config.host = host;
    }
    if let Some(port) = cli.port {
        config.port = port;
    }

    run_server(config).await
}
