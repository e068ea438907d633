//! Sensei Hax: an interactive terminal chat with a remote AI tutor.
//!
//! Binary name: `sensei`
//!
//! Loads configuration, sets up logging, builds the configured transport and
//! runs one chat session. Whatever happens, the farewell line is printed last.

mod cli;

use anyhow::Context;
use clap::Parser;
use console::style;
use tokio_util::sync::CancellationToken;

use sensei_infra::config::{
    CONFIG_FILE, config_or_default, read_config, resolve_data_dir, resolve_log_path,
};
use sensei_infra::transport::create_transport;
use sensei_observe::tracing_setup::{
    LoggingOptions, init_tracing, shutdown_tracing, stderr_directive,
};
use sensei_types::config::SenseiConfig;

use cli::Cli;
use cli::chat::loop_runner::{run_chat, spawn_interrupt_listener};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let shutdown = CancellationToken::new();
    let listener = spawn_interrupt_listener(shutdown.clone());

    let data_dir = resolve_data_dir();
    let config_path = data_dir.join(CONFIG_FILE);
    let outcome = read_config(&config_path).await;
    let logging = match &outcome {
        Ok(Some(config)) => config.logging.clone(),
        _ => Default::default(),
    };

    let _guard = match init_tracing(&LoggingOptions {
        stderr_directive: stderr_directive(cli.verbose, cli.quiet).to_string(),
        log_file: Some(resolve_log_path(&data_dir, &logging.file)),
        otel: logging.otel,
    }) {
        Ok(guard) => Some(guard),
        Err(err) => {
            eprintln!("Warning: failed to initialize logging: {err}");
            None
        }
    };

    let config = config_or_default(&config_path, outcome);

    if let Err(err) = chat(&config, &shutdown).await {
        tracing::error!("{err:#}");
    }
    listener.abort();

    println!("{}", style("Exiting the application. Goodbye!").green().bold());
    shutdown_tracing();
    Ok(())
}

async fn chat(config: &SenseiConfig, shutdown: &CancellationToken) -> anyhow::Result<()> {
    println!("{}", style("Initializing Sensei...").blue().bold());
    let transport =
        create_transport(&config.provider).context("Failed to initialize the chat transport")?;

    let end = run_chat(config, transport, shutdown).await;
    tracing::info!(?end, "session finished");
    Ok(())
}
