//! cert-warden - TLS certificate inspection and expiry alerting
//!
//! Scans a host from the command line, sends a test e-mail, or serves the
//! HTTP API.

use cert_warden::cli::{commands, Cli, Commands};
use cert_warden::config;
use clap::Parser;
use console::style;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    // lettre builds its TLS config from the process-wide provider
    let _ = rustls::crypto::ring::default_provider().install_default();

    let cli = Cli::parse();

    let default_filter = if cli.verbose { "info" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_target(false)
        .init();

    match run(cli).await {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(e) => {
            eprintln!("{} {:#}", style("Error:").red().bold(), e);
            std::process::exit(1);
        }
    }
}

/// Dispatch the subcommand; `Ok(false)` means it ran but did not succeed
async fn run(cli: Cli) -> anyhow::Result<bool> {
    if cli.no_color {
        console::set_colors_enabled(false);
        console::set_colors_enabled_stderr(false);
    }

    let settings = config::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Scan(args) => commands::run_scan(&settings, &args, cli.verbose).await,
        Commands::Serve(args) => commands::run_serve(settings, &args).await.map(|_| true),
        Commands::SendTestEmail(args) => commands::run_send_test_email(&settings, &args)
            .await
            .map(|_| true),
    }
}
