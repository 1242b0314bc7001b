//! CLI argument definitions using clap

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "cert-warden")]
#[command(version)]
#[command(about = "TLS certificate inspection, expiry alerting and notification service", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to a TOML configuration file
    #[arg(short, long, global = true, value_name = "FILE", env = "CERT_WARDEN_CONFIG")]
    pub config: Option<PathBuf>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fetch and inspect the certificate of a host
    Scan(ScanArgs),

    /// Run the HTTP API
    Serve(ServeArgs),

    /// Send a test e-mail through the configured SMTP server
    SendTestEmail(SendTestEmailArgs),
}

#[derive(Args, Debug)]
pub struct ScanArgs {
    /// Host, `host:port` or URL to scan
    #[arg(value_name = "HOST")]
    pub host: String,

    /// Port (default: from config, 443)
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Connect and handshake timeout in seconds
    #[arg(short, long)]
    pub timeout: Option<u64>,

    /// Print JSON instead of a table
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct ServeArgs {
    /// Address to bind, e.g. 0.0.0.0:5000
    #[arg(short, long, value_name = "ADDR")]
    pub bind: Option<String>,
}

#[derive(Args, Debug)]
pub struct SendTestEmailArgs {
    /// Recipient address
    #[arg(value_name = "TO")]
    pub to: String,

    /// Subject line
    #[arg(long)]
    pub subject: Option<String>,

    /// Message body
    #[arg(long)]
    pub body: Option<String>,
}
