// ABOUTME: Entry point for the base64-gate binary.
// ABOUTME: Loads .env and environment configuration, initializes tracing, and runs the server or prints the OpenAPI document.

use std::net::IpAddr;

use base64_gate_server::ServerConfig;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "base64-gate", version)]
#[command(about = "Base64 encode/decode HTTP API gated by a shared API key", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP server (default)
    Serve {
        /// Listen port, overrides PORT
        #[arg(short, long)]
        port: Option<u16>,

        /// Bind address, overrides HOST
        #[arg(long)]
        host: Option<IpAddr>,
    },

    /// Print the OpenAPI document as JSON and exit
    Openapi,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env file is fine; real environment variables still apply.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                tracing_subscriber::EnvFilter::new(
                    "base64_gate=debug,base64_gate_server=debug,tower_http=debug",
                )
            }),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let mut config = ServerConfig::from_env()?;

    match cli.command.unwrap_or(Commands::Serve {
        port: None,
        host: None,
    }) {
        Commands::Serve { port, host } => {
            if let Some(port) = port {
                config.bind.set_port(port);
            }
            if let Some(host) = host {
                config.bind.set_ip(host);
            }

            tracing::info!(version = env!("CARGO_PKG_VERSION"), "base64-gate starting up");
            base64_gate_server::run(config).await?;
        }
        Commands::Openapi => {
            let doc = base64_gate_server::docs::build_openapi(&config.public_base_url());
            println!("{}", serde_json::to_string_pretty(&doc)?);
        }
    }

    Ok(())
}
