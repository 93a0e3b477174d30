//! DocuWare Document Forwarder
//!
//! Accepts a member document upload as JSON and forwards it to DocuWare as
//! multipart/form-data under the caller's Basic credentials.
//!
//! # Architecture Overview
//!
//! ```text
//!     Client                    ┌──────────────────────────────────────────────┐
//!     POST /api/v1/upload-      │               DOCUMENT FORWARDER              │
//!     diaspora-document         │                                               │
//!     ──────────────────────────┼─▶ http ──▶ upload ──▶ upload ──▶ docuware ────┼──▶ DocuWare
//!                               │  server   validation    form      client      │    Platform
//!     ◀─────────────────────────┼── UploadResult ◀─────────────────────────────┼───
//!                               │                                               │
//!                               │  config · observability · lifecycle · error   │
//!                               └──────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tokio::net::TcpListener;

use docuware_forwarder::config::load_config;
use docuware_forwarder::lifecycle::{signals, Shutdown};
use docuware_forwarder::observability::init_logging;
use docuware_forwarder::{DocuWareClient, HttpServer};

#[derive(Parser)]
#[command(name = "docuware-forwarder", version)]
#[command(about = "Forwards member documents to DocuWare", long_about = None)]
struct Args {
    /// Optional TOML configuration file.
    #[arg(short, long, env = "FORWARDER_CONFIG")]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let config = load_config(args.config.as_deref())?;
    init_logging(&config.observability);

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        config_file = ?args.config,
        "docuware-forwarder starting"
    );
    tracing::info!(
        bind_address = %config.listener.bind_address,
        upstream = %config.upstream.base_url,
        upstream_timeout_secs = config.upstream.timeout_secs,
        require_document = config.upload.require_document,
        require_organization = config.upload.require_organization,
        "Configuration loaded"
    );

    let store = Arc::new(DocuWareClient::new(&config.upstream)?);

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    signals::trigger_on_signal(shutdown.clone());

    let server = HttpServer::new(config, store);
    server.run(listener, shutdown.wait()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
