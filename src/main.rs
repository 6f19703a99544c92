//! Contacts XML server - Main entry point
//!
//! Runs the contacts MCP server over stdio, storing documents in the
//! configured directory.

use anyhow::Result;
use contacts_xml::repositories::{DocumentStore, FsDocumentStore};
use contacts_xml::{Config, ContactValidator, ContactsMcpServer, MetricsTracker};
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Load configuration (also loads .env, which may set LOG_LEVEL)
    let config = Config::from_env();
    let log_level = config
        .as_ref()
        .map(|cfg| cfg.log_level.clone())
        .unwrap_or_else(|_| "error".to_string());

    // Initialize logging (stderr only to avoid polluting stdout/MCP communication)
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let config = match config {
        Ok(cfg) => {
            info!("Configuration loaded successfully");
            cfg
        }
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            return Err(e.into());
        }
    };

    info!(
        "Starting contacts XML server with storage directory: {}",
        config.storage_dir.display()
    );

    // The store handle is built once and injected; nothing else touches the directory.
    let store = match FsDocumentStore::open(&config.storage_dir) {
        Ok(store) => Arc::new(store) as Arc<dyn DocumentStore>,
        Err(e) => {
            error!("Failed to open document store: {}", e);
            return Err(e.into());
        }
    };

    let metrics = MetricsTracker::new();
    let validator = ContactValidator::new(config.name_policy.clone());

    let server = ContactsMcpServer::new(
        store,
        validator,
        config.max_upload_bytes,
        metrics.clone(),
    );

    info!(
        "Name letters: [{}], upload limit: {} bytes",
        config.name_policy.letters(),
        config.max_upload_bytes
    );

    // Run the server (this will block until the server exits)
    info!("Starting MCP server with stdio transport");
    contacts_xml::server::run_server(server).await?;

    info!("{}", metrics.summary());
    info!("Contacts XML server shutdown complete");
    Ok(())
}
