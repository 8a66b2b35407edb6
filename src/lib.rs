//! Bookshop application library
//!
//! Book and order modules plus the bootstrap that wires them into the HTTP
//! server.

pub mod modules;
pub mod utils;

use anyhow::Context;
use bookshop_kernel::{settings::Settings, InitCtx, ModuleRegistry};

/// Build the registry holding every application module
pub fn build_registry(settings: &Settings) -> anyhow::Result<ModuleRegistry> {
    let mut registry = ModuleRegistry::new();
    modules::register_all(&mut registry, settings)?;
    Ok(registry)
}

/// Run the service until Ctrl-C, then stop modules in reverse order
pub async fn run(settings: Settings) -> anyhow::Result<()> {
    let registry = build_registry(&settings)?;
    let ctx = InitCtx {
        settings: &settings,
    };

    registry.init_all(&ctx).await?;
    registry.start_all(&ctx).await?;

    let served = bookshop_http::start_server(&registry, &settings, shutdown_signal()).await;

    registry
        .stop_all()
        .await
        .context("failed to stop modules")?;
    served
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => tracing::info!("shutdown signal received"),
        Err(error) => {
            tracing::error!(%error, "unable to listen for shutdown signal");
            std::future::pending::<()>().await;
        }
    }
}
