//! corkboard application library
//!
//! Wires the boards module into the corkboard module system and exposes the
//! bootstrap used by both the server binary and the CLI.

pub mod modules;
pub mod utils;

use corkboard_kernel::settings::Settings;
use corkboard_kernel::{InitCtx, ModuleRegistry};

/// Build the module registry with every application module registered.
pub fn build_registry() -> ModuleRegistry {
    let mut registry = ModuleRegistry::new();
    modules::register_all(&mut registry);
    registry
}

/// Run the full application: module lifecycle plus the HTTP server.
///
/// Returns when the server shuts down; modules are stopped before returning.
pub async fn serve(settings: Settings) -> anyhow::Result<()> {
    tracing::info!(env = ?settings.environment, "corkboard bootstrap starting");

    let registry = build_registry();
    let ctx = InitCtx {
        settings: &settings,
    };

    registry.init_all(&ctx).await?;
    registry.start_all(&ctx).await?;

    tracing::info!("corkboard bootstrap complete");

    let served = corkboard_http::start_server(&registry, &settings).await;

    registry.stop_all().await?;
    served
}
