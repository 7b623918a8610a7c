//! HTTP server facade for corkboard with Axum, error handling, and OpenAPI support.

use anyhow::Context;
use axum::http::HeaderName;
use axum::routing::get;
use axum::Router;

use corkboard_kernel::settings::Settings;
use corkboard_kernel::ModuleRegistry;

pub mod error;
pub mod identity;
pub mod response;
pub mod router;

use router::RouterBuilder;

/// Start the HTTP server with the given module registry
pub async fn start_server(registry: &ModuleRegistry, settings: &Settings) -> anyhow::Result<()> {
    tracing::info!(
        "starting HTTP server on {}:{}",
        settings.server.host,
        settings.server.port
    );

    let app = build_router(registry, settings).context("failed to build HTTP router")?;

    let listener =
        tokio::net::TcpListener::bind(format!("{}:{}", settings.server.host, settings.server.port))
            .await
            .context("failed to bind to address")?;

    tracing::info!(
        "HTTP server listening on http://{}:{}",
        settings.server.host,
        settings.server.port
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server failed")?;

    Ok(())
}

/// Build the main HTTP router with all module routes mounted
pub fn build_router(registry: &ModuleRegistry, settings: &Settings) -> anyhow::Result<Router> {
    let identity_header = HeaderName::from_bytes(settings.auth.identity_header.as_bytes())
        .with_context(|| {
            format!(
                "invalid identity header name '{}'",
                settings.auth.identity_header
            )
        })?;

    let mut router_builder = RouterBuilder::new();

    // Health check route
    router_builder = router_builder.route("/healthz", get(health_check));

    // Mount module routes
    for module in registry.modules() {
        let module_name = module.name();
        let module_router = module.routes();

        tracing::info!(
            module = module_name,
            "mounting module routes under /v1/{}",
            module_name
        );
        router_builder = router_builder.mount_module(module_name, module_router);
    }

    // OpenAPI documentation
    router_builder = router_builder.with_openapi(registry);

    // Global middlewares, applied after the routes they wrap
    router_builder = router_builder
        .with_tracing()
        .with_cors()
        .with_request_id()
        .with_timeout(settings.server.request_timeout_ms)
        .with_identity_header(identity_header);

    Ok(router_builder.build())
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "ok"
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => tracing::info!("shutdown signal received, draining connections"),
        Err(err) => {
            // Without a signal handler the server simply runs until killed.
            tracing::warn!(%err, "failed to install shutdown signal handler");
            std::future::pending::<()>().await;
        }
    }
}
