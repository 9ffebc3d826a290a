//! HTTP server facade for biblio with Axum, error handling, and OpenAPI support.

use anyhow::Context;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::json;

use biblio_db::Db;
use biblio_kernel::settings::Settings;
use biblio_kernel::{InitCtx, ModuleRegistry};

pub mod error;
pub mod extract;
pub mod response;
pub mod router;

use router::RouterBuilder;

/// Start the HTTP server with the given module registry
pub async fn start_server(
    registry: &ModuleRegistry,
    settings: &Settings,
    db: &Db,
) -> anyhow::Result<()> {
    tracing::info!(
        "starting HTTP server on {}:{}",
        settings.server.host,
        settings.server.port
    );

    let app = build_router(registry, settings, db);

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
        .await
        .context("HTTP server failed")?;

    Ok(())
}

/// Build the main HTTP router with all module routes mounted
pub fn build_router(registry: &ModuleRegistry, settings: &Settings, db: &Db) -> Router {
    let ctx = InitCtx { settings, db };

    let mut router_builder = RouterBuilder::new();

    // Global middlewares
    router_builder = router_builder
        .with_tracing()
        .with_cors()
        .with_request_id()
        .with_timeout(settings.server.request_timeout_ms);

    // Liveness route
    router_builder = router_builder.route("/", get(root));

    // Mount module routes
    for module in registry.modules() {
        router_builder = router_builder.mount_module(module.name(), module.routes(&ctx));
    }

    // OpenAPI documentation
    router_builder = router_builder.with_openapi(registry);

    router_builder.build()
}

/// Liveness endpoint
async fn root() -> Json<serde_json::Value> {
    Json(json!({"message": "biblio books API is online"}))
}
