//! Server entry-point: wires storage adapters, REST endpoints, and OpenAPI docs.

use std::sync::Arc;

use actix_web::{App, HttpServer, web};
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

#[cfg(debug_assertions)]
use rentledger::ApiDoc;
use rentledger::domain::PortionService;
use rentledger::inbound::http;
use rentledger::inbound::http::health::{HealthState, live, ready};
use rentledger::inbound::http::state::HttpState;
use rentledger::outbound::{FsAttachmentStore, JsonDocumentStore};
use rentledger::server::ServerConfig;

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let config = ServerConfig::parse();
    std::fs::create_dir_all(&config.data_dir)?;

    let store = Arc::new(JsonDocumentStore::new(config.database_path()));
    let attachments = Arc::new(FsAttachmentStore::new(&config.uploads_dir())?);
    let service = Arc::new(PortionService::new(store, attachments.clone()));
    let state = HttpState::new(service.clone(), service, attachments);

    let health_state = web::Data::new(HealthState::new());
    // Clone for the server factory so the probes stay reachable here.
    let server_health_state = health_state.clone();
    let server = HttpServer::new(move || {
        let mut app = App::new()
            .app_data(web::Data::new(state.clone()))
            .app_data(server_health_state.clone())
            .service(web::scope("/api/v1").configure(http::api))
            .service(web::scope("/uploads").configure(http::uploads))
            .service(ready)
            .service(live);

        #[cfg(debug_assertions)]
        {
            app = app
                .service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));
        }

        app
    })
    .disable_signals()
    .bind(config.bind)?;

    info!(bind = %config.bind, data_dir = %config.data_dir.display(), "rentledger listening");
    health_state.mark_ready();

    let server = server.run();
    let server_handle = server.handle();
    let drain_state = health_state.clone();
    // Fail the liveness probe before the listener stops accepting, so load
    // balancers route away during the drain.
    actix_web::rt::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("shutdown signal received, draining");
            drain_state.mark_unhealthy();
            server_handle.stop(true).await;
        }
    });
    server.await
}
