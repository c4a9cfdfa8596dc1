mod config;
mod doc;
mod dtos;
mod error;
mod routes;
mod utils;

use crate::{
    config::AppConfig,
    doc::ApiDoc,
    routes::{AppState, api_router, public_router},
    utils::shutdown::shutdown_signal,
};
use database::db::create_connection;
use log::info;
use migration::{Migrator, MigratorTrait};
use std::error::Error;
use tower::ServiceBuilder;
use tower_http::compression::CompressionLayer;
use tower_oauth2_resource_server::server::OAuth2ResourceServer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let config = AppConfig::from_env()?;

    let db = create_connection(&config.database_url, config.db_max_connections).await?;
    Migrator::up(&db, None).await?;
    info!("Database migrations applied");

    let oauth2_resource_server = <OAuth2ResourceServer>::builder()
        .issuer_url(config.oidc_issuer_url.as_str())
        .build()
        .await
        .map_err(|e| format!("Failed to build OAuth2ResourceServer: {e:?}"))?;

    let state = AppState { db };
    let api = api_router(state.clone())
        .layer(ServiceBuilder::new().layer(oauth2_resource_server.into_layer()));

    let app = public_router(state)
        .merge(api)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(CompressionLayer::new());

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    info!("Running axum on http://{}", config.bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}
