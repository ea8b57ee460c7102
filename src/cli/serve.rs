use tablegate::db::Database;
use tablegate::error::Result;
use tablegate::schema::Gateway;

use axum::{routing::get, routing::post, Json, Router};
use serde::Deserialize;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::CorsLayer;

/// Run the serve command to start the GraphQL gateway
pub async fn run(config_path: String, port: Option<u16>) -> Result<()> {
    tracing::info!("📖 Loading configuration from {}", config_path);

    let config = tablegate::config::load_config(&config_path)?;
    let server_port = port.unwrap_or(config.server.port);

    let db = Database::connect(&config.database).await?;

    tracing::info!("🔧 Serving {} entities:", config.entity.len());
    for entity in &config.entity {
        tracing::info!("   • {} (table `{}`)", entity.name, entity.table);
    }

    let gateway = Arc::new(Gateway::new(db, config.entity));

    tracing::info!(
        "🚀 GraphQL gateway running on http://{}:{}/graphql",
        config.server.bind,
        server_port
    );
    tracing::info!("💡 Press Ctrl+C to stop the server");

    start_http_server(gateway, &config.server.bind, server_port).await
}

async fn start_http_server(gateway: Arc<Gateway>, bind: &str, port: u16) -> Result<()> {
    let app = Router::new()
        .route("/graphql", post(graphql_handler))
        .route("/health", get(health_check))
        .with_state(gateway)
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("{}:{}", bind, port).parse().map_err(|e| {
        tablegate::error::TablegateError::Config(format!("Invalid bind address: {}", e))
    })?;

    let listener = tokio::net::TcpListener::bind(addr).await.map_err(|e| {
        tablegate::error::TablegateError::Config(format!(
            "Failed to bind to port {}: {}. Port may be in use.",
            port, e
        ))
    })?;

    axum::serve(listener, app)
        .await
        .map_err(|e| tablegate::error::TablegateError::Config(format!("Server error: {}", e)))?;

    Ok(())
}

#[derive(Deserialize)]
struct QueryRequest {
    query: String,
}

/// Resolve one request. The response is always 200 with either the data
/// object or an error message string in the body.
async fn graphql_handler(
    axum::extract::State(gateway): axum::extract::State<Arc<Gateway>>,
    Json(request): Json<QueryRequest>,
) -> Json<serde_json::Value> {
    match gateway.execute(&request.query).await {
        Ok(response) => {
            if response.errors.is_empty() {
                Json(serde_json::json!({ "data": response.data }))
            } else {
                let message = response
                    .errors
                    .iter()
                    .map(|error| error.message.clone())
                    .collect::<Vec<_>>()
                    .join("; ");
                Json(serde_json::json!({ "error": message }))
            }
        }
        Err(error) => Json(serde_json::json!({ "error": error.to_string() })),
    }
}

async fn health_check() -> &'static str {
    "OK"
}
