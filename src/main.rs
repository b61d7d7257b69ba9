//! therapy-gateway server entry point.
//!
//! Starts the Axum HTTP server over a PostgreSQL-backed store, running
//! pending migrations first.

use std::sync::Arc;
use std::time::Duration;

use sqlx::postgres::PgPoolOptions;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use therapy_gateway::api;
use therapy_gateway::app_state::AppState;
use therapy_gateway::config::GatewayConfig;
use therapy_gateway::dispatch::{BookingDispatcher, HttpWorkflowEngine, WorkflowEngine};
use therapy_gateway::persistence::{PostgresStore, Store};
use therapy_gateway::service::{AppointmentService, ReminderService};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Load configuration
    let config = GatewayConfig::from_env()?;
    tracing::info!(addr = %config.listen_addr, "starting therapy-gateway");

    // Connect to PostgreSQL and run migrations
    let pool = PgPoolOptions::new()
        .max_connections(config.database_max_connections)
        .min_connections(config.database_min_connections)
        .acquire_timeout(Duration::from_secs(config.database_connect_timeout_secs))
        .connect(&config.database_url)
        .await?;
    sqlx::migrate!("./migrations").run(&pool).await?;

    // Build persistence and dispatch layers
    let store: Arc<dyn Store> = Arc::new(PostgresStore::new(
        pool,
        Duration::from_secs(config.booking_timeout_secs),
    ));
    let engine: Option<Arc<dyn WorkflowEngine>> = config
        .workflow_engine_url
        .clone()
        .map(|url| Arc::new(HttpWorkflowEngine::new(url)) as Arc<dyn WorkflowEngine>);
    let dispatcher = BookingDispatcher::new(engine, config.task_queue.clone());
    if dispatcher.is_configured() {
        tracing::info!(queue = %config.task_queue, "workflow engine configured");
    } else {
        tracing::warn!("workflow engine not configured; booking notifications disabled");
    }

    // Build service layer
    let reminder_service = ReminderService::new(Arc::clone(&store));
    let appointment_service = AppointmentService::new(
        Arc::clone(&store),
        dispatcher,
        reminder_service.clone(),
    );

    // Build application state
    let app_state = AppState {
        appointment_service: Arc::new(appointment_service),
        reminder_service: Arc::new(reminder_service),
    };

    // Build router
    let app = api::build_router()
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(app_state);

    // Start server
    let listener = tokio::net::TcpListener::bind(config.listen_addr).await?;
    tracing::info!(addr = %config.listen_addr, "server listening");

    axum::serve(listener, app).await?;

    Ok(())
}
