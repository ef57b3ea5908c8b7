mod clients;
mod config;
mod controllers;
mod database;
mod dto;
mod middleware;
mod models;
mod repositories;
mod routes;
mod services;
mod state;
mod utils;

use anyhow::Result;
use axum::{response::Json, routing::get, Router};
use serde_json::json;
use std::net::SocketAddr;
use tokio::signal;
use tracing::{error, info};
use dotenvy::dotenv;

use clients::mqtt_listener::MqttListener;
use config::environment::EnvironmentConfig;
use database::DatabaseConnection;
use middleware::cors::cors_middleware;
use services::broadcast_service::BroadcastHub;
use services::telemetry_service::TelemetryService;
use state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenv().ok();

    let config = EnvironmentConfig::default();

    // Configurar logging
    let log_level = if config.is_development() {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt().with_max_level(log_level).init();

    info!("🚚 Fleet Tracking - Telemetría GPS en vivo");
    info!("==========================================");

    // Inicializar base de datos
    let db_connection = match DatabaseConnection::new_default().await {
        Ok(conn) => conn,
        Err(e) => {
            error!("❌ Error conectando a la base de datos: {}", e);
            return Err(anyhow::anyhow!("Error de base de datos: {}", e));
        }
    };
    let pool = db_connection.pool().clone();

    // Hub de broadcast hacia los WebSockets
    let hub = BroadcastHub::new(config.broadcast_buffer);

    // Consumidor MQTT en background
    let telemetry_service = TelemetryService::new(pool.clone(), hub.clone(), &config);
    let _mqtt_handle = MqttListener::new(&config, telemetry_service).spawn();

    // Crear router de la API
    let app_state = AppState::new(pool, config.clone(), hub);

    let app = Router::new()
        .route("/health", get(health_endpoint))
        .nest("/api/truck", routes::truck_routes::create_truck_router())
        .nest("/api/driver", routes::driver_routes::create_driver_router())
        .nest("/api/trip", routes::trip_routes::create_trip_router())
        .nest("/ws", routes::ws_routes::create_ws_router())
        .layer(cors_middleware())
        .with_state(app_state);

    let addr: SocketAddr = config.server_url().parse()?;

    info!("🌐 Servidor iniciando en http://{}", addr);
    info!("🔍 Endpoints disponibles:");
    info!("   GET  /health - Health check");
    info!("🚛 Endpoints - Truck:");
    info!("   POST /api/truck - Registrar camión");
    info!("   GET  /api/truck - Listar camiones");
    info!("   GET  /api/truck/:vin - Obtener camión");
    info!("   GET  /api/truck/:vin/location - Última posición");
    info!("   GET  /api/truck/:vin/stats - Estadísticas acumuladas");
    info!("🧑 Endpoints - Driver:");
    info!("   POST /api/driver - Registrar conductor");
    info!("   GET  /api/driver/:id - Obtener conductor");
    info!("🛣 Endpoints - Trip:");
    info!("   POST /api/trip/start - Iniciar trip");
    info!("   POST /api/trip/end - Finalizar trip");
    info!("   POST /api/trip/plan - Crear plan de ruta");
    info!("   GET  /api/trip/:id - Obtener trip");
    info!("   GET  /api/trip/:id/route - Ruta recorrida");
    info!("   GET  /api/trip/:id/comparison - Comparación real vs plan");
    info!("📡 Feed en vivo:");
    info!("   GET  /ws/location - WebSocket de posiciones y eventos");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| {
            error!("❌ Error del servidor: {}", e);
            e
        })?;

    info!("👋 Servidor terminado");
    Ok(())
}

/// Health check simple
async fn health_endpoint() -> Json<serde_json::Value> {
    Json(json!({
        "service": "fleet-tracking",
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

/// Señal de apagado graceful
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("🛑 Señal Ctrl+C recibida, apagando servidor...");
        },
        _ = terminate => {
            info!("🛑 Señal de terminación recibida, apagando servidor...");
        },
    }
}
