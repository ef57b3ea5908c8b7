//! Configuración de variables de entorno
//! 
//! Este módulo maneja la configuración del entorno y variables de configuración.

use std::env;

/// Configuración del entorno
#[derive(Debug, Clone)]
pub struct EnvironmentConfig {
    pub environment: String,
    pub port: u16,
    pub host: String,
    // Broker MQTT del feed de telemetría
    pub mqtt_broker_host: String,
    pub mqtt_broker_port: u16,
    pub mqtt_topic: String,
    pub mqtt_client_id: String,
    // Política de frescura de eventos (toggle, default off)
    pub staleness_filter_enabled: bool,
    pub staleness_window_secs: i64,
    // Capacidad del canal de broadcast hacia los WebSockets
    pub broadcast_buffer: usize,
    // Proveedor externo de geocoding / ruteo
    pub nominatim_url: String,
    pub ors_url: String,
    pub ors_api_key: Option<String>,
}

impl Default for EnvironmentConfig {
    fn default() -> Self {
        Self {
            environment: env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8000".to_string())
                .parse()
                .expect("PORT must be a valid number"),
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            mqtt_broker_host: env::var("MQTT_BROKER_HOST")
                .unwrap_or_else(|_| "broker.mqttdashboard.com".to_string()),
            mqtt_broker_port: env::var("MQTT_BROKER_PORT")
                .unwrap_or_else(|_| "1883".to_string())
                .parse()
                .expect("MQTT_BROKER_PORT must be a valid number"),
            mqtt_topic: env::var("MQTT_TOPIC")
                .unwrap_or_else(|_| "owntracks/fleet/+".to_string()),
            mqtt_client_id: env::var("MQTT_CLIENT_ID")
                .unwrap_or_else(|_| "fleet-tracking-ingest".to_string()),
            staleness_filter_enabled: env::var("STALENESS_FILTER_ENABLED")
                .map(|v| v == "true" || v == "1")
                .unwrap_or(false),
            staleness_window_secs: env::var("STALENESS_WINDOW_SECS")
                .unwrap_or_else(|_| "600".to_string())
                .parse()
                .expect("STALENESS_WINDOW_SECS must be a valid number"),
            broadcast_buffer: env::var("BROADCAST_BUFFER")
                .unwrap_or_else(|_| "256".to_string())
                .parse()
                .expect("BROADCAST_BUFFER must be a valid number"),
            nominatim_url: env::var("NOMINATIM_URL")
                .unwrap_or_else(|_| "https://nominatim.openstreetmap.org/search".to_string()),
            ors_url: env::var("ORS_URL")
                .unwrap_or_else(|_| "https://api.openrouteservice.org/v2/directions/driving-car".to_string()),
            ors_api_key: env::var("ORS_API_KEY").ok(),
        }
    }
}

impl EnvironmentConfig {
    /// Verificar si estamos en modo desarrollo
    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }

    /// Obtener la URL del servidor
    pub fn server_url(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
