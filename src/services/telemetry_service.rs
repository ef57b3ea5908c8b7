//! Ingesta de telemetría
//!
//! Pipeline del feed MQTT: decodificar el payload crudo, resolver el
//! camión (auto-registro en primer avistamiento), registrar el fix
//! vinculado al trip activo si lo hay, y publicar el evento en vivo.
//! Ningún error de este camino es fatal para el proceso: un evento malo
//! se descarta con diagnóstico y el siguiente se procesa normalmente.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::json;
use sqlx::PgPool;
use thiserror::Error;

use crate::config::EnvironmentConfig;
use crate::repositories::location_repository::LocationRepository;
use crate::repositories::trip_repository::TripRepository;
use crate::repositories::truck_repository::TruckRepository;
use crate::services::broadcast_service::BroadcastHub;
use crate::utils::errors::AppError;
use crate::utils::geo;

/// Tag de mensaje aceptado; cualquier otro _type se ignora en silencio
pub const LOCATION_MESSAGE_TYPE: &str = "location";

/// Evento de posición validado
#[derive(Debug, Clone, PartialEq)]
pub struct TelemetryEvent {
    pub device_id: String,
    pub latitude: f64,
    pub longitude: f64,
    pub timestamp: DateTime<Utc>,
    pub speed: f64,
}

#[derive(Error, Debug)]
pub enum DecodeError {
    #[error("malformed payload: {0}")]
    Malformed(String),

    #[error("missing or invalid field: {0}")]
    Invalid(&'static str),
}

#[derive(Debug, Deserialize)]
struct RawLocationPayload {
    #[serde(rename = "_type")]
    message_type: Option<String>,
    lat: Option<f64>,
    lon: Option<f64>,
    tst: Option<i64>,
    tid: Option<String>,
    vel: Option<f64>,
}

/// Decodificar un payload crudo del feed.
///
/// Ok(None) = mensaje con _type no reconocido (filtro, no falla).
/// Err = payload malformado o campo requerido ausente/inválido; el
/// llamador lo descarta con diagnóstico, nunca lo propaga.
pub fn decode_event(payload: &[u8]) -> Result<Option<TelemetryEvent>, DecodeError> {
    let raw: RawLocationPayload = serde_json::from_slice(payload)
        .map_err(|e| DecodeError::Malformed(e.to_string()))?;

    if raw.message_type.as_deref() != Some(LOCATION_MESSAGE_TYPE) {
        return Ok(None);
    }

    let latitude = raw.lat.ok_or(DecodeError::Invalid("lat"))?;
    let longitude = raw.lon.ok_or(DecodeError::Invalid("lon"))?;
    let tst = raw.tst.ok_or(DecodeError::Invalid("tst"))?;
    let device_id = raw.tid.ok_or(DecodeError::Invalid("tid"))?;

    if !geo::is_valid_coordinate(latitude, longitude) {
        return Err(DecodeError::Invalid("coordinates"));
    }

    let timestamp =
        DateTime::<Utc>::from_timestamp(tst, 0).ok_or(DecodeError::Invalid("tst"))?;

    Ok(Some(TelemetryEvent {
        device_id,
        latitude,
        longitude,
        timestamp,
        speed: raw.vel.unwrap_or(0.0),
    }))
}

/// Política configurable de frescura de eventos (default: apagada)
#[derive(Debug, Clone)]
pub struct StalenessPolicy {
    pub enabled: bool,
    pub window_secs: i64,
}

impl StalenessPolicy {
    pub fn from_config(config: &EnvironmentConfig) -> Self {
        Self {
            enabled: config.staleness_filter_enabled,
            window_secs: config.staleness_window_secs,
        }
    }

    pub fn is_stale(&self, event_time: DateTime<Utc>, now: DateTime<Utc>) -> bool {
        self.enabled && (now - event_time).num_seconds() > self.window_secs
    }
}

pub struct TelemetryService {
    pool: PgPool,
    hub: BroadcastHub,
    staleness: StalenessPolicy,
}

impl TelemetryService {
    pub fn new(pool: PgPool, hub: BroadcastHub, config: &EnvironmentConfig) -> Self {
        Self {
            pool,
            hub,
            staleness: StalenessPolicy::from_config(config),
        }
    }

    /// Procesar un payload crudo del feed. Nunca devuelve error: todos
    /// los fallos se registran y el evento se descarta.
    pub async fn handle_payload(&self, payload: &[u8]) {
        let event = match decode_event(payload) {
            Ok(Some(event)) => event,
            Ok(None) => {
                log::debug!("⏭ Mensaje no-location ignorado");
                return;
            }
            Err(e) => {
                log::warn!("⚠️ Payload de telemetría descartado: {}", e);
                return;
            }
        };

        if self.staleness.is_stale(event.timestamp, Utc::now()) {
            log::debug!(
                "⏭ Evento stale descartado para {} ({})",
                event.device_id,
                event.timestamp
            );
            return;
        }

        if let Err(e) = self.ingest(event).await {
            log::error!("💥 Error procesando evento de telemetría: {}", e);
        }
    }

    async fn ingest(&self, event: TelemetryEvent) -> Result<(), AppError> {
        let trucks = TruckRepository::new(self.pool.clone());
        let (truck, created) = trucks.resolve(&event.device_id).await?;
        if created {
            log::info!("🚚 Camión nuevo auto-registrado: {}", truck.vin);
            self.hub.publish(&json!({
                "type": "truck_registered",
                "vin": truck.vin,
                "driver_id": truck.driver_id,
            }));
        }

        let trips = TripRepository::new(self.pool.clone());
        let active_trip_id = trips
            .find_active_by_vin(&event.device_id)
            .await?
            .map(|t| t.trip_id);

        let locations = LocationRepository::new(self.pool.clone());
        let logged = locations
            .append(
                &event.device_id,
                event.timestamp,
                event.latitude,
                event.longitude,
                event.speed,
                active_trip_id,
            )
            .await?;

        match logged {
            Some(log_row) => {
                log::info!(
                    "📍 Posición registrada para {} en {} [Trip: {:?}]",
                    event.device_id,
                    log_row.timestamp,
                    active_trip_id
                );
                self.hub.publish(&json!({
                    "device": event.device_id,
                    "lat": event.latitude,
                    "lon": event.longitude,
                    "timestamp": log_row.timestamp.to_rfc3339(),
                    "speed": event.speed,
                }));
            }
            None => {
                log::debug!(
                    "⏭ Evento duplicado ignorado para {} @ {}",
                    event.device_id,
                    event.timestamp
                );
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_decode_valid_payload() {
        let payload =
            br#"{"_type":"location","lat":12.9,"lon":77.6,"tst":1700000000,"tid":"V1","vel":40.0}"#;
        let event = decode_event(payload).unwrap().unwrap();
        assert_eq!(event.device_id, "V1");
        assert_eq!(event.latitude, 12.9);
        assert_eq!(event.longitude, 77.6);
        assert_eq!(event.speed, 40.0);
        assert_eq!(event.timestamp.timestamp(), 1700000000);
    }

    #[test]
    fn test_decode_speed_defaults_to_zero() {
        let payload = br#"{"_type":"location","lat":12.9,"lon":77.6,"tst":1700000000,"tid":"V1"}"#;
        let event = decode_event(payload).unwrap().unwrap();
        assert_eq!(event.speed, 0.0);
    }

    #[test]
    fn test_decode_ignores_other_message_types() {
        let payload = br#"{"_type":"lwt","tid":"V1"}"#;
        assert!(decode_event(payload).unwrap().is_none());

        let payload = br#"{"lat":12.9,"lon":77.6,"tst":1700000000,"tid":"V1"}"#;
        assert!(decode_event(payload).unwrap().is_none());
    }

    #[test]
    fn test_decode_rejects_missing_required_fields() {
        let payload = br#"{"_type":"location","lat":12.9,"lon":77.6,"tst":1700000000}"#;
        assert!(matches!(
            decode_event(payload),
            Err(DecodeError::Invalid("tid"))
        ));

        let payload = br#"{"_type":"location","lon":77.6,"tst":1700000000,"tid":"V1"}"#;
        assert!(matches!(
            decode_event(payload),
            Err(DecodeError::Invalid("lat"))
        ));
    }

    #[test]
    fn test_decode_rejects_malformed_json() {
        assert!(matches!(
            decode_event(b"not json at all"),
            Err(DecodeError::Malformed(_))
        ));
    }

    #[test]
    fn test_decode_rejects_out_of_range_coordinates() {
        let payload = br#"{"_type":"location","lat":95.0,"lon":77.6,"tst":1700000000,"tid":"V1"}"#;
        assert!(matches!(
            decode_event(payload),
            Err(DecodeError::Invalid("coordinates"))
        ));
    }

    #[test]
    fn test_staleness_policy_disabled_by_default() {
        let policy = StalenessPolicy {
            enabled: false,
            window_secs: 600,
        };
        let now = Utc::now();
        let old = now - Duration::hours(2);
        assert!(!policy.is_stale(old, now));
    }

    #[test]
    fn test_staleness_policy_enabled() {
        let policy = StalenessPolicy {
            enabled: true,
            window_secs: 600,
        };
        let now = Utc::now();
        assert!(policy.is_stale(now - Duration::seconds(601), now));
        assert!(!policy.is_stale(now - Duration::seconds(599), now));
        assert!(!policy.is_stale(now, now));
    }
}
