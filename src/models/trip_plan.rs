//! Modelo de TripPlan
//!
//! Ruta esperada pre-calculada (distancia/duración/velocidad) para un
//! trip prospectivo. Inmutable después de su creación.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct TripPlan {
    pub plan_id: i64,
    pub origin_name: String,
    pub destination_name: String,
    pub origin_lat: f64,
    pub origin_lon: f64,
    pub destination_lat: f64,
    pub destination_lon: f64,
    pub expected_distance_km: f64,
    pub expected_duration_minutes: f64,
    pub expected_avg_speed_kmh: f64,
    pub created_at: DateTime<Utc>,
}

impl TripPlan {
    /// Velocidad media esperada a partir de distancia y duración
    pub fn expected_speed_from(distance_km: f64, duration_minutes: f64) -> f64 {
        if duration_minutes <= 0.0 {
            return 0.0;
        }
        distance_km / (duration_minutes / 60.0)
    }
}
