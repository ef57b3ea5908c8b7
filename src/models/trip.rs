//! Modelo de Trip
//!
//! Intervalo acotado de operación de un camión. Solo el TripService
//! muta status/end_time; un trip completado es inmutable. A lo sumo
//! un trip activo por camión (índice único parcial uq_trip_active_vin).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

pub const STATUS_ACTIVE: &str = "active";
pub const STATUS_COMPLETED: &str = "completed";

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Trip {
    pub trip_id: i64,
    pub vin: String,
    pub plan_id: Option<i64>,
    pub start_time: DateTime<Utc>,
    pub end_time: Option<DateTime<Utc>>,
    pub origin_lat: f64,
    pub origin_lon: f64,
    pub destination_lat: Option<f64>,
    pub destination_lon: Option<f64>,
    pub distance_km: Option<f64>,
    pub status: String,
}

impl Trip {
    pub fn is_active(&self) -> bool {
        self.status == STATUS_ACTIVE
    }

    /// Duración en minutos, disponible solo para trips cerrados
    pub fn duration_minutes(&self) -> Option<f64> {
        self.end_time
            .map(|end| (end - self.start_time).num_seconds() as f64 / 60.0)
    }
}
