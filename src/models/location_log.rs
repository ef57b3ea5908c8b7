//! Modelo de LocationLog
//!
//! Una muestra de posición+velocidad con timestamp para un camión.
//! Inmutable una vez escrita. Unicidad por (vin, timestamp): los eventos
//! duplicados se descartan, no se sobreescriben.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct LocationLog {
    pub log_id: i64,
    pub vin: String,
    pub trip_id: Option<i64>,
    pub timestamp: DateTime<Utc>,
    pub latitude: f64,
    pub longitude: f64,
    pub speed: f64,
}
