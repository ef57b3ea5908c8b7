//! Modelo de Truck
//!
//! Camión identificado por su VIN. Se crea de forma lazy en el primer
//! evento de telemetría de un dispositivo desconocido, o explícitamente
//! vía registro. Nunca se borra durante operación normal.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Truck {
    pub vin: String,
    pub driver_id: Option<i32>,
    pub model: Option<String>,
    pub license_plate: Option<String>,
    pub created_at: DateTime<Utc>,
}
