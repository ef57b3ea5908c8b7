//! Modelo de Driver
//!
//! Conductor asignado a un camión. Se crea explícitamente vía registro
//! o como placeholder cuando un camión desconocido reporta telemetría.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Driver principal - mapea a la tabla drivers
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Driver {
    pub driver_id: i32,
    pub name: String,
    pub license_number: Option<String>,
    pub contact: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Datos del conductor placeholder que se crea al auto-registrar un camión
pub const PLACEHOLDER_DRIVER_NAME: &str = "OwnTracks";
pub const PLACEHOLDER_DRIVER_LICENSE: &str = "OWN123";
pub const PLACEHOLDER_DRIVER_CONTACT: &str = "0000000000";
