//! DTOs de Truck
//!
//! Requests y responses de la API para camiones, más el envelope
//! genérico ApiResponse usado por el resto de los recursos.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::truck::Truck;

/// Envelope genérico de respuesta de la API
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub message: Option<String>,
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            message: None,
            data: Some(data),
        }
    }

    pub fn success_with_message(data: T, message: String) -> Self {
        Self {
            success: true,
            message: Some(message),
            data: Some(data),
        }
    }
}

/// Request para registrar un camión explícitamente
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterTruckRequest {
    #[validate(length(min = 1, max = 64))]
    pub vin: String,

    pub driver_id: Option<i32>,

    #[validate(length(min = 1, max = 100))]
    pub model: Option<String>,

    #[validate(length(min = 2, max = 20))]
    pub license_plate: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct TruckResponse {
    pub vin: String,
    pub driver_id: Option<i32>,
    pub model: Option<String>,
    pub license_plate: Option<String>,
    pub created_at: String,
}

impl From<Truck> for TruckResponse {
    fn from(truck: Truck) -> Self {
        Self {
            vin: truck.vin,
            driver_id: truck.driver_id,
            model: truck.model,
            license_plate: truck.license_plate,
            created_at: truck.created_at.to_rfc3339(),
        }
    }
}

/// Response con la última posición conocida de un camión
#[derive(Debug, Serialize)]
pub struct LocationResponse {
    pub vin: String,
    pub trip_id: Option<i64>,
    pub timestamp: String,
    pub latitude: f64,
    pub longitude: f64,
    pub speed: f64,
}

impl From<crate::models::location_log::LocationLog> for LocationResponse {
    fn from(log: crate::models::location_log::LocationLog) -> Self {
        Self {
            vin: log.vin,
            trip_id: log.trip_id,
            timestamp: log.timestamp.to_rfc3339(),
            latitude: log.latitude,
            longitude: log.longitude,
            speed: log.speed,
        }
    }
}

/// Response con las estadísticas acumuladas de un camión
#[derive(Debug, Serialize)]
pub struct TruckStatsResponse {
    pub vin: String,
    pub total_trips: i64,
    pub total_distance_km: f64,
    pub total_duration_minutes: f64,
    pub avg_distance_per_trip_km: f64,
    pub avg_speed_kmh: f64,
    pub last_updated: String,
}

impl From<crate::models::truck_stats::TruckStats> for TruckStatsResponse {
    fn from(stats: crate::models::truck_stats::TruckStats) -> Self {
        Self {
            vin: stats.vin,
            total_trips: stats.total_trips,
            total_distance_km: stats.total_distance_km,
            total_duration_minutes: stats.total_duration_minutes,
            avg_distance_per_trip_km: stats.avg_distance_per_trip_km,
            avg_speed_kmh: stats.avg_speed_kmh,
            last_updated: stats.last_updated.to_rfc3339(),
        }
    }
}
