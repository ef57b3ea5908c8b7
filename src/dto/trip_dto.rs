//! DTOs de Trip
//!
//! Requests y responses para el ciclo de vida de trips, planes de ruta
//! y comparaciones real-vs-plan.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::trip::Trip;
use crate::models::trip_comparison::TripComparison;
use crate::models::trip_plan::TripPlan;

#[derive(Debug, Deserialize, Validate)]
pub struct StartTripRequest {
    #[validate(length(min = 1, max = 64))]
    pub vin: String,

    pub plan_id: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct EndTripRequest {
    pub trip_id: i64,
}

/// Request para planear una ruta entre dos lugares por nombre
#[derive(Debug, Deserialize, Validate)]
pub struct CreateTripPlanRequest {
    #[validate(length(min = 2, max = 200))]
    pub origin_place: String,

    #[validate(length(min = 2, max = 200))]
    pub destination_place: String,
}

#[derive(Debug, Serialize)]
pub struct TripResponse {
    pub trip_id: i64,
    pub vin: String,
    pub plan_id: Option<i64>,
    pub start_time: String,
    pub end_time: Option<String>,
    pub origin_lat: f64,
    pub origin_lon: f64,
    pub destination_lat: Option<f64>,
    pub destination_lon: Option<f64>,
    pub distance_km: Option<f64>,
    pub duration_minutes: Option<f64>,
    pub status: String,
}

impl From<Trip> for TripResponse {
    fn from(trip: Trip) -> Self {
        let duration_minutes = trip.duration_minutes();
        Self {
            trip_id: trip.trip_id,
            vin: trip.vin,
            plan_id: trip.plan_id,
            start_time: trip.start_time.to_rfc3339(),
            end_time: trip.end_time.map(|t| t.to_rfc3339()),
            origin_lat: trip.origin_lat,
            origin_lon: trip.origin_lon,
            destination_lat: trip.destination_lat,
            destination_lon: trip.destination_lon,
            distance_km: trip.distance_km,
            duration_minutes,
            status: trip.status,
        }
    }
}

/// Response de trip/end: el trip cerrado más la comparación contra
/// el plan, cuando el trip se inició con uno
#[derive(Debug, Serialize)]
pub struct EndTripResponse {
    pub trip: TripResponse,
    pub comparison: Option<TripComparisonResponse>,
}

#[derive(Debug, Serialize)]
pub struct TripPlanResponse {
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
}

impl From<TripPlan> for TripPlanResponse {
    fn from(plan: TripPlan) -> Self {
        Self {
            plan_id: plan.plan_id,
            origin_name: plan.origin_name,
            destination_name: plan.destination_name,
            origin_lat: plan.origin_lat,
            origin_lon: plan.origin_lon,
            destination_lat: plan.destination_lat,
            destination_lon: plan.destination_lon,
            expected_distance_km: plan.expected_distance_km,
            expected_duration_minutes: plan.expected_duration_minutes,
            expected_avg_speed_kmh: plan.expected_avg_speed_kmh,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct TripComparisonResponse {
    pub trip_id: i64,
    pub expected_distance_km: f64,
    pub actual_distance_km: f64,
    pub expected_time_minutes: f64,
    pub actual_time_minutes: f64,
    pub expected_avg_speed_kmh: f64,
    pub actual_avg_speed_kmh: f64,
    pub efficiency_percent: f64,
}

impl From<TripComparison> for TripComparisonResponse {
    fn from(cmp: TripComparison) -> Self {
        Self {
            trip_id: cmp.trip_id,
            expected_distance_km: cmp.expected_distance_km,
            actual_distance_km: cmp.actual_distance_km,
            expected_time_minutes: cmp.expected_time_minutes,
            actual_time_minutes: cmp.actual_time_minutes,
            expected_avg_speed_kmh: cmp.expected_avg_speed_kmh,
            actual_avg_speed_kmh: cmp.actual_avg_speed_kmh,
            efficiency_percent: cmp.efficiency_percent,
        }
    }
}
