//! Modelo de TripComparison
//!
//! Comparación uno-a-uno entre un trip completado y su plan de referencia.
//! Se crea (o reemplaza) al cierre del trip.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::trip_plan::TripPlan;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct TripComparison {
    pub trip_id: i64,
    pub expected_distance_km: f64,
    pub actual_distance_km: f64,
    pub expected_time_minutes: f64,
    pub actual_time_minutes: f64,
    pub expected_avg_speed_kmh: f64,
    pub actual_avg_speed_kmh: f64,
    pub efficiency_percent: f64,
    pub created_at: DateTime<Utc>,
}

impl TripComparison {
    /// Calcular la comparación real-vs-plan para un trip cerrado.
    ///
    /// eficiencia = (tiempo esperado / tiempo real) x 100, redondeada a
    /// 2 decimales. Un valor > 100 significa que el trip fue más rápido
    /// que lo planeado y no se recorta. Duración real 0 -> eficiencia 0
    /// y velocidad real 0 (guardia de división por cero).
    pub fn compute(
        trip_id: i64,
        plan: &TripPlan,
        actual_distance_km: f64,
        actual_time_minutes: f64,
        now: DateTime<Utc>,
    ) -> Self {
        let actual_avg_speed_kmh = if actual_time_minutes > 0.0 {
            actual_distance_km / (actual_time_minutes / 60.0)
        } else {
            0.0
        };

        let efficiency_percent = if actual_time_minutes > 0.0 {
            let raw = (plan.expected_duration_minutes / actual_time_minutes) * 100.0;
            (raw * 100.0).round() / 100.0
        } else {
            0.0
        };

        Self {
            trip_id,
            expected_distance_km: plan.expected_distance_km,
            actual_distance_km,
            expected_time_minutes: plan.expected_duration_minutes,
            actual_time_minutes,
            expected_avg_speed_kmh: plan.expected_avg_speed_kmh,
            actual_avg_speed_kmh,
            efficiency_percent,
            created_at: now,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plan(expected_km: f64, expected_min: f64) -> TripPlan {
        TripPlan {
            plan_id: 1,
            origin_name: "Bangalore".to_string(),
            destination_name: "Chennai".to_string(),
            origin_lat: 12.9716,
            origin_lon: 77.5946,
            destination_lat: 13.0827,
            destination_lon: 80.2707,
            expected_distance_km: expected_km,
            expected_duration_minutes: expected_min,
            expected_avg_speed_kmh: TripPlan::expected_speed_from(expected_km, expected_min),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_faster_than_planned_exceeds_100() {
        let cmp = TripComparison::compute(7, &plan(300.0, 240.0), 310.0, 200.0, Utc::now());
        assert_eq!(cmp.efficiency_percent, 120.0);
        assert!((cmp.actual_avg_speed_kmh - 93.0).abs() < 1e-9);
    }

    #[test]
    fn test_slower_than_planned() {
        let cmp = TripComparison::compute(7, &plan(300.0, 240.0), 300.0, 300.0, Utc::now());
        assert_eq!(cmp.efficiency_percent, 80.0);
    }

    #[test]
    fn test_rounding_two_decimals() {
        // 240 / 210 * 100 = 114.2857... -> 114.29
        let cmp = TripComparison::compute(7, &plan(300.0, 240.0), 300.0, 210.0, Utc::now());
        assert_eq!(cmp.efficiency_percent, 114.29);
    }

    #[test]
    fn test_zero_actual_time_yields_zero() {
        let cmp = TripComparison::compute(7, &plan(300.0, 240.0), 0.0, 0.0, Utc::now());
        assert_eq!(cmp.efficiency_percent, 0.0);
        assert_eq!(cmp.actual_avg_speed_kmh, 0.0);
    }
}
