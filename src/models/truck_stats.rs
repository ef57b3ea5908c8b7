//! Modelo de TruckStats
//!
//! Totales acumulados por camión, actualizados incrementalmente en cada
//! cierre de trip dentro de la misma transacción. Nunca se recalculan
//! desde cero.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct TruckStats {
    pub vin: String,
    pub total_trips: i64,
    pub total_distance_km: f64,
    pub total_duration_minutes: f64,
    pub avg_distance_per_trip_km: f64,
    pub avg_speed_kmh: f64,
    pub last_updated: DateTime<Utc>,
}

impl TruckStats {
    /// Acumular un cierre de trip sobre las estadísticas previas (si existen).
    ///
    /// Velocidad media = distancia acumulada / horas acumuladas, con guardia
    /// de división por cero.
    pub fn accumulate(
        previous: Option<&TruckStats>,
        vin: &str,
        distance_km: f64,
        duration_minutes: f64,
        now: DateTime<Utc>,
    ) -> TruckStats {
        let (total_trips, total_distance_km, total_duration_minutes) = match previous {
            Some(prev) => (
                prev.total_trips + 1,
                prev.total_distance_km + distance_km,
                prev.total_duration_minutes + duration_minutes,
            ),
            None => (1, distance_km, duration_minutes),
        };

        let avg_distance_per_trip_km = total_distance_km / total_trips as f64;
        let avg_speed_kmh = if total_duration_minutes > 0.0 {
            total_distance_km / (total_duration_minutes / 60.0)
        } else {
            0.0
        };

        TruckStats {
            vin: vin.to_string(),
            total_trips,
            total_distance_km,
            total_duration_minutes,
            avg_distance_per_trip_km,
            avg_speed_kmh,
            last_updated: now,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_close_creates_row() {
        let stats = TruckStats::accumulate(None, "KA01AB1234", 120.0, 90.0, Utc::now());
        assert_eq!(stats.total_trips, 1);
        assert_eq!(stats.total_distance_km, 120.0);
        assert_eq!(stats.total_duration_minutes, 90.0);
        assert_eq!(stats.avg_distance_per_trip_km, 120.0);
        assert!((stats.avg_speed_kmh - 80.0).abs() < 1e-9);
    }

    #[test]
    fn test_accumulation_matches_totals() {
        // Σd / (Σt/60) sin importar el orden de cierre
        let closes = [(100.0, 60.0), (50.0, 90.0), (200.0, 120.0)];
        let mut forward: Option<TruckStats> = None;
        for (d, t) in closes {
            forward = Some(TruckStats::accumulate(forward.as_ref(), "V1", d, t, Utc::now()));
        }
        let mut reverse: Option<TruckStats> = None;
        for (d, t) in closes.iter().rev() {
            reverse = Some(TruckStats::accumulate(reverse.as_ref(), "V1", *d, *t, Utc::now()));
        }

        let forward = forward.unwrap();
        let reverse = reverse.unwrap();
        assert_eq!(forward.total_trips, 3);
        assert_eq!(forward.total_distance_km, 350.0);
        assert_eq!(forward.total_duration_minutes, 270.0);
        assert!((forward.avg_speed_kmh - 350.0 / (270.0 / 60.0)).abs() < 1e-9);
        assert!((forward.total_distance_km - reverse.total_distance_km).abs() < 1e-9);
        assert!((forward.avg_speed_kmh - reverse.avg_speed_kmh).abs() < 1e-9);
    }

    #[test]
    fn test_zero_duration_guards_division() {
        let stats = TruckStats::accumulate(None, "V1", 10.0, 0.0, Utc::now());
        assert_eq!(stats.avg_speed_kmh, 0.0);
        assert_eq!(stats.avg_distance_per_trip_km, 10.0);
    }
}
