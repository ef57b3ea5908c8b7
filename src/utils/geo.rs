//! Matemática geográfica
//!
//! Distancia de círculo máximo (haversine) y validación de coordenadas.

use crate::models::location_log::LocationLog;

const EARTH_RADIUS_KM: f64 = 6371.0;

/// Distancia de círculo máximo entre dos puntos, en kilómetros
pub fn haversine_distance_km(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let lat1_rad = lat1.to_radians();
    let lat2_rad = lat2.to_radians();
    let delta_lat = (lat2 - lat1).to_radians();
    let delta_lon = (lon2 - lon1).to_radians();

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (delta_lon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().asin();

    EARTH_RADIUS_KM * c
}

/// Longitud de la polilínea: suma de los segmentos consecutivos.
/// Menos de dos puntos -> 0.0
pub fn polyline_distance_km(points: &[LocationLog]) -> f64 {
    points
        .windows(2)
        .map(|pair| {
            haversine_distance_km(
                pair[0].latitude,
                pair[0].longitude,
                pair[1].latitude,
                pair[1].longitude,
            )
        })
        .sum()
}

pub fn is_valid_coordinate(lat: f64, lon: f64) -> bool {
    lat.is_finite() && lon.is_finite() && lat.abs() <= 90.0 && lon.abs() <= 180.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn fix(lat: f64, lon: f64, secs: i64) -> LocationLog {
        LocationLog {
            log_id: 0,
            vin: "TEST".to_string(),
            trip_id: None,
            timestamp: Utc.timestamp_opt(secs, 0).unwrap(),
            latitude: lat,
            longitude: lon,
            speed: 0.0,
        }
    }

    #[test]
    fn test_haversine_known_distance() {
        // Bangalore -> Chennai, ~290 km
        let d = haversine_distance_km(12.9716, 77.5946, 13.0827, 80.2707);
        assert!((d - 290.0).abs() < 10.0, "distance was {}", d);
    }

    #[test]
    fn test_haversine_zero_for_same_point() {
        let d = haversine_distance_km(12.9, 77.6, 12.9, 77.6);
        assert!(d.abs() < 1e-9);
    }

    #[test]
    fn test_polyline_empty_and_single() {
        assert_eq!(polyline_distance_km(&[]), 0.0);
        assert_eq!(polyline_distance_km(&[fix(12.9, 77.6, 0)]), 0.0);
    }

    #[test]
    fn test_polyline_at_least_chord() {
        // Desigualdad triangular: la polilínea nunca es más corta que la cuerda
        let points = vec![
            fix(12.90, 77.60, 0),
            fix(12.95, 77.70, 60),
            fix(13.00, 77.65, 120),
            fix(13.08, 80.27, 180),
        ];
        let path = polyline_distance_km(&points);
        let chord = haversine_distance_km(12.90, 77.60, 13.08, 80.27);
        assert!(path >= chord - 1e-9, "path {} < chord {}", path, chord);
    }

    #[test]
    fn test_polyline_colinear_equals_chord() {
        // Puntos sobre el mismo meridiano: la polilínea es igual a la cuerda
        let points = vec![
            fix(12.0, 77.6, 0),
            fix(12.5, 77.6, 60),
            fix(13.0, 77.6, 120),
        ];
        let path = polyline_distance_km(&points);
        let chord = haversine_distance_km(12.0, 77.6, 13.0, 77.6);
        assert!((path - chord).abs() < 1e-6, "path {} chord {}", path, chord);
    }

    #[test]
    fn test_coordinate_validation() {
        assert!(is_valid_coordinate(12.9, 77.6));
        assert!(is_valid_coordinate(-90.0, 180.0));
        assert!(!is_valid_coordinate(90.1, 0.0));
        assert!(!is_valid_coordinate(0.0, -180.5));
        assert!(!is_valid_coordinate(f64::NAN, 0.0));
    }
}
