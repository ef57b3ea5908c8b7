//! Ciclo de vida de trips
//!
//! Máquina de estados NONE -> ACTIVE -> COMPLETED por camión. Este
//! servicio es el único que muta status/end_time de un trip. El cierre
//! calcula las métricas derivadas (distancia de polilínea, duración,
//! comparación contra el plan) y acumula las estadísticas del camión,
//! todo dentro de una sola transacción: o se persiste todo o nada.

use chrono::Utc;
use serde_json::{json, Value};
use sqlx::PgPool;

use crate::models::trip::Trip;
use crate::models::trip_comparison::TripComparison;
use crate::repositories::location_repository::LocationRepository;
use crate::repositories::plan_repository::PlanRepository;
use crate::repositories::stats_repository::StatsRepository;
use crate::repositories::trip_repository::TripRepository;
use crate::services::broadcast_service::BroadcastHub;
use crate::utils::errors::AppError;
use crate::utils::geo;

pub struct TripService {
    pool: PgPool,
    hub: BroadcastHub,
}

impl TripService {
    pub fn new(pool: PgPool, hub: BroadcastHub) -> Self {
        Self { pool, hub }
    }

    /// Iniciar un trip para un camión.
    ///
    /// Falla con NoLocationData si el camión nunca reportó posición, y
    /// con TripAlreadyActive si ya tiene un trip abierto (índice único
    /// parcial, sin ventana de carrera). El fix más reciente se convierte
    /// en el origen y queda vinculado al trip nuevo.
    pub async fn start_trip(&self, vin: &str, plan_id: Option<i64>) -> Result<Trip, AppError> {
        let locations = LocationRepository::new(self.pool.clone());
        let latest = locations.latest(vin).await?.ok_or(AppError::NoLocationData)?;

        if let Some(pid) = plan_id {
            let plans = PlanRepository::new(self.pool.clone());
            plans
                .find_by_id(pid)
                .await?
                .ok_or_else(|| AppError::NotFound(format!("Trip plan {} not found", pid)))?;
        }

        let mut tx = self.pool.begin().await?;

        let trips = TripRepository::new(self.pool.clone());
        let trip = trips
            .create(
                &mut tx,
                vin,
                plan_id,
                latest.latitude,
                latest.longitude,
                Utc::now(),
            )
            .await?;
        locations
            .link_to_trip(&mut tx, latest.log_id, trip.trip_id)
            .await?;

        tx.commit().await?;

        log::info!("🚦 Trip {} iniciado para {}", trip.trip_id, vin);
        self.hub.publish(&json!({
            "type": "trip_started",
            "vin": trip.vin.clone(),
            "trip_id": trip.trip_id,
            "start_time": trip.start_time.to_rfc3339(),
            "lat": trip.origin_lat,
            "lon": trip.origin_lon,
        }));

        Ok(trip)
    }

    /// Cerrar un trip activo.
    ///
    /// El lock de fila serializa cierres concurrentes del mismo trip: el
    /// segundo llamador observa el trip ya completado y recibe
    /// TripNotFound, sin doble conteo en las estadísticas. La distancia
    /// es la longitud de la polilínea sobre todos los fixes vinculados,
    /// no la cuerda origen-destino.
    pub async fn end_trip(
        &self,
        trip_id: i64,
    ) -> Result<(Trip, Option<TripComparison>), AppError> {
        let trips = TripRepository::new(self.pool.clone());
        let locations = LocationRepository::new(self.pool.clone());
        let plans = PlanRepository::new(self.pool.clone());
        let stats = StatsRepository::new(self.pool.clone());

        let mut tx = self.pool.begin().await?;

        let trip = trips
            .lock_active(&mut tx, trip_id)
            .await?
            .ok_or(AppError::TripNotFound)?;

        let fixes = locations.fixes_for_trip(trip_id).await?;
        let last = match fixes.last() {
            Some(last) => last.clone(),
            // Sin muestras no hay ruta que calcular; la transacción se
            // descarta y el trip queda activo.
            None => return Err(AppError::NoTelemetryForTrip),
        };

        let end_time = Utc::now();
        let distance_km = geo::polyline_distance_km(&fixes);
        let duration_minutes = (end_time - trip.start_time).num_seconds() as f64 / 60.0;

        let completed = trips
            .complete(
                &mut tx,
                trip_id,
                end_time,
                last.latitude,
                last.longitude,
                distance_km,
            )
            .await?;

        let comparison = match trip.plan_id {
            Some(pid) => {
                let plan = plans.find_by_id(pid).await?.ok_or_else(|| {
                    AppError::DatabaseError(format!(
                        "Trip plan {} referenced by trip {} not found",
                        pid, trip_id
                    ))
                })?;
                let cmp = TripComparison::compute(
                    trip_id,
                    &plan,
                    distance_km,
                    duration_minutes,
                    end_time,
                );
                Some(plans.upsert_comparison(&mut tx, &cmp).await?)
            }
            None => None,
        };

        stats
            .record_trip_close(&mut tx, &trip.vin, distance_km, duration_minutes)
            .await?;

        tx.commit().await?;

        log::info!(
            "🏁 Trip {} cerrado para {}: {:.2} km en {:.1} min",
            trip_id,
            completed.vin,
            distance_km,
            duration_minutes
        );

        let comparison_value = match &comparison {
            Some(cmp) => serde_json::to_value(cmp).unwrap_or(Value::Null),
            None => Value::Null,
        };
        self.hub.publish(&json!({
            "type": "trip_ended",
            "vin": completed.vin.clone(),
            "trip_id": completed.trip_id,
            "start_time": completed.start_time.to_rfc3339(),
            "end_time": end_time.to_rfc3339(),
            "distance_km": distance_km,
            "duration_minutes": duration_minutes,
            "comparison": comparison_value,
        }));

        Ok((completed, comparison))
    }
}
