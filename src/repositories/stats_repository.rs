use crate::models::truck_stats::TruckStats;
use crate::utils::errors::AppError;
use chrono::Utc;
use sqlx::{PgPool, Postgres, Transaction};

pub struct StatsRepository {
    pool: PgPool,
}

impl StatsRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Acumular un cierre de trip en las estadísticas del camión.
    ///
    /// Se ejecuta dentro de la transacción de cierre del trip: la fila se
    /// toma con FOR UPDATE, la aritmética es TruckStats::accumulate y el
    /// resultado se escribe con upsert. Si la transacción del cierre se
    /// revierte, esta actualización se revierte con ella.
    pub async fn record_trip_close(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        vin: &str,
        distance_km: f64,
        duration_minutes: f64,
    ) -> Result<TruckStats, AppError> {
        let previous = sqlx::query_as::<_, TruckStats>(
            "SELECT * FROM truck_stats WHERE vin = $1 FOR UPDATE",
        )
        .bind(vin)
        .fetch_optional(&mut **tx)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Error locking truck stats: {}", e)))?;

        let updated = TruckStats::accumulate(
            previous.as_ref(),
            vin,
            distance_km,
            duration_minutes,
            Utc::now(),
        );

        let stored = sqlx::query_as::<_, TruckStats>(
            r#"
            INSERT INTO truck_stats (
                vin, total_trips, total_distance_km, total_duration_minutes,
                avg_distance_per_trip_km, avg_speed_kmh, last_updated
            ) VALUES ($1, $2, $3, $4, $5, $6, $7)
            ON CONFLICT (vin) DO UPDATE SET
                total_trips = EXCLUDED.total_trips,
                total_distance_km = EXCLUDED.total_distance_km,
                total_duration_minutes = EXCLUDED.total_duration_minutes,
                avg_distance_per_trip_km = EXCLUDED.avg_distance_per_trip_km,
                avg_speed_kmh = EXCLUDED.avg_speed_kmh,
                last_updated = EXCLUDED.last_updated
            RETURNING *
            "#,
        )
        .bind(&updated.vin)
        .bind(updated.total_trips)
        .bind(updated.total_distance_km)
        .bind(updated.total_duration_minutes)
        .bind(updated.avg_distance_per_trip_km)
        .bind(updated.avg_speed_kmh)
        .bind(updated.last_updated)
        .fetch_one(&mut **tx)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Error updating truck stats: {}", e)))?;

        Ok(stored)
    }

    pub async fn find_by_vin(&self, vin: &str) -> Result<Option<TruckStats>, AppError> {
        let stats = sqlx::query_as::<_, TruckStats>("SELECT * FROM truck_stats WHERE vin = $1")
            .bind(vin)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::DatabaseError(format!("Error finding truck stats: {}", e)))?;

        Ok(stats)
    }
}
