use crate::models::location_log::LocationLog;
use crate::utils::errors::AppError;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, Postgres, Transaction};

pub struct LocationRepository {
    pool: PgPool,
}

impl LocationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insertar un fix de posición. Idempotente bajo entrega at-least-once:
    /// un duplicado (vin, timestamp) no inserta nada y devuelve None.
    pub async fn append(
        &self,
        vin: &str,
        timestamp: DateTime<Utc>,
        latitude: f64,
        longitude: f64,
        speed: f64,
        trip_id: Option<i64>,
    ) -> Result<Option<LocationLog>, AppError> {
        let log = sqlx::query_as::<_, LocationLog>(
            r#"
            INSERT INTO location_logs (vin, trip_id, timestamp, latitude, longitude, speed)
            VALUES ($1, $2, $3, $4, $5, $6)
            ON CONFLICT (vin, timestamp) DO NOTHING
            RETURNING *
            "#,
        )
        .bind(vin)
        .bind(trip_id)
        .bind(timestamp)
        .bind(latitude)
        .bind(longitude)
        .bind(speed)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Error logging location: {}", e)))?;

        Ok(log)
    }

    /// Fix más reciente por timestamp para un camión
    pub async fn latest(&self, vin: &str) -> Result<Option<LocationLog>, AppError> {
        let log = sqlx::query_as::<_, LocationLog>(
            "SELECT * FROM location_logs WHERE vin = $1 ORDER BY timestamp DESC LIMIT 1",
        )
        .bind(vin)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Error finding latest location: {}", e)))?;

        Ok(log)
    }

    /// Fixes vinculados a un trip, ascendente por timestamp
    pub async fn fixes_for_trip(&self, trip_id: i64) -> Result<Vec<LocationLog>, AppError> {
        let logs = sqlx::query_as::<_, LocationLog>(
            "SELECT * FROM location_logs WHERE trip_id = $1 ORDER BY timestamp ASC",
        )
        .bind(trip_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Error fetching trip locations: {}", e)))?;

        Ok(logs)
    }

    /// Vincular un fix existente a un trip (el fix de origen en trip/start)
    pub async fn link_to_trip(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        log_id: i64,
        trip_id: i64,
    ) -> Result<(), AppError> {
        sqlx::query("UPDATE location_logs SET trip_id = $2 WHERE log_id = $1")
            .bind(log_id)
            .bind(trip_id)
            .execute(&mut **tx)
            .await
            .map_err(|e| AppError::DatabaseError(format!("Error linking location to trip: {}", e)))?;

        Ok(())
    }
}
