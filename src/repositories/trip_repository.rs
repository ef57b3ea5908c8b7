use crate::models::trip::{Trip, STATUS_ACTIVE, STATUS_COMPLETED};
use crate::utils::errors::AppError;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, Postgres, Transaction};

pub struct TripRepository {
    pool: PgPool,
}

impl TripRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Crear un trip activo. El índice único parcial uq_trip_active_vin
    /// garantiza a lo sumo un trip activo por camión; la violación se
    /// mapea a TripAlreadyActive sin crear nada.
    pub async fn create(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        vin: &str,
        plan_id: Option<i64>,
        origin_lat: f64,
        origin_lon: f64,
        start_time: DateTime<Utc>,
    ) -> Result<Trip, AppError> {
        let trip = sqlx::query_as::<_, Trip>(
            r#"
            INSERT INTO trips (vin, plan_id, start_time, origin_lat, origin_lon, status)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(vin)
        .bind(plan_id)
        .bind(start_time)
        .bind(origin_lat)
        .bind(origin_lon)
        .bind(STATUS_ACTIVE)
        .fetch_one(&mut **tx)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db) if db.constraint() == Some("uq_trip_active_vin") => {
                AppError::TripAlreadyActive
            }
            _ => AppError::DatabaseError(format!("Error creating trip: {}", e)),
        })?;

        Ok(trip)
    }

    pub async fn find_by_id(&self, trip_id: i64) -> Result<Option<Trip>, AppError> {
        let trip = sqlx::query_as::<_, Trip>("SELECT * FROM trips WHERE trip_id = $1")
            .bind(trip_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::DatabaseError(format!("Error finding trip: {}", e)))?;

        Ok(trip)
    }

    /// Trip activo de un camión, si lo hay (camino de ingesta)
    pub async fn find_active_by_vin(&self, vin: &str) -> Result<Option<Trip>, AppError> {
        let trip = sqlx::query_as::<_, Trip>(
            "SELECT * FROM trips WHERE vin = $1 AND status = $2",
        )
        .bind(vin)
        .bind(STATUS_ACTIVE)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Error finding active trip: {}", e)))?;

        Ok(trip)
    }

    /// Tomar el lock de fila del trip activo. Serializa cierres concurrentes
    /// del mismo trip: el segundo bloquea aquí y al despertar ya no ve
    /// status = 'active'.
    pub async fn lock_active(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        trip_id: i64,
    ) -> Result<Option<Trip>, AppError> {
        let trip = sqlx::query_as::<_, Trip>(
            "SELECT * FROM trips WHERE trip_id = $1 AND status = $2 FOR UPDATE",
        )
        .bind(trip_id)
        .bind(STATUS_ACTIVE)
        .fetch_optional(&mut **tx)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Error locking trip: {}", e)))?;

        Ok(trip)
    }

    /// Transición ACTIVE -> COMPLETED con las métricas calculadas
    pub async fn complete(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        trip_id: i64,
        end_time: DateTime<Utc>,
        destination_lat: f64,
        destination_lon: f64,
        distance_km: f64,
    ) -> Result<Trip, AppError> {
        let trip = sqlx::query_as::<_, Trip>(
            r#"
            UPDATE trips
            SET end_time = $2, destination_lat = $3, destination_lon = $4,
                distance_km = $5, status = $6
            WHERE trip_id = $1 AND status = $7
            RETURNING *
            "#,
        )
        .bind(trip_id)
        .bind(end_time)
        .bind(destination_lat)
        .bind(destination_lon)
        .bind(distance_km)
        .bind(STATUS_COMPLETED)
        .bind(STATUS_ACTIVE)
        .fetch_optional(&mut **tx)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Error completing trip: {}", e)))?
        .ok_or(AppError::TripNotFound)?;

        Ok(trip)
    }
}
