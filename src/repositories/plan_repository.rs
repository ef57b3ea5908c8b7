use crate::models::trip_comparison::TripComparison;
use crate::models::trip_plan::TripPlan;
use crate::utils::errors::AppError;
use chrono::Utc;
use sqlx::{PgPool, Postgres, Transaction};

pub struct PlanRepository {
    pool: PgPool,
}

impl PlanRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(
        &self,
        origin_name: String,
        destination_name: String,
        origin_lat: f64,
        origin_lon: f64,
        destination_lat: f64,
        destination_lon: f64,
        expected_distance_km: f64,
        expected_duration_minutes: f64,
        expected_avg_speed_kmh: f64,
    ) -> Result<TripPlan, AppError> {
        let plan = sqlx::query_as::<_, TripPlan>(
            r#"
            INSERT INTO trip_plans (
                origin_name, destination_name,
                origin_lat, origin_lon, destination_lat, destination_lon,
                expected_distance_km, expected_duration_minutes, expected_avg_speed_kmh,
                created_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING *
            "#,
        )
        .bind(origin_name)
        .bind(destination_name)
        .bind(origin_lat)
        .bind(origin_lon)
        .bind(destination_lat)
        .bind(destination_lon)
        .bind(expected_distance_km)
        .bind(expected_duration_minutes)
        .bind(expected_avg_speed_kmh)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Error creating trip plan: {}", e)))?;

        Ok(plan)
    }

    pub async fn find_by_id(&self, plan_id: i64) -> Result<Option<TripPlan>, AppError> {
        let plan = sqlx::query_as::<_, TripPlan>("SELECT * FROM trip_plans WHERE plan_id = $1")
            .bind(plan_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::DatabaseError(format!("Error finding trip plan: {}", e)))?;

        Ok(plan)
    }

    /// Upsert de la comparación real-vs-plan, clave por trip_id.
    /// Reemplaza los campos si ya existe (flujo de re-cierre/corrección).
    pub async fn upsert_comparison(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        cmp: &TripComparison,
    ) -> Result<TripComparison, AppError> {
        let stored = sqlx::query_as::<_, TripComparison>(
            r#"
            INSERT INTO trip_comparisons (
                trip_id, expected_distance_km, actual_distance_km,
                expected_time_minutes, actual_time_minutes,
                expected_avg_speed_kmh, actual_avg_speed_kmh,
                efficiency_percent, created_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            ON CONFLICT (trip_id) DO UPDATE SET
                expected_distance_km = EXCLUDED.expected_distance_km,
                actual_distance_km = EXCLUDED.actual_distance_km,
                expected_time_minutes = EXCLUDED.expected_time_minutes,
                actual_time_minutes = EXCLUDED.actual_time_minutes,
                expected_avg_speed_kmh = EXCLUDED.expected_avg_speed_kmh,
                actual_avg_speed_kmh = EXCLUDED.actual_avg_speed_kmh,
                efficiency_percent = EXCLUDED.efficiency_percent,
                created_at = EXCLUDED.created_at
            RETURNING *
            "#,
        )
        .bind(cmp.trip_id)
        .bind(cmp.expected_distance_km)
        .bind(cmp.actual_distance_km)
        .bind(cmp.expected_time_minutes)
        .bind(cmp.actual_time_minutes)
        .bind(cmp.expected_avg_speed_kmh)
        .bind(cmp.actual_avg_speed_kmh)
        .bind(cmp.efficiency_percent)
        .bind(cmp.created_at)
        .fetch_one(&mut **tx)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Error upserting comparison: {}", e)))?;

        Ok(stored)
    }

    pub async fn find_comparison(&self, trip_id: i64) -> Result<Option<TripComparison>, AppError> {
        let cmp = sqlx::query_as::<_, TripComparison>(
            "SELECT * FROM trip_comparisons WHERE trip_id = $1",
        )
        .bind(trip_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Error finding comparison: {}", e)))?;

        Ok(cmp)
    }
}
