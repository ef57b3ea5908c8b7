use crate::models::driver::{
    Driver, PLACEHOLDER_DRIVER_CONTACT, PLACEHOLDER_DRIVER_LICENSE, PLACEHOLDER_DRIVER_NAME,
};
use crate::utils::errors::AppError;
use chrono::Utc;
use sqlx::{PgPool, Postgres, Transaction};

pub struct DriverRepository {
    pool: PgPool,
}

impl DriverRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(
        &self,
        name: String,
        license_number: Option<String>,
        contact: Option<String>,
    ) -> Result<Driver, AppError> {
        let driver = sqlx::query_as::<_, Driver>(
            r#"
            INSERT INTO drivers (name, license_number, contact, created_at)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(name)
        .bind(license_number)
        .bind(contact)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Error creating driver: {}", e)))?;

        Ok(driver)
    }

    /// Crear el conductor placeholder dentro de la transacción de
    /// auto-registro de un camión desconocido
    pub async fn create_placeholder(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<Driver, AppError> {
        let driver = sqlx::query_as::<_, Driver>(
            r#"
            INSERT INTO drivers (name, license_number, contact, created_at)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(PLACEHOLDER_DRIVER_NAME)
        .bind(PLACEHOLDER_DRIVER_LICENSE)
        .bind(PLACEHOLDER_DRIVER_CONTACT)
        .bind(Utc::now())
        .fetch_one(&mut **tx)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Error creating placeholder driver: {}", e)))?;

        Ok(driver)
    }

    pub async fn find_by_id(&self, driver_id: i32) -> Result<Option<Driver>, AppError> {
        let driver = sqlx::query_as::<_, Driver>("SELECT * FROM drivers WHERE driver_id = $1")
            .bind(driver_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::DatabaseError(format!("Error finding driver: {}", e)))?;

        Ok(driver)
    }
}
