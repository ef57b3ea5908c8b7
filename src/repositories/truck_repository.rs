use crate::models::truck::Truck;
use crate::repositories::driver_repository::DriverRepository;
use crate::utils::errors::AppError;
use chrono::Utc;
use sqlx::PgPool;

pub struct TruckRepository {
    pool: PgPool,
}

impl TruckRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_vin(&self, vin: &str) -> Result<Option<Truck>, AppError> {
        let truck = sqlx::query_as::<_, Truck>("SELECT * FROM trucks WHERE vin = $1")
            .bind(vin)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::DatabaseError(format!("Error finding truck: {}", e)))?;

        Ok(truck)
    }

    pub async fn list(&self) -> Result<Vec<Truck>, AppError> {
        let trucks = sqlx::query_as::<_, Truck>("SELECT * FROM trucks ORDER BY created_at DESC")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::DatabaseError(format!("Error listing trucks: {}", e)))?;

        Ok(trucks)
    }

    pub async fn create(
        &self,
        vin: String,
        driver_id: Option<i32>,
        model: Option<String>,
        license_plate: Option<String>,
    ) -> Result<Truck, AppError> {
        let truck = sqlx::query_as::<_, Truck>(
            r#"
            INSERT INTO trucks (vin, driver_id, model, license_plate, created_at)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(&vin)
        .bind(driver_id)
        .bind(model)
        .bind(license_plate)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                AppError::Conflict(format!("Truck with vin '{}' already exists", vin))
            }
            _ => AppError::DatabaseError(format!("Error creating truck: {}", e)),
        })?;

        Ok(truck)
    }

    /// Resolver un device id a un camión conocido, auto-registrando un
    /// par placeholder (driver + truck) la primera vez que se ve.
    ///
    /// Inserción condicional: si otro consumidor gana la carrera por el
    /// mismo vin, la transacción se descarta (incluido el driver placeholder)
    /// y se lee la fila existente. A lo sumo un par placeholder por vin.
    ///
    /// Devuelve (truck, recién_creado).
    pub async fn resolve(&self, vin: &str) -> Result<(Truck, bool), AppError> {
        if let Some(truck) = self.find_by_vin(vin).await? {
            return Ok((truck, false));
        }

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| AppError::DatabaseError(format!("Error starting transaction: {}", e)))?;

        let driver_repo = DriverRepository::new(self.pool.clone());
        let driver = driver_repo.create_placeholder(&mut tx).await?;

        let inserted = sqlx::query_as::<_, Truck>(
            r#"
            INSERT INTO trucks (vin, driver_id, created_at)
            VALUES ($1, $2, $3)
            ON CONFLICT (vin) DO NOTHING
            RETURNING *
            "#,
        )
        .bind(vin)
        .bind(driver.driver_id)
        .bind(Utc::now())
        .fetch_optional(&mut *tx)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Error registering truck: {}", e)))?;

        match inserted {
            Some(truck) => {
                tx.commit()
                    .await
                    .map_err(|e| AppError::DatabaseError(format!("Error committing: {}", e)))?;
                Ok((truck, true))
            }
            None => {
                // Otro consumidor registró el vin primero
                tx.rollback()
                    .await
                    .map_err(|e| AppError::DatabaseError(format!("Error rolling back: {}", e)))?;
                let existing = self.find_by_vin(vin).await?.ok_or_else(|| {
                    AppError::DatabaseError(format!("Truck '{}' vanished during resolve", vin))
                })?;
                Ok((existing, false))
            }
        }
    }
}
