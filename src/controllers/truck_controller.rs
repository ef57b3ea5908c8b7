use crate::dto::truck_dto::{
    ApiResponse, LocationResponse, RegisterTruckRequest, TruckResponse, TruckStatsResponse,
};
use crate::repositories::driver_repository::DriverRepository;
use crate::repositories::location_repository::LocationRepository;
use crate::repositories::stats_repository::StatsRepository;
use crate::repositories::truck_repository::TruckRepository;
use crate::services::broadcast_service::BroadcastHub;
use crate::utils::errors::AppError;
use serde_json::json;
use sqlx::PgPool;
use validator::Validate;

pub struct TruckController {
    pool: PgPool,
    hub: BroadcastHub,
}

impl TruckController {
    pub fn new(pool: PgPool, hub: BroadcastHub) -> Self {
        Self { pool, hub }
    }

    pub async fn register(
        &self,
        request: RegisterTruckRequest,
    ) -> Result<ApiResponse<TruckResponse>, AppError> {
        request.validate()?;

        if request.vin.trim().is_empty() {
            return Err(AppError::ValidationError("El VIN es requerido".to_string()));
        }

        // Verificar que el conductor exista si se indicó
        if let Some(driver_id) = request.driver_id {
            let drivers = DriverRepository::new(self.pool.clone());
            drivers
                .find_by_id(driver_id)
                .await?
                .ok_or_else(|| AppError::NotFound(format!("Driver {} not found", driver_id)))?;
        }

        let repository = TruckRepository::new(self.pool.clone());
        let truck = repository
            .create(
                request.vin,
                request.driver_id,
                request.model,
                request.license_plate,
            )
            .await?;

        self.hub.publish(&json!({
            "type": "truck_registered",
            "vin": truck.vin.clone(),
            "driver_id": truck.driver_id,
            "model": truck.model.clone(),
            "license_plate": truck.license_plate.clone(),
        }));

        Ok(ApiResponse::success_with_message(
            truck.into(),
            "Camión registrado exitosamente".to_string(),
        ))
    }

    pub async fn list(&self) -> Result<Vec<TruckResponse>, AppError> {
        let repository = TruckRepository::new(self.pool.clone());
        let trucks = repository.list().await?;
        Ok(trucks.into_iter().map(TruckResponse::from).collect())
    }

    pub async fn get_by_vin(&self, vin: &str) -> Result<TruckResponse, AppError> {
        let repository = TruckRepository::new(self.pool.clone());
        let truck = repository
            .find_by_vin(vin)
            .await?
            .ok_or_else(|| AppError::NotFound("Camión no encontrado".to_string()))?;

        Ok(truck.into())
    }

    /// Última posición conocida del camión
    pub async fn latest_location(&self, vin: &str) -> Result<LocationResponse, AppError> {
        let locations = LocationRepository::new(self.pool.clone());
        let latest = locations.latest(vin).await?.ok_or(AppError::NoLocationData)?;

        Ok(latest.into())
    }

    /// Estadísticas acumuladas del camión (404 hasta el primer cierre de trip)
    pub async fn stats(&self, vin: &str) -> Result<TruckStatsResponse, AppError> {
        let stats = StatsRepository::new(self.pool.clone());
        let row = stats
            .find_by_vin(vin)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("No stats recorded for truck '{}'", vin)))?;

        Ok(row.into())
    }
}
