use crate::dto::driver_dto::{DriverResponse, RegisterDriverRequest};
use crate::dto::truck_dto::ApiResponse;
use crate::repositories::driver_repository::DriverRepository;
use crate::services::broadcast_service::BroadcastHub;
use crate::utils::errors::AppError;
use serde_json::json;
use sqlx::PgPool;
use validator::Validate;

pub struct DriverController {
    repository: DriverRepository,
    hub: BroadcastHub,
}

impl DriverController {
    pub fn new(pool: PgPool, hub: BroadcastHub) -> Self {
        Self {
            repository: DriverRepository::new(pool),
            hub,
        }
    }

    pub async fn register(
        &self,
        request: RegisterDriverRequest,
    ) -> Result<ApiResponse<DriverResponse>, AppError> {
        request.validate()?;

        let driver = self
            .repository
            .create(request.name, request.license_number, request.contact)
            .await?;

        self.hub.publish(&json!({
            "type": "driver_registered",
            "driver_id": driver.driver_id,
            "name": driver.name.clone(),
            "license_number": driver.license_number.clone(),
        }));

        Ok(ApiResponse::success_with_message(
            driver.into(),
            "Conductor registrado exitosamente".to_string(),
        ))
    }

    pub async fn get_by_id(&self, driver_id: i32) -> Result<DriverResponse, AppError> {
        let driver = self
            .repository
            .find_by_id(driver_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Conductor no encontrado".to_string()))?;

        Ok(driver.into())
    }
}
