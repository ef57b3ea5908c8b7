//! DTOs de Driver

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::driver::Driver;

/// Request para registrar un conductor
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterDriverRequest {
    #[validate(length(min = 2, max = 100))]
    pub name: String,

    #[validate(length(min = 2, max = 50))]
    pub license_number: Option<String>,

    #[validate(length(min = 5, max = 30))]
    pub contact: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct DriverResponse {
    pub driver_id: i32,
    pub name: String,
    pub license_number: Option<String>,
    pub contact: Option<String>,
    pub created_at: String,
}

impl From<Driver> for DriverResponse {
    fn from(driver: Driver) -> Self {
        Self {
            driver_id: driver.driver_id,
            name: driver.name,
            license_number: driver.license_number,
            contact: driver.contact,
            created_at: driver.created_at.to_rfc3339(),
        }
    }
}
