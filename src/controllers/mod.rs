//! Controllers de la API
//! 
//! Orquestan validación, repositorios y broadcast por recurso.

pub mod truck_controller;
pub mod driver_controller;
pub mod trip_controller;
