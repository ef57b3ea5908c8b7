//! Services module
//! 
//! Este módulo contiene la lógica de negocio y servicios de la aplicación.
//! Los servicios encapsulan operaciones complejas que pueden involucrar 
//! múltiples modelos o integraciones externas.

pub mod broadcast_service;
pub mod telemetry_service;
pub mod trip_service;
pub mod routing_service;

pub use broadcast_service::*;
pub use telemetry_service::*;
