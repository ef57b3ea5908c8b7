//! Repositorios de acceso a datos
//! 
//! Cada repositorio encapsula las queries SQL de una entidad.

pub mod driver_repository;
pub mod truck_repository;
pub mod location_repository;
pub mod trip_repository;
pub mod plan_repository;
pub mod stats_repository;
