//! Modelos de dominio
//! 
//! Structs que mapean al schema PostgreSQL (migrations/001_initial_schema.sql)
//! más la lógica pura asociada (acumulación de stats, comparación de trips).

pub mod driver;
pub mod truck;
pub mod location_log;
pub mod trip;
pub mod trip_plan;
pub mod trip_comparison;
pub mod truck_stats;
