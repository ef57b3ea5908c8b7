pub mod truck_routes;
pub mod driver_routes;
pub mod trip_routes;
pub mod ws_routes;
