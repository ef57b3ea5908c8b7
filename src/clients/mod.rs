//! Clientes de sistemas externos

pub mod mqtt_listener;
