//! Utilidades del sistema
//! 
//! Este módulo contiene utilidades para manejo de errores
//! y matemática geográfica.

pub mod errors;
pub mod geo;
