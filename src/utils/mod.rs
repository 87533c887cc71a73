//! Utilidades del sistema
//!
//! Manejo de errores y validación de entrada.

pub mod errors;
pub mod validation;

pub use errors::{AppError, AppResult};
