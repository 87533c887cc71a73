//! Controllers
//!
//! Validan la entrada, comprueban la propiedad de los recursos y combinan
//! los repositorios con la lógica de negocio.

pub mod reminder_controller;
pub mod seed_controller;
pub mod service_controller;
pub mod stats_controller;
pub mod vehicle_controller;
