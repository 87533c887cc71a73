//! DTOs de la API
//!
//! Requests y responses de las rutas HTTP. Los nombres de campo viajan en
//! camelCase.

pub mod patch;
pub mod reminder_dto;
pub mod seed_dto;
pub mod service_dto;
pub mod stats_dto;
pub mod vehicle_dto;

pub use patch::Patch;
