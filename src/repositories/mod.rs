//! Repositorios
//!
//! Acceso a PostgreSQL con sqlx. Todas las consultas filtran por
//! `user_id` para que un recurso ajeno se comporte como inexistente.

pub mod fleet_repository;
pub mod reminder_repository;
pub mod service_repository;
pub mod vehicle_repository;
