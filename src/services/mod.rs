//! Services module
//!
//! Lógica de negocio: la clasificación de recordatorios y los agregados de
//! la flota son funciones puras; el seed es la única que toca la base de
//! datos.

pub mod fleet_aggregator;
pub mod reminder_classifier;
pub mod seed_service;

pub use seed_service::SeedService;
