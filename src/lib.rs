//! Backend de mantenimiento de vehículos
//!
//! API REST sobre PostgreSQL para vehículos, servicios y recordatorios,
//! la clasificación de recordatorios, los agregados de la flota, un cliente
//! tipado y un store local que refleja el estado del servidor.

pub mod client;
pub mod config;
pub mod controllers;
pub mod database;
pub mod dto;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;
pub mod state;
pub mod store;
pub mod utils;

pub use routes::create_router;
pub use state::AppState;
