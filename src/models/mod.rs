//! Modelos del sistema
//!
//! Este módulo contiene los modelos de datos que mapean al schema
//! PostgreSQL (vehicles, services, reminders).

pub mod reminder;
pub mod service_record;
pub mod service_type;
pub mod vehicle;

pub use reminder::{Reminder, ReminderStatus};
pub use service_record::ServiceRecord;
pub use service_type::ServiceType;
pub use vehicle::{Vehicle, VehicleWithServices};
