//! Agregados de la flota
//!
//! Resúmenes (vehículos, servicios, coste total, recordatorios pendientes),
//! resumen por vehículo y búsqueda de servicios. Todo se recalcula sobre el
//! snapshot en memoria; nada se guarda.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::{ServiceRecord, ServiceType, VehicleWithServices};

/// Centinela que desactiva un filtro
pub const ALL_SENTINEL: &str = "all";

/// Número de servicios recientes del dashboard
pub const RECENT_SERVICES_LIMIT: usize = 5;

/// Resumen de la flota de un usuario
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FleetSummary {
    pub total_vehicles: usize,
    pub total_services: usize,
    pub total_cost: Decimal,
    pub pending_reminders: usize,
}

/// Resumen de un vehículo (tarjeta del dashboard)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct VehicleSummary {
    pub vehicle_id: Uuid,
    pub display_name: String,
    pub mileage: i64,
    pub service_count: usize,
    pub total_cost: Decimal,
    pub pending_reminders: usize,
    pub last_service: Option<ServiceRecord>,
}

pub fn summarize(vehicles: &[VehicleWithServices]) -> FleetSummary {
    FleetSummary {
        total_vehicles: vehicles.len(),
        total_services: vehicles.iter().map(|v| v.services.len()).sum(),
        total_cost: vehicles.iter().map(|v| total_cost(&v.services)).sum(),
        pending_reminders: vehicles.iter().map(pending_reminders).sum(),
    }
}

/// Recordatorios no completados, sin importar su clasificación
pub fn pending_reminders(vehicle: &VehicleWithServices) -> usize {
    vehicle.reminders.iter().filter(|r| !r.is_completed).count()
}

/// Los servicios llegan ordenados del más reciente al más antiguo
pub fn summarize_vehicle(vehicle: &VehicleWithServices) -> VehicleSummary {
    VehicleSummary {
        vehicle_id: vehicle.vehicle.id,
        display_name: vehicle.vehicle.display_name(),
        mileage: vehicle.vehicle.mileage,
        service_count: vehicle.services.len(),
        total_cost: total_cost(&vehicle.services),
        pending_reminders: pending_reminders(vehicle),
        last_service: vehicle.services.first().cloned(),
    }
}

pub fn total_cost<'a, I>(services: I) -> Decimal
where
    I: IntoIterator<Item = &'a ServiceRecord>,
{
    services.into_iter().map(|s| s.cost).sum()
}

/// Coste medio; `None` para un conjunto vacío
pub fn average_cost(services: &[&ServiceRecord]) -> Option<Decimal> {
    if services.is_empty() {
        return None;
    }

    let total = total_cost(services.iter().copied());
    Some(total / Decimal::from(services.len()))
}

/// Filtro exacto que puede estar desactivado
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection<T> {
    Any,
    Only(T),
}

impl<T> Default for Selection<T> {
    fn default() -> Self {
        Selection::Any
    }
}

impl<T: PartialEq> Selection<T> {
    pub fn matches(&self, value: &T) -> bool {
        match self {
            Selection::Any => true,
            Selection::Only(expected) => expected == value,
        }
    }
}

impl<T: std::str::FromStr> Selection<T> {
    /// Ausente, vacío o `all` desactivan el filtro
    pub fn parse(raw: Option<&str>) -> Result<Self, T::Err> {
        match raw.map(str::trim) {
            None => Ok(Selection::Any),
            Some(value) if value.is_empty() || value.eq_ignore_ascii_case(ALL_SENTINEL) => {
                Ok(Selection::Any)
            }
            Some(value) => value.parse().map(Selection::Only),
        }
    }
}

/// Criterios de búsqueda de servicios
#[derive(Debug, Clone, Default)]
pub struct ServiceFilter {
    pub query: String,
    pub vehicle_id: Selection<Uuid>,
    pub service_type: Selection<ServiceType>,
}

impl ServiceFilter {
    pub fn matches(&self, service: &ServiceRecord) -> bool {
        self.matches_query(service)
            && self.vehicle_id.matches(&service.vehicle_id)
            && self.service_type.matches(&service.service_type)
    }

    fn matches_query(&self, service: &ServiceRecord) -> bool {
        let needle = self.query.to_lowercase();
        if needle.is_empty() {
            return true;
        }

        service.description.to_lowercase().contains(&needle)
            || service.provider.to_lowercase().contains(&needle)
            || service.service_type.label().to_lowercase().contains(&needle)
    }
}

/// Filtro estable: conserva el orden de entrada
pub fn filter_services<'a>(services: &'a [ServiceRecord], filter: &ServiceFilter) -> Vec<&'a ServiceRecord> {
    services.iter().filter(|s| filter.matches(s)).collect()
}

/// Todos los servicios de la flota, del más reciente al más antiguo
pub fn all_services(vehicles: &[VehicleWithServices]) -> Vec<ServiceRecord> {
    let mut services: Vec<ServiceRecord> = vehicles
        .iter()
        .flat_map(|v| v.services.iter().cloned())
        .collect();
    services.sort_by(|a, b| b.service_date.cmp(&a.service_date));
    services
}

pub fn recent_services(vehicles: &[VehicleWithServices]) -> Vec<ServiceRecord> {
    let mut services = all_services(vehicles);
    services.truncate(RECENT_SERVICES_LIMIT);
    services
}
