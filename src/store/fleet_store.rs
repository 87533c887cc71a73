//! Store local de la flota
//!
//! Refleja en memoria la flota del usuario tal como la devuelve el
//! servidor. `refresh` reemplaza el snapshot completo; las operaciones
//! locales son parches por id que aplican la respuesta del servidor como
//! valor autoritativo.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::client::{ApiClient, ClientError};
use crate::dto::reminder_dto::ReminderResponse;
use crate::dto::service_dto::CreateServiceRequest;
use crate::dto::vehicle_dto::CreateVehicleRequest;
use crate::models::{Reminder, ReminderStatus, ServiceRecord, Vehicle, VehicleWithServices};
use crate::services::fleet_aggregator::{self, FleetSummary};
use crate::services::reminder_classifier;

#[derive(Debug, Default)]
pub struct FleetStore {
    vehicles: Vec<VehicleWithServices>,
    selected: Option<Uuid>,
}

impl FleetStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn vehicles(&self) -> &[VehicleWithServices] {
        &self.vehicles
    }

    pub fn vehicle(&self, id: Uuid) -> Option<&VehicleWithServices> {
        self.vehicles.iter().find(|v| v.id() == id)
    }

    fn vehicle_mut(&mut self, id: Uuid) -> Option<&mut VehicleWithServices> {
        self.vehicles.iter_mut().find(|v| v.id() == id)
    }

    pub fn is_empty(&self) -> bool {
        self.vehicles.is_empty()
    }

    /// Reemplazar el snapshot; la selección sobrevive solo si el vehículo sigue
    pub fn replace_all(&mut self, vehicles: Vec<VehicleWithServices>) {
        self.vehicles = vehicles;
        if let Some(id) = self.selected {
            if self.vehicle(id).is_none() {
                self.selected = None;
            }
        }
    }

    pub fn select(&mut self, id: Uuid) -> bool {
        if self.vehicle(id).is_some() {
            self.selected = Some(id);
            true
        } else {
            false
        }
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    pub fn selected(&self) -> Option<&VehicleWithServices> {
        self.selected.and_then(|id| self.vehicle(id))
    }

    /// Vehículo nuevo al principio, como lo ordena el servidor
    pub fn add_vehicle(&mut self, vehicle: VehicleWithServices) {
        match self.vehicle_mut(vehicle.id()) {
            Some(existing) => *existing = vehicle,
            None => self.vehicles.insert(0, vehicle),
        }
    }

    /// Aplicar los campos de un vehículo conservando servicios y recordatorios
    pub fn upsert_vehicle(&mut self, vehicle: Vehicle) {
        match self.vehicle_mut(vehicle.id) {
            Some(existing) => existing.vehicle = vehicle,
            None => self.vehicles.insert(0, VehicleWithServices::new(vehicle)),
        }
    }

    pub fn remove_vehicle(&mut self, id: Uuid) -> Option<VehicleWithServices> {
        let index = self.vehicles.iter().position(|v| v.id() == id)?;
        if self.selected == Some(id) {
            self.selected = None;
        }
        Some(self.vehicles.remove(index))
    }

    /// Añadir un servicio en su posición por fecha y subir el kilometraje
    /// local si el del servicio es mayor. Devuelve `false` si el vehículo
    /// no está en el store.
    pub fn add_service(&mut self, service: ServiceRecord) -> bool {
        let Some(vehicle) = self.vehicle_mut(service.vehicle_id) else {
            return false;
        };

        if service.mileage > vehicle.vehicle.mileage {
            vehicle.vehicle.mileage = service.mileage;
        }
        vehicle.services.retain(|s| s.id != service.id);
        insert_by_date(&mut vehicle.services, service);
        true
    }

    pub fn update_service(&mut self, service: ServiceRecord) -> bool {
        let Some(vehicle) = self.vehicle_mut(service.vehicle_id) else {
            return false;
        };
        let Some(index) = vehicle.services.iter().position(|s| s.id == service.id) else {
            return false;
        };

        vehicle.services.remove(index);
        insert_by_date(&mut vehicle.services, service);
        true
    }

    pub fn remove_service(&mut self, id: Uuid) -> Option<ServiceRecord> {
        self.vehicles.iter_mut().find_map(|vehicle| {
            let index = vehicle.services.iter().position(|s| s.id == id)?;
            Some(vehicle.services.remove(index))
        })
    }

    /// El store solo guarda recordatorios pendientes
    pub fn apply_reminder(&mut self, reminder: Reminder) -> bool {
        let Some(vehicle) = self.vehicle_mut(reminder.vehicle_id) else {
            return false;
        };

        let position = vehicle.reminders.iter().position(|r| r.id == reminder.id);
        match (position, reminder.is_completed) {
            (Some(index), true) => {
                vehicle.reminders.remove(index);
            }
            (Some(index), false) => vehicle.reminders[index] = reminder,
            (None, false) => vehicle.reminders.push(reminder),
            (None, true) => {}
        }
        true
    }

    pub fn summary(&self) -> FleetSummary {
        fleet_aggregator::summarize(&self.vehicles)
    }

    /// Recordatorios de toda la flota con su estado, los más urgentes primero
    pub fn reminders(&self, now: DateTime<Utc>) -> Vec<(&VehicleWithServices, &Reminder, ReminderStatus)> {
        let mut all: Vec<_> = self
            .vehicles
            .iter()
            .flat_map(|v| {
                reminder_classifier::classify_vehicle(v, now)
                    .into_iter()
                    .map(move |(reminder, status)| (v, reminder, status))
            })
            .collect();
        all.sort_by_key(|(_, _, status)| *status);
        all
    }

    pub async fn refresh(&mut self, client: &ApiClient) -> Result<(), ClientError> {
        let vehicles = client.list_vehicles().await?;
        log::debug!("🔄 Fleet refreshed: {} vehicles", vehicles.len());
        self.replace_all(vehicles);
        Ok(())
    }

    pub async fn create_vehicle(
        &mut self,
        client: &ApiClient,
        request: CreateVehicleRequest,
    ) -> Result<Uuid, ClientError> {
        let vehicle = client.create_vehicle(request).await?;
        let id = vehicle.id;
        self.upsert_vehicle(vehicle);
        Ok(id)
    }

    pub async fn delete_vehicle(&mut self, client: &ApiClient, id: Uuid) -> Result<(), ClientError> {
        client.delete_vehicle(id).await?;
        self.remove_vehicle(id);
        Ok(())
    }

    pub async fn create_service(
        &mut self,
        client: &ApiClient,
        request: CreateServiceRequest,
    ) -> Result<ServiceRecord, ClientError> {
        let service = client.create_service(request).await?;
        if !self.add_service(service.clone()) {
            self.refresh(client).await?;
        }
        Ok(service)
    }

    pub async fn delete_service(&mut self, client: &ApiClient, id: Uuid) -> Result<(), ClientError> {
        client.delete_service(id).await?;
        self.remove_service(id);
        Ok(())
    }

    pub async fn complete_reminder(
        &mut self,
        client: &ApiClient,
        id: Uuid,
        is_completed: bool,
    ) -> Result<ReminderResponse, ClientError> {
        let response = client.complete_reminder(id, is_completed).await?;
        self.apply_reminder(response.reminder.clone());
        Ok(response)
    }
}

fn insert_by_date(services: &mut Vec<ServiceRecord>, service: ServiceRecord) {
    let index = services
        .iter()
        .position(|s| s.service_date < service.service_date)
        .unwrap_or(services.len());
    services.insert(index, service);
}
