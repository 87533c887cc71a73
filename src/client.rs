//! Cliente HTTP de la API
//!
//! Cliente tipado con `reqwest` para el contrato REST del backend. Lo usan
//! el `FleetStore` y la herramienta de pruebas. Todas las llamadas llevan el
//! `userId` con el que se construyó el cliente.

use reqwest::{Client, Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Value};
use thiserror::Error;
use uuid::Uuid;

use crate::dto::reminder_dto::ReminderResponse;
use crate::dto::seed_dto::SeedResponse;
use crate::dto::service_dto::{CreateServiceRequest, ServiceSearchResponse};
use crate::dto::stats_dto::DashboardResponse;
use crate::dto::vehicle_dto::CreateVehicleRequest;
use crate::models::{ServiceRecord, ServiceType, Vehicle, VehicleWithServices};

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Invalid payload: {0}")]
    InvalidPayload(String),
}

impl ClientError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Api { status, .. } => Some(*status),
            ClientError::Transport(e) => e.status().map(|s| s.as_u16()),
            ClientError::InvalidPayload(_) => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}

#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
    error: Option<String>,
}

/// Criterios de búsqueda de servicios del lado cliente
#[derive(Debug, Clone, Default)]
pub struct ServiceSearch {
    pub query: Option<String>,
    pub vehicle_id: Option<Uuid>,
    pub service_type: Option<ServiceType>,
}

#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    user_id: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>, user_id: impl Into<String>) -> Self {
        Self::with_client(Client::new(), base_url, user_id)
    }

    pub fn with_client(client: Client, base_url: impl Into<String>, user_id: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            user_id: user_id.into(),
        }
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.client.request(method, self.url(path))
    }

    fn user_query(&self) -> [(&'static str, &str); 1] {
        [("userId", self.user_id.as_str())]
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ClientError> {
        let response = check(request.send().await?).await?;
        Ok(response.json::<T>().await?)
    }

    pub async fn health(&self) -> Result<Value, ClientError> {
        self.send(self.request(Method::GET, "/health")).await
    }

    pub async fn list_vehicles(&self) -> Result<Vec<VehicleWithServices>, ClientError> {
        self.send(self.request(Method::GET, "/api/vehicles").query(&self.user_query()))
            .await
    }

    pub async fn get_vehicle(&self, id: Uuid) -> Result<VehicleWithServices, ClientError> {
        let path = format!("/api/vehicles/{}", id);
        self.send(self.request(Method::GET, &path).query(&self.user_query()))
            .await
    }

    /// El `userId` del request se sustituye por el del cliente
    pub async fn create_vehicle(&self, mut request: CreateVehicleRequest) -> Result<Vehicle, ClientError> {
        request.user_id = Some(self.user_id.clone());
        self.send(self.request(Method::POST, "/api/vehicles").json(&request))
            .await
    }

    /// `changes` es un objeto JSON parcial; `null` borra un campo opcional
    pub async fn update_vehicle(&self, id: Uuid, changes: Value) -> Result<Vehicle, ClientError> {
        let path = format!("/api/vehicles/{}", id);
        let body = self.with_user(changes)?;
        self.send(self.request(Method::PUT, &path).json(&body)).await
    }

    pub async fn delete_vehicle(&self, id: Uuid) -> Result<(), ClientError> {
        let path = format!("/api/vehicles/{}", id);
        self.send::<Value>(self.request(Method::DELETE, &path).query(&self.user_query()))
            .await
            .map(|_| ())
    }

    pub async fn list_services(&self, vehicle_id: Option<Uuid>) -> Result<Vec<ServiceRecord>, ClientError> {
        let mut request = self.request(Method::GET, "/api/services").query(&self.user_query());
        if let Some(vehicle_id) = vehicle_id {
            request = request.query(&[("vehicleId", vehicle_id.to_string())]);
        }
        self.send(request).await
    }

    pub async fn search_services(&self, search: &ServiceSearch) -> Result<ServiceSearchResponse, ClientError> {
        let mut params: Vec<(&str, String)> = vec![("userId", self.user_id.clone())];
        if let Some(query) = &search.query {
            params.push(("q", query.clone()));
        }
        if let Some(vehicle_id) = search.vehicle_id {
            params.push(("vehicleId", vehicle_id.to_string()));
        }
        if let Some(service_type) = search.service_type {
            params.push(("type", service_type.code().to_string()));
        }

        self.send(self.request(Method::GET, "/api/services/search").query(&params))
            .await
    }

    pub async fn create_service(&self, mut request: CreateServiceRequest) -> Result<ServiceRecord, ClientError> {
        request.user_id = Some(self.user_id.clone());
        self.send(self.request(Method::POST, "/api/services").json(&request))
            .await
    }

    pub async fn update_service(&self, id: Uuid, changes: Value) -> Result<ServiceRecord, ClientError> {
        let path = format!("/api/services/{}", id);
        let body = self.with_user(changes)?;
        self.send(self.request(Method::PUT, &path).json(&body)).await
    }

    pub async fn delete_service(&self, id: Uuid) -> Result<(), ClientError> {
        let path = format!("/api/services/{}", id);
        self.send::<Value>(self.request(Method::DELETE, &path).query(&self.user_query()))
            .await
            .map(|_| ())
    }

    pub async fn list_reminders(
        &self,
        vehicle_id: Option<Uuid>,
        include_completed: bool,
    ) -> Result<Vec<ReminderResponse>, ClientError> {
        let mut request = self
            .request(Method::GET, "/api/reminders")
            .query(&self.user_query())
            .query(&[("includeCompleted", include_completed)]);
        if let Some(vehicle_id) = vehicle_id {
            request = request.query(&[("vehicleId", vehicle_id.to_string())]);
        }
        self.send(request).await
    }

    pub async fn complete_reminder(&self, id: Uuid, is_completed: bool) -> Result<ReminderResponse, ClientError> {
        let path = format!("/api/reminders/{}/complete", id);
        let body = json!({ "userId": self.user_id, "isCompleted": is_completed });
        self.send(self.request(Method::PUT, &path).json(&body)).await
    }

    pub async fn stats(&self) -> Result<DashboardResponse, ClientError> {
        self.send(self.request(Method::GET, "/api/stats").query(&self.user_query()))
            .await
    }

    pub async fn seed(&self) -> Result<SeedResponse, ClientError> {
        let body = json!({ "userId": self.user_id });
        self.send(self.request(Method::POST, "/api/seed").json(&body)).await
    }

    fn with_user(&self, changes: Value) -> Result<Value, ClientError> {
        let mut body = match changes {
            Value::Object(map) => map,
            other => return Err(ClientError::InvalidPayload(format!("expected a JSON object, got {}", other))),
        };
        body.insert("userId".to_string(), Value::String(self.user_id.clone()));
        Ok(Value::Object(body))
    }
}

/// Convertir respuestas no exitosas en `ClientError::Api` con el mensaje del servidor
async fn check(response: Response) -> Result<Response, ClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let text = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ErrorBody>(&text)
        .ok()
        .and_then(|body| body.message.or(body.error))
        .unwrap_or_else(|| {
            if text.is_empty() {
                status.canonical_reason().unwrap_or("Unknown error").to_string()
            } else {
                text
            }
        });

    log::warn!("⚠️ API returned {}: {}", status, message);
    Err(ClientError::Api {
        status: status.as_u16(),
        message,
    })
}
