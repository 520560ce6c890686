use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{
    entities::{clients::ClientEntity, renewals::RenewalEntity},
    value_objects::enums::{
        expiration_statuses::ExpirationStatus, plan_types::PlanType, service_types::ServiceType,
    },
};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ClientModel {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub phone: String,
    pub email: Option<String>,
    pub service_type: ServiceType,
    pub plan_type: PlanType,
    pub price_minor: Option<i32>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub device: Option<String>,
    pub app: Option<String>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl From<ClientEntity> for ClientModel {
    fn from(entity: ClientEntity) -> Self {
        Self {
            id: entity.id,
            user_id: entity.user_id,
            name: entity.name,
            phone: entity.phone,
            email: entity.email,
            service_type: ServiceType::from_str(&entity.service_type),
            plan_type: PlanType::from_str(&entity.plan_type),
            price_minor: entity.price_minor,
            username: entity.username,
            password: entity.password,
            device: entity.device,
            app: entity.app,
            notes: entity.notes,
            created_at: entity.created_at,
            expires_at: entity.expires_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InsertClientModel {
    pub name: String,
    pub phone: String,
    pub email: Option<String>,
    pub service_type: ServiceType,
    pub plan_type: PlanType,
    pub price_minor: Option<i32>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub device: Option<String>,
    pub app: Option<String>,
    pub notes: Option<String>,
}

/// Partial update; absent fields keep their current values.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateClientModel {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub service_type: Option<ServiceType>,
    pub plan_type: Option<PlanType>,
    pub price_minor: Option<i32>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub device: Option<String>,
    pub app: Option<String>,
    pub notes: Option<String>,
}

impl UpdateClientModel {
    /// True when no field is present, i.e. the update would change nothing.
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.phone.is_none()
            && self.email.is_none()
            && self.service_type.is_none()
            && self.plan_type.is_none()
            && self.price_minor.is_none()
            && self.username.is_none()
            && self.password.is_none()
            && self.device.is_none()
            && self.app.is_none()
            && self.notes.is_none()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenewClientModel {
    pub plan_type: PlanType,
    pub renewed_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RenewalModel {
    pub id: Uuid,
    pub client_id: Uuid,
    pub renewed_at: DateTime<Utc>,
    pub previous_expires_at: DateTime<Utc>,
    pub new_expires_at: DateTime<Utc>,
    pub plan_type: PlanType,
}

impl From<RenewalEntity> for RenewalModel {
    fn from(entity: RenewalEntity) -> Self {
        Self {
            id: entity.id,
            client_id: entity.client_id,
            renewed_at: entity.renewed_at,
            previous_expires_at: entity.previous_expires_at,
            new_expires_at: entity.new_expires_at,
            plan_type: PlanType::from_str(&entity.plan_type),
        }
    }
}

/// Client annotated with its derived expiration state for listing screens.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientWithStatusModel {
    #[serde(flatten)]
    pub client: ClientModel,
    pub expiration_status: ExpirationStatus,
    pub days_remaining: i64,
}
