use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::infrastructure::postgres::schema::clients;

#[derive(Debug, Clone, Identifiable, Selectable, Queryable)]
#[diesel(table_name = clients)]
pub struct ClientEntity {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub phone: String,
    pub email: Option<String>,
    pub service_type: String,
    pub plan_type: String,
    pub price_minor: Option<i32>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub device: Option<String>,
    pub app: Option<String>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = clients)]
pub struct InsertClientEntity {
    pub user_id: Uuid,
    pub name: String,
    pub phone: String,
    pub email: Option<String>,
    pub service_type: String,
    pub plan_type: String,
    pub price_minor: Option<i32>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub device: Option<String>,
    pub app: Option<String>,
    pub notes: Option<String>,
    pub expires_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, AsChangeset)]
#[diesel(table_name = clients)]
pub struct UpdateClientEntity {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<Option<String>>,
    pub service_type: Option<String>,
    pub plan_type: Option<String>,
    pub price_minor: Option<Option<i32>>,
    pub username: Option<Option<String>>,
    pub password: Option<Option<String>>,
    pub device: Option<Option<String>>,
    pub app: Option<Option<String>>,
    pub notes: Option<Option<String>>,
    pub expires_at: Option<DateTime<Utc>>,
}
