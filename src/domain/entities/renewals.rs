use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::infrastructure::postgres::schema::client_renewals;

#[derive(Debug, Clone, Identifiable, Selectable, Queryable)]
#[diesel(table_name = client_renewals)]
pub struct RenewalEntity {
    pub id: Uuid,
    pub client_id: Uuid,
    pub renewed_at: DateTime<Utc>,
    pub previous_expires_at: DateTime<Utc>,
    pub new_expires_at: DateTime<Utc>,
    pub plan_type: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = client_renewals)]
pub struct InsertRenewalEntity {
    pub client_id: Uuid,
    pub renewed_at: DateTime<Utc>,
    pub previous_expires_at: DateTime<Utc>,
    pub new_expires_at: DateTime<Utc>,
    pub plan_type: String,
}
