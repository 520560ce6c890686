use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use mockall::automock;
use uuid::Uuid;

use crate::domain::entities::clients::{ClientEntity, InsertClientEntity, UpdateClientEntity};

#[async_trait]
#[automock]
pub trait ClientRepository {
    async fn create(&self, insert_client_entity: InsertClientEntity) -> Result<ClientEntity>;
    async fn find_by_id(&self, user_id: Uuid, client_id: Uuid) -> Result<Option<ClientEntity>>;
    async fn list_by_user(&self, user_id: Uuid) -> Result<Vec<ClientEntity>>;
    async fn update(
        &self,
        user_id: Uuid,
        client_id: Uuid,
        update_client_entity: UpdateClientEntity,
    ) -> Result<ClientEntity>;
    async fn set_expiration(
        &self,
        client_id: Uuid,
        plan_type: String,
        expires_at: DateTime<Utc>,
    ) -> Result<ClientEntity>;
    async fn delete(&self, user_id: Uuid, client_id: Uuid) -> Result<()>;
}
