use anyhow::Result;
use async_trait::async_trait;
use mockall::automock;
use uuid::Uuid;

use crate::domain::entities::renewals::{InsertRenewalEntity, RenewalEntity};

#[async_trait]
#[automock]
pub trait RenewalRepository {
    async fn append(&self, insert_renewal_entity: InsertRenewalEntity) -> Result<RenewalEntity>;
    /// Renewal history for a client, newest first.
    async fn list_by_client(&self, client_id: Uuid) -> Result<Vec<RenewalEntity>>;
}
