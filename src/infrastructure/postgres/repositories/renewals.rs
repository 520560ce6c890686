use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use diesel::{RunQueryDsl, prelude::*};
use uuid::Uuid;

use crate::{
    domain::{
        entities::renewals::{InsertRenewalEntity, RenewalEntity},
        repositories::renewals::RenewalRepository,
    },
    infrastructure::postgres::{postgres_connection::PgPoolSquad, schema::client_renewals},
};

pub struct RenewalPostgres {
    db_pool: Arc<PgPoolSquad>,
}

impl RenewalPostgres {
    pub fn new(db_pool: Arc<PgPoolSquad>) -> Self {
        Self { db_pool }
    }
}

#[async_trait]
impl RenewalRepository for RenewalPostgres {
    async fn append(&self, insert_renewal_entity: InsertRenewalEntity) -> Result<RenewalEntity> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let entity = diesel::insert_into(client_renewals::table)
            .values(&insert_renewal_entity)
            .returning(RenewalEntity::as_returning())
            .get_result::<RenewalEntity>(&mut conn)?;

        Ok(entity)
    }

    async fn list_by_client(&self, client_id: Uuid) -> Result<Vec<RenewalEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let entities = client_renewals::table
            .filter(client_renewals::client_id.eq(client_id))
            .order(client_renewals::renewed_at.desc())
            .select(RenewalEntity::as_select())
            .load::<RenewalEntity>(&mut conn)?;

        Ok(entities)
    }
}
