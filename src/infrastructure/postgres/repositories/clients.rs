use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::{OptionalExtension, RunQueryDsl, prelude::*};
use uuid::Uuid;

use crate::{
    domain::{
        entities::clients::{ClientEntity, InsertClientEntity, UpdateClientEntity},
        repositories::clients::ClientRepository,
    },
    infrastructure::postgres::{postgres_connection::PgPoolSquad, schema::clients},
};

pub struct ClientPostgres {
    db_pool: Arc<PgPoolSquad>,
}

impl ClientPostgres {
    pub fn new(db_pool: Arc<PgPoolSquad>) -> Self {
        Self { db_pool }
    }
}

#[async_trait]
impl ClientRepository for ClientPostgres {
    async fn create(&self, insert_client_entity: InsertClientEntity) -> Result<ClientEntity> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let entity = diesel::insert_into(clients::table)
            .values(&insert_client_entity)
            .returning(ClientEntity::as_returning())
            .get_result::<ClientEntity>(&mut conn)?;

        Ok(entity)
    }

    async fn find_by_id(&self, user_id: Uuid, client_id: Uuid) -> Result<Option<ClientEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let entity = clients::table
            .filter(clients::id.eq(client_id))
            .filter(clients::user_id.eq(user_id))
            .select(ClientEntity::as_select())
            .first::<ClientEntity>(&mut conn)
            .optional()?;

        Ok(entity)
    }

    async fn list_by_user(&self, user_id: Uuid) -> Result<Vec<ClientEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let entities = clients::table
            .filter(clients::user_id.eq(user_id))
            .order(clients::expires_at.asc())
            .select(ClientEntity::as_select())
            .load::<ClientEntity>(&mut conn)?;

        Ok(entities)
    }

    async fn update(
        &self,
        user_id: Uuid,
        client_id: Uuid,
        update_client_entity: UpdateClientEntity,
    ) -> Result<ClientEntity> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let entity = diesel::update(
            clients::table
                .filter(clients::id.eq(client_id))
                .filter(clients::user_id.eq(user_id)),
        )
        .set(&update_client_entity)
        .returning(ClientEntity::as_returning())
        .get_result::<ClientEntity>(&mut conn)?;

        Ok(entity)
    }

    async fn set_expiration(
        &self,
        client_id: Uuid,
        plan_type: String,
        expires_at: DateTime<Utc>,
    ) -> Result<ClientEntity> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let entity = diesel::update(clients::table.filter(clients::id.eq(client_id)))
            .set((
                clients::plan_type.eq(plan_type),
                clients::expires_at.eq(expires_at),
            ))
            .returning(ClientEntity::as_returning())
            .get_result::<ClientEntity>(&mut conn)?;

        Ok(entity)
    }

    async fn delete(&self, user_id: Uuid, client_id: Uuid) -> Result<()> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        diesel::delete(
            clients::table
                .filter(clients::id.eq(client_id))
                .filter(clients::user_id.eq(user_id)),
        )
        .execute(&mut conn)?;

        Ok(())
    }
}
