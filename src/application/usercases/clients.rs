use std::sync::Arc;

use anyhow::Context;
use chrono::{Months, Utc};
use thiserror::Error;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::{
    application::usercases::{
        expiration::{days_until_expiration, expiration_status, generate_expiration_message},
        subscriptions::FeatureGate,
        vcard::{bulk_export_filename, client_vcard, single_export_filename, vcard_document},
        whatsapp::whatsapp_link,
    },
    domain::{
        entities::{
            clients::{InsertClientEntity, UpdateClientEntity},
            renewals::InsertRenewalEntity,
        },
        repositories::{clients::ClientRepository, renewals::RenewalRepository},
        value_objects::{
            clients::{
                ClientModel, ClientWithStatusModel, InsertClientModel, RenewClientModel,
                RenewalModel, UpdateClientModel,
            },
            enums::restricted_features::RestrictedFeature,
            messaging::ExpirationNoticeDto,
        },
    },
};

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("client not found")]
    NotFound,
    #[error("an active subscription is required for {0}")]
    FeatureBlocked(RestrictedFeature),
    #[error("invalid request: {0}")]
    Validation(String),
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl ClientError {
    pub fn status_code(&self) -> axum::http::StatusCode {
        use axum::http::StatusCode;
        match self {
            ClientError::NotFound => StatusCode::NOT_FOUND,
            ClientError::FeatureBlocked(_) => StatusCode::FORBIDDEN,
            ClientError::Validation(_) => StatusCode::BAD_REQUEST,
            ClientError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

pub type UseCaseResult<T> = std::result::Result<T, ClientError>;

pub struct ClientUseCase<C, R, G>
where
    C: ClientRepository + Send + Sync + 'static,
    R: RenewalRepository + Send + Sync + 'static,
    G: FeatureGate + 'static,
{
    client_repo: Arc<C>,
    renewal_repo: Arc<R>,
    feature_gate: Arc<G>,
}

impl<C, R, G> ClientUseCase<C, R, G>
where
    C: ClientRepository + Send + Sync + 'static,
    R: RenewalRepository + Send + Sync + 'static,
    G: FeatureGate + 'static,
{
    pub fn new(client_repo: Arc<C>, renewal_repo: Arc<R>, feature_gate: Arc<G>) -> Self {
        Self {
            client_repo,
            renewal_repo,
            feature_gate,
        }
    }

    async fn ensure_feature(&self, user_id: Uuid, feature: RestrictedFeature) -> UseCaseResult<()> {
        if self.feature_gate.can_access(user_id, feature).await {
            Ok(())
        } else {
            let err = ClientError::FeatureBlocked(feature);
            warn!(
                %user_id,
                %feature,
                status = err.status_code().as_u16(),
                "clients: feature blocked by subscription gate"
            );
            Err(err)
        }
    }

    pub async fn create(
        &self,
        user_id: Uuid,
        insert_client_model: InsertClientModel,
    ) -> UseCaseResult<ClientModel> {
        self.ensure_feature(user_id, RestrictedFeature::CanCreateClients)
            .await?;

        if insert_client_model.name.trim().is_empty() {
            return Err(ClientError::Validation("name is required".to_string()));
        }
        if insert_client_model.phone.trim().is_empty() {
            return Err(ClientError::Validation("phone is required".to_string()));
        }

        let now = Utc::now();
        let expires_at = now
            .checked_add_months(Months::new(
                insert_client_model.plan_type.duration_months(),
            ))
            .context("failed to compute client expiration date")?;

        let entity = self
            .client_repo
            .create(InsertClientEntity {
                user_id,
                name: insert_client_model.name,
                phone: insert_client_model.phone,
                email: insert_client_model.email,
                service_type: insert_client_model.service_type.to_string(),
                plan_type: insert_client_model.plan_type.to_string(),
                price_minor: insert_client_model.price_minor,
                username: insert_client_model.username,
                password: insert_client_model.password,
                device: insert_client_model.device,
                app: insert_client_model.app,
                notes: insert_client_model.notes,
                expires_at,
            })
            .await
            .map_err(|err| {
                error!(%user_id, db_error = ?err, "clients: failed to create client");
                ClientError::Internal(err)
            })?;

        info!(%user_id, client_id = %entity.id, "clients: client created");
        Ok(ClientModel::from(entity))
    }

    pub async fn list(&self, user_id: Uuid) -> UseCaseResult<Vec<ClientWithStatusModel>> {
        let now = Utc::now();
        let clients = self
            .client_repo
            .list_by_user(user_id)
            .await
            .map_err(|err| {
                error!(%user_id, db_error = ?err, "clients: failed to list clients");
                ClientError::Internal(err)
            })?;

        Ok(clients
            .into_iter()
            .map(ClientModel::from)
            .map(|client| {
                let days_remaining = days_until_expiration(client.expires_at, now);
                let status = expiration_status(client.expires_at, now);
                ClientWithStatusModel {
                    client,
                    expiration_status: status,
                    days_remaining,
                }
            })
            .collect())
    }

    pub async fn get(&self, user_id: Uuid, client_id: Uuid) -> UseCaseResult<ClientModel> {
        let entity = self
            .client_repo
            .find_by_id(user_id, client_id)
            .await
            .map_err(|err| {
                error!(%user_id, %client_id, db_error = ?err, "clients: failed to load client");
                ClientError::Internal(err)
            })?
            .ok_or(ClientError::NotFound)?;

        Ok(ClientModel::from(entity))
    }

    pub async fn update(
        &self,
        user_id: Uuid,
        client_id: Uuid,
        update_client_model: UpdateClientModel,
    ) -> UseCaseResult<ClientModel> {
        self.ensure_feature(user_id, RestrictedFeature::CanEditClients)
            .await?;

        // An empty changeset is a diesel error, not a no-op.
        if update_client_model.is_empty() {
            return Err(ClientError::Validation("no fields to update".to_string()));
        }

        self.get(user_id, client_id).await?;

        let entity = self
            .client_repo
            .update(
                user_id,
                client_id,
                UpdateClientEntity {
                    name: update_client_model.name,
                    phone: update_client_model.phone,
                    email: update_client_model.email.map(Some),
                    service_type: update_client_model
                        .service_type
                        .map(|service| service.to_string()),
                    plan_type: update_client_model.plan_type.map(|plan| plan.to_string()),
                    price_minor: update_client_model.price_minor.map(Some),
                    username: update_client_model.username.map(Some),
                    password: update_client_model.password.map(Some),
                    device: update_client_model.device.map(Some),
                    app: update_client_model.app.map(Some),
                    notes: update_client_model.notes.map(Some),
                    // Expiration only moves through renewal.
                    expires_at: None,
                },
            )
            .await
            .map_err(|err| {
                error!(%user_id, %client_id, db_error = ?err, "clients: failed to update client");
                ClientError::Internal(err)
            })?;

        info!(%user_id, %client_id, "clients: client updated");
        Ok(ClientModel::from(entity))
    }

    pub async fn delete(&self, user_id: Uuid, client_id: Uuid) -> UseCaseResult<()> {
        self.ensure_feature(user_id, RestrictedFeature::CanDeleteClients)
            .await?;
        self.get(user_id, client_id).await?;

        self.client_repo
            .delete(user_id, client_id)
            .await
            .map_err(|err| {
                error!(%user_id, %client_id, db_error = ?err, "clients: failed to delete client");
                ClientError::Internal(err)
            })?;

        info!(%user_id, %client_id, "clients: client deleted");
        Ok(())
    }

    /// Renews a client: the new expiration is the renewal instant plus the
    /// plan duration in months, never recomputed from history afterwards.
    /// Appends one renewal row before moving the client forward.
    pub async fn renew(
        &self,
        user_id: Uuid,
        client_id: Uuid,
        renew_client_model: RenewClientModel,
    ) -> UseCaseResult<ClientModel> {
        self.ensure_feature(user_id, RestrictedFeature::CanEditClients)
            .await?;
        let client = self.get(user_id, client_id).await?;

        let renewed_at = renew_client_model.renewed_at.unwrap_or_else(Utc::now);
        let plan_type = renew_client_model.plan_type;
        let new_expires_at = renewed_at
            .checked_add_months(Months::new(plan_type.duration_months()))
            .context("failed to compute renewed expiration date")?;

        self.renewal_repo
            .append(InsertRenewalEntity {
                client_id,
                renewed_at,
                previous_expires_at: client.expires_at,
                new_expires_at,
                plan_type: plan_type.to_string(),
            })
            .await
            .map_err(|err| {
                error!(%user_id, %client_id, db_error = ?err, "clients: failed to record renewal");
                ClientError::Internal(err)
            })?;

        let entity = self
            .client_repo
            .set_expiration(client_id, plan_type.to_string(), new_expires_at)
            .await
            .map_err(|err| {
                error!(%user_id, %client_id, db_error = ?err, "clients: failed to apply renewal");
                ClientError::Internal(err)
            })?;

        info!(
            %user_id,
            %client_id,
            plan_type = %plan_type,
            new_expires_at = %new_expires_at,
            "clients: client renewed"
        );
        Ok(ClientModel::from(entity))
    }

    pub async fn renewal_history(
        &self,
        user_id: Uuid,
        client_id: Uuid,
    ) -> UseCaseResult<Vec<RenewalModel>> {
        self.get(user_id, client_id).await?;

        let renewals = self
            .renewal_repo
            .list_by_client(client_id)
            .await
            .map_err(|err| {
                error!(%user_id, %client_id, db_error = ?err, "clients: failed to load renewals");
                ClientError::Internal(err)
            })?;

        Ok(renewals.into_iter().map(RenewalModel::from).collect())
    }

    /// Single-client vCard download: `(filename, document)`.
    pub async fn export_vcard(
        &self,
        user_id: Uuid,
        client_id: Uuid,
    ) -> UseCaseResult<(String, String)> {
        self.ensure_feature(user_id, RestrictedFeature::CanExportContacts)
            .await?;
        let client = self.get(user_id, client_id).await?;

        let filename = single_export_filename(&client.name);
        let document = vcard_document(&[client_vcard(&client)]);
        Ok((filename, document))
    }

    /// Bulk vCard download of every client: `(filename, document)`.
    pub async fn export_all_vcards(&self, user_id: Uuid) -> UseCaseResult<(String, String)> {
        self.ensure_feature(user_id, RestrictedFeature::CanExportContacts)
            .await?;

        let clients = self
            .client_repo
            .list_by_user(user_id)
            .await
            .map_err(|err| {
                error!(%user_id, db_error = ?err, "clients: failed to load clients for export");
                ClientError::Internal(err)
            })?;

        let cards: Vec<String> = clients
            .into_iter()
            .map(ClientModel::from)
            .map(|client| client_vcard(&client))
            .collect();

        let filename = bulk_export_filename(Utc::now().date_naive());
        Ok((filename, vcard_document(&cards)))
    }

    /// Expiration notice for one client: rendered message text plus the
    /// WhatsApp deep link carrying it.
    pub async fn expiration_notice(
        &self,
        user_id: Uuid,
        client_id: Uuid,
        template: Option<String>,
        plan_price_minor: Option<i32>,
    ) -> UseCaseResult<ExpirationNoticeDto> {
        let client = self.get(user_id, client_id).await?;

        let now = Utc::now();
        let days_remaining = days_until_expiration(client.expires_at, now);
        let plan_name = client.plan_type.display_name_pt_br();
        let message = generate_expiration_message(
            &client,
            plan_name,
            days_remaining,
            template.as_deref(),
            plan_price_minor,
        );
        let link = whatsapp_link(&client.phone, &message);

        Ok(ExpirationNoticeDto {
            client_id,
            days_remaining,
            expiration_status: expiration_status(client.expires_at, now),
            message,
            whatsapp_link: link,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        application::usercases::subscriptions::MockFeatureGate,
        domain::{
            entities::clients::ClientEntity,
            repositories::{clients::MockClientRepository, renewals::MockRenewalRepository},
            value_objects::enums::{plan_types::PlanType, service_types::ServiceType},
        },
    };
    use chrono::{DateTime, Duration};
    use mockall::predicate::{always, eq};

    fn sample_entity(user_id: Uuid, expires_at: DateTime<Utc>) -> ClientEntity {
        ClientEntity {
            id: Uuid::new_v4(),
            user_id,
            name: "Ana".to_string(),
            phone: "(11) 91234-5678".to_string(),
            email: None,
            service_type: "iptv".to_string(),
            plan_type: "monthly".to_string(),
            price_minor: None,
            username: None,
            password: None,
            device: None,
            app: None,
            notes: None,
            created_at: expires_at - Duration::days(30),
            expires_at,
        }
    }

    fn allowing_gate() -> MockFeatureGate {
        let mut gate = MockFeatureGate::new();
        gate.expect_can_access()
            .returning(|_, _| Box::pin(async { true }));
        gate
    }

    #[tokio::test]
    async fn create_is_blocked_without_subscription() {
        let user_id = Uuid::new_v4();
        let client_repo = MockClientRepository::new();
        let renewal_repo = MockRenewalRepository::new();
        let mut gate = MockFeatureGate::new();
        gate.expect_can_access()
            .with(eq(user_id), eq(RestrictedFeature::CanCreateClients))
            .returning(|_, _| Box::pin(async { false }));

        let usecase = ClientUseCase::new(
            Arc::new(client_repo),
            Arc::new(renewal_repo),
            Arc::new(gate),
        );

        let result = usecase
            .create(
                user_id,
                InsertClientModel {
                    name: "Ana".to_string(),
                    phone: "11912345678".to_string(),
                    email: None,
                    service_type: ServiceType::Iptv,
                    plan_type: PlanType::Monthly,
                    price_minor: None,
                    username: None,
                    password: None,
                    device: None,
                    app: None,
                    notes: None,
                },
            )
            .await;

        assert!(matches!(
            result,
            Err(ClientError::FeatureBlocked(RestrictedFeature::CanCreateClients))
        ));
    }

    #[tokio::test]
    async fn create_rejects_blank_name() {
        let user_id = Uuid::new_v4();
        let client_repo = MockClientRepository::new();
        let renewal_repo = MockRenewalRepository::new();

        let usecase = ClientUseCase::new(
            Arc::new(client_repo),
            Arc::new(renewal_repo),
            Arc::new(allowing_gate()),
        );

        let result = usecase
            .create(
                user_id,
                InsertClientModel {
                    name: "   ".to_string(),
                    phone: "11912345678".to_string(),
                    email: None,
                    service_type: ServiceType::Iptv,
                    plan_type: PlanType::Monthly,
                    price_minor: None,
                    username: None,
                    password: None,
                    device: None,
                    app: None,
                    notes: None,
                },
            )
            .await;

        assert!(matches!(result, Err(ClientError::Validation(_))));
    }

    #[tokio::test]
    async fn renew_extends_from_renewal_date_and_records_history() {
        let user_id = Uuid::new_v4();
        let renewed_at = Utc::now();
        let previous_expires_at = renewed_at - Duration::days(10);
        let expected_expires_at = renewed_at.checked_add_months(Months::new(3)).unwrap();

        let entity = sample_entity(user_id, previous_expires_at);
        let client_id = entity.id;

        let mut client_repo = MockClientRepository::new();
        let mut renewal_repo = MockRenewalRepository::new();

        let found = entity.clone();
        client_repo
            .expect_find_by_id()
            .with(eq(user_id), eq(client_id))
            .returning(move |_, _| {
                let entity = found.clone();
                Box::pin(async move { Ok(Some(entity)) })
            });

        renewal_repo
            .expect_append()
            .withf(move |insert| {
                insert.client_id == client_id
                    && insert.previous_expires_at == previous_expires_at
                    && insert.new_expires_at == expected_expires_at
                    && insert.plan_type == "quarterly"
            })
            .times(1)
            .returning(|insert| {
                Box::pin(async move {
                    Ok(crate::domain::entities::renewals::RenewalEntity {
                        id: Uuid::new_v4(),
                        client_id: insert.client_id,
                        renewed_at: insert.renewed_at,
                        previous_expires_at: insert.previous_expires_at,
                        new_expires_at: insert.new_expires_at,
                        plan_type: insert.plan_type,
                        created_at: Utc::now(),
                    })
                })
            });

        let renewed_entity = {
            let mut entity = entity.clone();
            entity.plan_type = "quarterly".to_string();
            entity.expires_at = expected_expires_at;
            entity
        };
        client_repo
            .expect_set_expiration()
            .with(eq(client_id), eq("quarterly".to_string()), eq(expected_expires_at))
            .times(1)
            .returning(move |_, _, _| {
                let entity = renewed_entity.clone();
                Box::pin(async move { Ok(entity) })
            });

        let usecase = ClientUseCase::new(
            Arc::new(client_repo),
            Arc::new(renewal_repo),
            Arc::new(allowing_gate()),
        );

        let client = usecase
            .renew(
                user_id,
                client_id,
                RenewClientModel {
                    plan_type: PlanType::Quarterly,
                    renewed_at: Some(renewed_at),
                },
            )
            .await
            .unwrap();

        assert_eq!(client.expires_at, expected_expires_at);
        assert_eq!(client.plan_type, PlanType::Quarterly);
    }

    #[tokio::test]
    async fn list_annotates_expiration_state() {
        let user_id = Uuid::new_v4();
        let expired = sample_entity(user_id, Utc::now() - Duration::days(3));
        let active = sample_entity(user_id, Utc::now() + Duration::days(30));

        let mut client_repo = MockClientRepository::new();
        let renewal_repo = MockRenewalRepository::new();

        let rows = vec![expired, active];
        client_repo
            .expect_list_by_user()
            .with(eq(user_id))
            .returning(move |_| {
                let rows = rows.clone();
                Box::pin(async move { Ok(rows) })
            });

        let usecase = ClientUseCase::new(
            Arc::new(client_repo),
            Arc::new(renewal_repo),
            Arc::new(allowing_gate()),
        );

        let clients = usecase.list(user_id).await.unwrap();
        assert_eq!(clients.len(), 2);
        assert!(clients[0].days_remaining < 0);
        assert!(clients[1].days_remaining > 7);
    }

    #[tokio::test]
    async fn missing_client_is_not_found() {
        let user_id = Uuid::new_v4();
        let client_id = Uuid::new_v4();

        let mut client_repo = MockClientRepository::new();
        let renewal_repo = MockRenewalRepository::new();

        client_repo
            .expect_find_by_id()
            .with(eq(user_id), eq(client_id))
            .returning(|_, _| Box::pin(async { Ok(None) }));

        let usecase = ClientUseCase::new(
            Arc::new(client_repo),
            Arc::new(renewal_repo),
            Arc::new(allowing_gate()),
        );

        assert!(matches!(
            usecase.get(user_id, client_id).await,
            Err(ClientError::NotFound)
        ));
    }

    #[tokio::test]
    async fn update_with_no_fields_is_rejected() {
        let user_id = Uuid::new_v4();
        let client_repo = MockClientRepository::new();
        let renewal_repo = MockRenewalRepository::new();

        let usecase = ClientUseCase::new(
            Arc::new(client_repo),
            Arc::new(renewal_repo),
            Arc::new(allowing_gate()),
        );

        let result = usecase
            .update(user_id, Uuid::new_v4(), UpdateClientModel::default())
            .await;

        assert!(matches!(result, Err(ClientError::Validation(_))));
    }

    #[tokio::test]
    async fn export_is_blocked_without_subscription() {
        let user_id = Uuid::new_v4();
        let client_repo = MockClientRepository::new();
        let renewal_repo = MockRenewalRepository::new();
        let mut gate = MockFeatureGate::new();
        gate.expect_can_access()
            .with(eq(user_id), eq(RestrictedFeature::CanExportContacts))
            .returning(|_, _| Box::pin(async { false }));

        let usecase = ClientUseCase::new(
            Arc::new(client_repo),
            Arc::new(renewal_repo),
            Arc::new(gate),
        );

        assert!(matches!(
            usecase.export_all_vcards(user_id).await,
            Err(ClientError::FeatureBlocked(RestrictedFeature::CanExportContacts))
        ));
    }

    #[tokio::test]
    async fn single_export_names_file_after_client() {
        let user_id = Uuid::new_v4();
        let mut entity = sample_entity(user_id, Utc::now() + Duration::days(30));
        entity.name = "Ana Souza".to_string();
        let client_id = entity.id;

        let mut client_repo = MockClientRepository::new();
        let renewal_repo = MockRenewalRepository::new();
        client_repo
            .expect_find_by_id()
            .with(eq(user_id), eq(client_id))
            .returning(move |_, _| {
                let entity = entity.clone();
                Box::pin(async move { Ok(Some(entity)) })
            });

        let usecase = ClientUseCase::new(
            Arc::new(client_repo),
            Arc::new(renewal_repo),
            Arc::new(allowing_gate()),
        );

        let (filename, document) = usecase.export_vcard(user_id, client_id).await.unwrap();
        assert_eq!(filename, "Ana_Souza.vcf");
        assert!(document.contains("FN:Ana Souza"));
        assert!(document.ends_with("END:VCARD\r\n"));
    }

    #[tokio::test]
    async fn expiration_notice_builds_message_and_link() {
        let user_id = Uuid::new_v4();
        let entity = sample_entity(user_id, Utc::now() + Duration::days(5));
        let client_id = entity.id;

        let mut client_repo = MockClientRepository::new();
        let renewal_repo = MockRenewalRepository::new();

        client_repo
            .expect_find_by_id()
            .with(eq(user_id), always())
            .returning(move |_, _| {
                let entity = entity.clone();
                Box::pin(async move { Ok(Some(entity)) })
            });

        let usecase = ClientUseCase::new(
            Arc::new(client_repo),
            Arc::new(renewal_repo),
            Arc::new(allowing_gate()),
        );

        let notice = usecase
            .expiration_notice(user_id, client_id, None, None)
            .await
            .unwrap();

        assert_eq!(notice.days_remaining, 5);
        assert!(notice.message.contains("Ana"));
        assert!(notice.whatsapp_link.starts_with("https://wa.me/5511912345678?text="));
    }
}
