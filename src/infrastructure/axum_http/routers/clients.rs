use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::header,
    response::IntoResponse,
    routing::{get, post},
};
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;

use crate::{
    application::usercases::{
        clients::ClientUseCase,
        subscriptions::{FeatureGate, SubscriptionUseCase},
    },
    domain::{
        repositories::{clients::ClientRepository, renewals::RenewalRepository},
        value_objects::clients::{InsertClientModel, RenewClientModel, UpdateClientModel},
    },
    infrastructure::{
        axum_http::auth::AuthUser,
        postgres::{
            postgres_connection::PgPoolSquad,
            repositories::{
                clients::ClientPostgres, plans::PlanPostgres, renewals::RenewalPostgres,
                subscriptions::SubscriptionPostgres,
            },
        },
    },
};

#[derive(Debug, Deserialize)]
pub struct ExpirationNoticeQuery {
    template: Option<String>,
    price_minor: Option<i32>,
}

pub fn routes(db_pool: Arc<PgPoolSquad>) -> Router {
    let client_repository = ClientPostgres::new(Arc::clone(&db_pool));
    let renewal_repository = RenewalPostgres::new(Arc::clone(&db_pool));
    let subscription_repository = SubscriptionPostgres::new(Arc::clone(&db_pool));
    let plan_repository = PlanPostgres::new(Arc::clone(&db_pool));

    let feature_gate =
        SubscriptionUseCase::new(Arc::new(subscription_repository), Arc::new(plan_repository));
    let clients_usecase = ClientUseCase::new(
        Arc::new(client_repository),
        Arc::new(renewal_repository),
        Arc::new(feature_gate),
    );

    Router::new()
        .route("/", get(list_clients).post(create_client))
        .route("/export/vcard", get(export_all_vcards))
        .route(
            "/:client_id",
            get(get_client).put(update_client).delete(delete_client),
        )
        .route("/:client_id/renew", post(renew_client))
        .route("/:client_id/renewals", get(list_renewals))
        .route("/:client_id/vcard", get(export_vcard))
        .route("/:client_id/expiration-notice", get(expiration_notice))
        .with_state(Arc::new(clients_usecase))
}

fn vcard_response(filename: String, document: String) -> axum::response::Response {
    (
        [
            (header::CONTENT_TYPE, "text/vcard; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", filename),
            ),
        ],
        document,
    )
        .into_response()
}

pub async fn list_clients<C, R, G>(
    State(clients_usecase): State<Arc<ClientUseCase<C, R, G>>>,
    AuthUser { user_id, .. }: AuthUser,
) -> impl IntoResponse
where
    C: ClientRepository + Send + Sync + 'static,
    R: RenewalRepository + Send + Sync + 'static,
    G: FeatureGate + 'static,
{
    match clients_usecase.list(user_id).await {
        Ok(clients) => Json(clients).into_response(),
        Err(err) => err.into_response(),
    }
}

pub async fn create_client<C, R, G>(
    State(clients_usecase): State<Arc<ClientUseCase<C, R, G>>>,
    AuthUser { user_id, .. }: AuthUser,
    Json(insert_client_model): Json<InsertClientModel>,
) -> impl IntoResponse
where
    C: ClientRepository + Send + Sync + 'static,
    R: RenewalRepository + Send + Sync + 'static,
    G: FeatureGate + 'static,
{
    info!(%user_id, "clients: create request received");
    match clients_usecase.create(user_id, insert_client_model).await {
        Ok(client) => (axum::http::StatusCode::CREATED, Json(client)).into_response(),
        Err(err) => err.into_response(),
    }
}

pub async fn get_client<C, R, G>(
    State(clients_usecase): State<Arc<ClientUseCase<C, R, G>>>,
    AuthUser { user_id, .. }: AuthUser,
    Path(client_id): Path<Uuid>,
) -> impl IntoResponse
where
    C: ClientRepository + Send + Sync + 'static,
    R: RenewalRepository + Send + Sync + 'static,
    G: FeatureGate + 'static,
{
    match clients_usecase.get(user_id, client_id).await {
        Ok(client) => Json(client).into_response(),
        Err(err) => err.into_response(),
    }
}

pub async fn update_client<C, R, G>(
    State(clients_usecase): State<Arc<ClientUseCase<C, R, G>>>,
    AuthUser { user_id, .. }: AuthUser,
    Path(client_id): Path<Uuid>,
    Json(update_client_model): Json<UpdateClientModel>,
) -> impl IntoResponse
where
    C: ClientRepository + Send + Sync + 'static,
    R: RenewalRepository + Send + Sync + 'static,
    G: FeatureGate + 'static,
{
    match clients_usecase
        .update(user_id, client_id, update_client_model)
        .await
    {
        Ok(client) => Json(client).into_response(),
        Err(err) => err.into_response(),
    }
}

pub async fn delete_client<C, R, G>(
    State(clients_usecase): State<Arc<ClientUseCase<C, R, G>>>,
    AuthUser { user_id, .. }: AuthUser,
    Path(client_id): Path<Uuid>,
) -> impl IntoResponse
where
    C: ClientRepository + Send + Sync + 'static,
    R: RenewalRepository + Send + Sync + 'static,
    G: FeatureGate + 'static,
{
    match clients_usecase.delete(user_id, client_id).await {
        Ok(()) => axum::http::StatusCode::NO_CONTENT.into_response(),
        Err(err) => err.into_response(),
    }
}

pub async fn renew_client<C, R, G>(
    State(clients_usecase): State<Arc<ClientUseCase<C, R, G>>>,
    AuthUser { user_id, .. }: AuthUser,
    Path(client_id): Path<Uuid>,
    Json(renew_client_model): Json<RenewClientModel>,
) -> impl IntoResponse
where
    C: ClientRepository + Send + Sync + 'static,
    R: RenewalRepository + Send + Sync + 'static,
    G: FeatureGate + 'static,
{
    info!(%user_id, %client_id, "clients: renew request received");
    match clients_usecase
        .renew(user_id, client_id, renew_client_model)
        .await
    {
        Ok(client) => Json(client).into_response(),
        Err(err) => err.into_response(),
    }
}

pub async fn list_renewals<C, R, G>(
    State(clients_usecase): State<Arc<ClientUseCase<C, R, G>>>,
    AuthUser { user_id, .. }: AuthUser,
    Path(client_id): Path<Uuid>,
) -> impl IntoResponse
where
    C: ClientRepository + Send + Sync + 'static,
    R: RenewalRepository + Send + Sync + 'static,
    G: FeatureGate + 'static,
{
    match clients_usecase.renewal_history(user_id, client_id).await {
        Ok(renewals) => Json(renewals).into_response(),
        Err(err) => err.into_response(),
    }
}

pub async fn export_vcard<C, R, G>(
    State(clients_usecase): State<Arc<ClientUseCase<C, R, G>>>,
    AuthUser { user_id, .. }: AuthUser,
    Path(client_id): Path<Uuid>,
) -> impl IntoResponse
where
    C: ClientRepository + Send + Sync + 'static,
    R: RenewalRepository + Send + Sync + 'static,
    G: FeatureGate + 'static,
{
    match clients_usecase.export_vcard(user_id, client_id).await {
        Ok((filename, document)) => vcard_response(filename, document),
        Err(err) => err.into_response(),
    }
}

pub async fn export_all_vcards<C, R, G>(
    State(clients_usecase): State<Arc<ClientUseCase<C, R, G>>>,
    AuthUser { user_id, .. }: AuthUser,
) -> impl IntoResponse
where
    C: ClientRepository + Send + Sync + 'static,
    R: RenewalRepository + Send + Sync + 'static,
    G: FeatureGate + 'static,
{
    info!(%user_id, "clients: bulk vcard export request received");
    match clients_usecase.export_all_vcards(user_id).await {
        Ok((filename, document)) => vcard_response(filename, document),
        Err(err) => err.into_response(),
    }
}

pub async fn expiration_notice<C, R, G>(
    State(clients_usecase): State<Arc<ClientUseCase<C, R, G>>>,
    AuthUser { user_id, .. }: AuthUser,
    Path(client_id): Path<Uuid>,
    Query(query): Query<ExpirationNoticeQuery>,
) -> impl IntoResponse
where
    C: ClientRepository + Send + Sync + 'static,
    R: RenewalRepository + Send + Sync + 'static,
    G: FeatureGate + 'static,
{
    match clients_usecase
        .expiration_notice(user_id, client_id, query.template, query.price_minor)
        .await
    {
        Ok(notice) => Json(notice).into_response(),
        Err(err) => err.into_response(),
    }
}
