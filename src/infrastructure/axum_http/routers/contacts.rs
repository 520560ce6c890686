use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, State},
    http::{StatusCode, header},
    response::IntoResponse,
    routing::get,
};
use tracing::info;
use uuid::Uuid;

use crate::{
    application::usercases::{
        contacts::ContactsUseCase,
        subscriptions::{FeatureGate, SubscriptionUseCase},
    },
    config::config_model::DotEnvyConfig,
    domain::value_objects::{
        contacts::{InsertContactModel, UpdateContactModel},
        enums::restricted_features::RestrictedFeature,
    },
    infrastructure::{
        axum_http::{auth::AuthUser, error_responses::error_response},
        postgres::{
            postgres_connection::PgPoolSquad,
            repositories::{plans::PlanPostgres, subscriptions::SubscriptionPostgres},
        },
        storage::contacts_file::JsonFileContactStore,
    },
};

pub struct ContactsState {
    usecase: ContactsUseCase<JsonFileContactStore>,
    feature_gate: SubscriptionUseCase<SubscriptionPostgres, PlanPostgres>,
}

pub fn routes(db_pool: Arc<PgPoolSquad>, config: Arc<DotEnvyConfig>) -> Router {
    let store = JsonFileContactStore::new(config.contacts_store.file_path.clone());
    let subscription_repository = SubscriptionPostgres::new(Arc::clone(&db_pool));
    let plan_repository = PlanPostgres::new(Arc::clone(&db_pool));

    let state = ContactsState {
        usecase: ContactsUseCase::new(Arc::new(store)),
        feature_gate: SubscriptionUseCase::new(
            Arc::new(subscription_repository),
            Arc::new(plan_repository),
        ),
    };

    Router::new()
        .route("/", get(list_contacts).post(create_contact))
        .route("/export/vcard", get(export_vcards))
        .route("/:contact_id", axum::routing::put(update_contact).delete(delete_contact))
        .with_state(Arc::new(state))
}

pub async fn list_contacts(
    State(state): State<Arc<ContactsState>>,
    _auth: AuthUser,
) -> impl IntoResponse {
    match state.usecase.list().await {
        Ok(contacts) => Json(contacts).into_response(),
        Err(err) => err.into_response(),
    }
}

pub async fn create_contact(
    State(state): State<Arc<ContactsState>>,
    _auth: AuthUser,
    Json(insert_contact_model): Json<InsertContactModel>,
) -> impl IntoResponse {
    match state.usecase.create(insert_contact_model).await {
        Ok(contact) => (StatusCode::CREATED, Json(contact)).into_response(),
        Err(err) => err.into_response(),
    }
}

pub async fn update_contact(
    State(state): State<Arc<ContactsState>>,
    _auth: AuthUser,
    Path(contact_id): Path<Uuid>,
    Json(update_contact_model): Json<UpdateContactModel>,
) -> impl IntoResponse {
    match state.usecase.update(contact_id, update_contact_model).await {
        Ok(contact) => Json(contact).into_response(),
        Err(err) => err.into_response(),
    }
}

pub async fn delete_contact(
    State(state): State<Arc<ContactsState>>,
    _auth: AuthUser,
    Path(contact_id): Path<Uuid>,
) -> impl IntoResponse {
    match state.usecase.delete(contact_id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => err.into_response(),
    }
}

pub async fn export_vcards(
    State(state): State<Arc<ContactsState>>,
    AuthUser { user_id, .. }: AuthUser,
) -> impl IntoResponse {
    if !state
        .feature_gate
        .can_access(user_id, RestrictedFeature::CanExportContacts)
        .await
    {
        return error_response(
            StatusCode::FORBIDDEN,
            "an active subscription is required for exporting contacts".to_string(),
        );
    }

    info!(%user_id, "contacts: vcard export request received");
    match state.usecase.export_vcards().await {
        Ok((filename, document)) => (
            [
                (header::CONTENT_TYPE, "text/vcard; charset=utf-8".to_string()),
                (
                    header::CONTENT_DISPOSITION,
                    format!("attachment; filename=\"{}\"", filename),
                ),
            ],
            document,
        )
            .into_response(),
        Err(err) => err.into_response(),
    }
}
