use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use serde::Deserialize;
use serde_json::json;
use tracing::info;

use crate::{
    application::usercases::{
        subscriptions::{FeatureGate, SubscriptionUseCase},
        whatsapp::WhatsAppUseCase,
    },
    config::config_model::DotEnvyConfig,
    domain::value_objects::{
        enums::restricted_features::RestrictedFeature, messaging::OutgoingMessage,
    },
    infrastructure::{
        axum_http::{auth::AuthUser, error_responses::error_response},
        gateways::whatsapp::{GatewayError, WhatsAppGatewayClient},
        postgres::{
            postgres_connection::PgPoolSquad,
            repositories::{plans::PlanPostgres, subscriptions::SubscriptionPostgres},
        },
    },
};

pub struct WhatsAppState {
    client: Arc<WhatsAppGatewayClient>,
    usecase: WhatsAppUseCase<WhatsAppGatewayClient>,
    feature_gate: SubscriptionUseCase<SubscriptionPostgres, PlanPostgres>,
}

#[derive(Debug, Deserialize)]
pub struct QrCodeQuery {
    token: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SendBulkBody {
    messages: Vec<OutgoingMessage>,
}

pub fn routes(db_pool: Arc<PgPoolSquad>, config: Arc<DotEnvyConfig>) -> Router {
    let client = Arc::new(WhatsAppGatewayClient::new(
        config.whatsapp_gateway.base_url.clone(),
        config.whatsapp_gateway.admin_token.clone(),
    ));
    let subscription_repository = SubscriptionPostgres::new(Arc::clone(&db_pool));
    let plan_repository = PlanPostgres::new(Arc::clone(&db_pool));

    let state = WhatsAppState {
        usecase: WhatsAppUseCase::new(Arc::clone(&client)),
        client,
        feature_gate: SubscriptionUseCase::new(
            Arc::new(subscription_repository),
            Arc::new(plan_repository),
        ),
    };

    Router::new()
        .route("/instances", get(list_instances))
        .route("/qrcode", get(fetch_qrcode))
        .route("/send-bulk", post(send_bulk))
        .with_state(Arc::new(state))
}

/// Maps gateway failures without leaking credentials or upstream bodies; the
/// upstream HTTP status is preserved so the caller can tell 401 from 500.
fn gateway_error_response(err: GatewayError) -> axum::response::Response {
    match err {
        GatewayError::MissingCredential => error_response(
            StatusCode::INTERNAL_SERVER_ERROR,
            "WhatsApp gateway is not configured".to_string(),
        ),
        GatewayError::Upstream { status, message } => error_response(
            StatusCode::from_u16(status).unwrap_or(StatusCode::BAD_GATEWAY),
            message,
        ),
        GatewayError::Transport(_) => error_response(
            StatusCode::BAD_GATEWAY,
            "WhatsApp gateway is unreachable".to_string(),
        ),
    }
}

pub async fn list_instances(
    State(state): State<Arc<WhatsAppState>>,
    _auth: AuthUser,
) -> impl IntoResponse {
    match state.client.list_instances().await {
        Ok(instances) => Json(json!({
            "success": true,
            "instances": instances,
        }))
        .into_response(),
        Err(err) => gateway_error_response(err),
    }
}

pub async fn fetch_qrcode(
    State(state): State<Arc<WhatsAppState>>,
    _auth: AuthUser,
    Query(query): Query<QrCodeQuery>,
) -> impl IntoResponse {
    let token = match query.token {
        Some(token) if !token.is_empty() => token,
        _ => {
            return error_response(
                StatusCode::BAD_REQUEST,
                "token query parameter is required".to_string(),
            );
        }
    };

    match state.client.fetch_qrcode(&token).await {
        Ok(qrcode) => Json(json!({
            "success": true,
            "qrcode": qrcode.qrcode,
            "pairingCode": qrcode.pairing_code,
        }))
        .into_response(),
        Err(err) => gateway_error_response(err),
    }
}

pub async fn send_bulk(
    State(state): State<Arc<WhatsAppState>>,
    AuthUser { user_id, .. }: AuthUser,
    Json(body): Json<SendBulkBody>,
) -> impl IntoResponse {
    if !state
        .feature_gate
        .can_access(user_id, RestrictedFeature::CanSendWhatsapp)
        .await
    {
        return error_response(
            StatusCode::FORBIDDEN,
            "an active subscription is required for sending WhatsApp messages".to_string(),
        );
    }

    info!(%user_id, total = body.messages.len(), "whatsapp: bulk send request received");
    let report = state.usecase.send_bulk(body.messages).await;
    Json(report).into_response()
}
