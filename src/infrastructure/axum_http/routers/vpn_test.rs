use std::sync::Arc;

use axum::{
    Json, Router, extract::State, http::StatusCode, response::IntoResponse, routing::post,
};

use crate::{
    config::config_model::DotEnvyConfig,
    infrastructure::{
        axum_http::{auth::AuthUser, error_responses::error_response},
        gateways::vpn_test::VpnTestClient,
    },
};

pub fn routes(config: Arc<DotEnvyConfig>) -> Router {
    let client = VpnTestClient::new(
        config.vpn_test_api.api_url.clone(),
        config.vpn_test_api.api_key.clone(),
    );

    Router::new()
        .route("/test-account", post(generate_test_account))
        .with_state(Arc::new(client))
}

/// Proxies test-account creation so the API key never reaches the browser.
/// The upstream JSON payload is returned as-is on success.
pub async fn generate_test_account(
    State(client): State<Arc<VpnTestClient>>,
    _auth: AuthUser,
) -> impl IntoResponse {
    match client.generate_test_account().await {
        Ok(payload) => Json(payload).into_response(),
        Err(_) => error_response(
            StatusCode::INTERNAL_SERVER_ERROR,
            "Failed to generate test account".to_string(),
        ),
    }
}
