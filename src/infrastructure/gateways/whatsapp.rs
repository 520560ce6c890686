use anyhow::{Result, anyhow};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::error;

use crate::application::usercases::whatsapp::MessageGateway;

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("gateway credential is not configured")]
    MissingCredential,
    #[error("upstream returned status {status}: {message}")]
    Upstream { status: u16, message: String },
    #[error(transparent)]
    Transport(#[from] anyhow::Error),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QrCodeResponse {
    pub qrcode: Option<String>,
    #[serde(rename = "pairingCode")]
    pub pairing_code: Option<String>,
}

/// Minimal WhatsApp gateway client built on reqwest. The admin token stays
/// server-side; browsers only ever talk to our proxy endpoints.
pub struct WhatsAppGatewayClient {
    http: reqwest::Client,
    base_url: String,
    admin_token: String,
}

impl WhatsAppGatewayClient {
    pub fn new(base_url: String, admin_token: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url,
            admin_token,
        }
    }

    fn ensure_credential(&self) -> Result<(), GatewayError> {
        if self.admin_token.is_empty() {
            error!("whatsapp gateway: admin token is not configured");
            return Err(GatewayError::MissingCredential);
        }
        Ok(())
    }

    async fn check_status(resp: reqwest::Response, context: &str) -> Result<reqwest::Response, GatewayError> {
        if resp.status().is_success() {
            return Ok(resp);
        }

        let status = resp.status().as_u16();
        let body = match resp.text().await {
            Ok(text) if !text.is_empty() => text,
            Ok(_) => "<empty response body>".to_string(),
            Err(err) => format!("<failed to read response body: {err}>"),
        };

        error!(
            status,
            response_body = %body,
            context = %context,
            "whatsapp gateway request failed"
        );

        Err(GatewayError::Upstream {
            status,
            message: format!("whatsapp gateway request failed: {}", context),
        })
    }

    /// Lists the connected gateway instances for the admin account.
    pub async fn list_instances(&self) -> Result<Vec<Value>, GatewayError> {
        self.ensure_credential()?;

        let resp = self
            .http
            .get(format!("{}/instance/fetchInstances", self.base_url))
            .header("apikey", &self.admin_token)
            .send()
            .await
            .map_err(|err| GatewayError::Transport(anyhow!(err)))?;
        let resp = Self::check_status(resp, "list instances").await?;

        let instances: Vec<Value> = resp
            .json()
            .await
            .map_err(|err| GatewayError::Transport(anyhow!(err)))?;
        Ok(instances)
    }

    /// Fetches the pairing QR code for one instance token.
    pub async fn fetch_qrcode(&self, token: &str) -> Result<QrCodeResponse, GatewayError> {
        let resp = self
            .http
            .get(format!("{}/instance/connect", self.base_url))
            .header("apikey", token)
            .send()
            .await
            .map_err(|err| GatewayError::Transport(anyhow!(err)))?;
        let resp = Self::check_status(resp, "fetch qrcode").await?;

        let qrcode: QrCodeResponse = resp
            .json()
            .await
            .map_err(|err| GatewayError::Transport(anyhow!(err)))?;
        Ok(qrcode)
    }
}

#[async_trait]
impl MessageGateway for WhatsAppGatewayClient {
    async fn send_text(&self, phone: &str, message: &str) -> Result<()> {
        if self.admin_token.is_empty() {
            anyhow::bail!("whatsapp gateway admin token is not configured");
        }

        let body = serde_json::json!({
            "number": phone,
            "text": message,
        });

        let resp = self
            .http
            .post(format!("{}/message/sendText", self.base_url))
            .header("apikey", &self.admin_token)
            .json(&body)
            .send()
            .await?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            error!(
                status = %status,
                response_body = %body,
                "whatsapp gateway: send failed"
            );
            anyhow::bail!("send failed with status {}", status);
        }

        Ok(())
    }
}
