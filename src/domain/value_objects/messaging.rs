use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::value_objects::enums::expiration_statuses::ExpirationStatus;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct OutgoingMessage {
    pub phone: String,
    pub message: String,
}

/// Outcome of a bulk send. One entry in `errors` per failed message,
/// formatted as `"<phone>: <error>"`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct BulkSendReport {
    pub sent: usize,
    pub failed: usize,
    pub errors: Vec<String>,
}

/// Rendered expiration notice for one client, ready to hand to the messaging
/// channel.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExpirationNoticeDto {
    pub client_id: Uuid,
    pub days_remaining: i64,
    pub expiration_status: ExpirationStatus,
    pub message: String,
    pub whatsapp_link: String,
}
