use std::{sync::Arc, time::Duration};

use anyhow::Result as AnyResult;
use async_trait::async_trait;
use percent_encoding::{NON_ALPHANUMERIC, utf8_percent_encode};
use tracing::{info, warn};

use crate::domain::value_objects::messaging::{BulkSendReport, OutgoingMessage};

/// Pause between consecutive sends. The gateway rate-limits aggressively, so
/// bulk sends go out one at a time with a fixed gap.
pub const BULK_SEND_DELAY: Duration = Duration::from_secs(1);

/// Normalizes a phone number for the WhatsApp API: digits only, with the
/// Brazilian country code prefixed when the number does not already carry
/// one. Pure length heuristic, no validity check.
pub fn format_phone_for_whatsapp(phone: &str) -> String {
    let digits: String = phone.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.len() <= 11 {
        format!("55{}", digits)
    } else {
        digits
    }
}

/// Deep link to the WhatsApp web client with a prefilled message. Opening the
/// link is the caller's concern.
pub fn whatsapp_link(phone: &str, message: &str) -> String {
    format!(
        "https://wa.me/{}?text={}",
        format_phone_for_whatsapp(phone),
        utf8_percent_encode(message, NON_ALPHANUMERIC)
    )
}

/// Outbound message channel. Implemented by the WhatsApp gateway client;
/// mocked in tests.
#[async_trait]
#[cfg_attr(test, mockall::automock)]
pub trait MessageGateway: Send + Sync {
    async fn send_text(&self, phone: &str, message: &str) -> AnyResult<()>;
}

pub struct WhatsAppUseCase<G>
where
    G: MessageGateway + 'static,
{
    gateway: Arc<G>,
    send_delay: Duration,
}

impl<G> WhatsAppUseCase<G>
where
    G: MessageGateway + 'static,
{
    pub fn new(gateway: Arc<G>) -> Self {
        Self::with_send_delay(gateway, BULK_SEND_DELAY)
    }

    pub fn with_send_delay(gateway: Arc<G>, send_delay: Duration) -> Self {
        Self {
            gateway,
            send_delay,
        }
    }

    /// Sends every message strictly in input order, one in flight at a time,
    /// sleeping [`BULK_SEND_DELAY`] between sends. A failure is recorded and
    /// the batch moves on; nothing aborts early and nothing is retried.
    pub async fn send_bulk(&self, messages: Vec<OutgoingMessage>) -> BulkSendReport {
        let total = messages.len();
        info!(total, "whatsapp: bulk send started");

        let mut report = BulkSendReport::default();

        for (index, message) in messages.into_iter().enumerate() {
            if index > 0 {
                tokio::time::sleep(self.send_delay).await;
            }

            let phone = format_phone_for_whatsapp(&message.phone);
            match self.gateway.send_text(&phone, &message.message).await {
                Ok(()) => {
                    report.sent += 1;
                }
                Err(err) => {
                    warn!(
                        phone = %message.phone,
                        error = %err,
                        "whatsapp: bulk send item failed"
                    );
                    report.failed += 1;
                    report.errors.push(format!("{}: {}", message.phone, err));
                }
            }
        }

        info!(
            sent = report.sent,
            failed = report.failed,
            "whatsapp: bulk send finished"
        );
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;
    use mockall::predicate::eq;

    #[test]
    fn local_number_gets_country_code() {
        assert_eq!(
            format_phone_for_whatsapp("(11) 91234-5678"),
            "5511912345678"
        );
    }

    #[test]
    fn number_with_country_code_is_untouched() {
        assert_eq!(
            format_phone_for_whatsapp("+55 11 91234-5678"),
            "5511912345678"
        );
        assert_eq!(format_phone_for_whatsapp("5511912345678"), "5511912345678");
    }

    #[test]
    fn link_percent_encodes_the_message() {
        let link = whatsapp_link("(11) 91234-5678", "Olá Ana! Plano: Mensal");
        assert!(link.starts_with("https://wa.me/5511912345678?text="));
        assert!(!link.contains(' '));
        assert!(link.contains("%20"));
        assert!(link.contains("Ana"));
    }

    #[tokio::test]
    async fn bulk_send_isolates_failures_and_attempts_everything() {
        let mut gateway = MockMessageGateway::new();

        gateway
            .expect_send_text()
            .with(eq("5511911111111"), eq("a"))
            .times(1)
            .returning(|_, _| Box::pin(async { Ok(()) }));
        gateway
            .expect_send_text()
            .with(eq("5511922222222"), eq("b"))
            .times(1)
            .returning(|_, _| Box::pin(async { Err(anyhow!("gateway timeout")) }));
        gateway
            .expect_send_text()
            .with(eq("5511933333333"), eq("c"))
            .times(1)
            .returning(|_, _| Box::pin(async { Ok(()) }));

        let usecase = WhatsAppUseCase::with_send_delay(Arc::new(gateway), Duration::ZERO);
        let report = usecase
            .send_bulk(vec![
                OutgoingMessage {
                    phone: "11 91111-1111".to_string(),
                    message: "a".to_string(),
                },
                OutgoingMessage {
                    phone: "11 92222-2222".to_string(),
                    message: "b".to_string(),
                },
                OutgoingMessage {
                    phone: "11 93333-3333".to_string(),
                    message: "c".to_string(),
                },
            ])
            .await;

        assert_eq!(report.sent, 2);
        assert_eq!(report.failed, 1);
        assert_eq!(
            report.errors,
            vec!["11 92222-2222: gateway timeout".to_string()]
        );
    }

    #[tokio::test]
    async fn bulk_send_of_nothing_is_empty_report() {
        let gateway = MockMessageGateway::new();
        let usecase = WhatsAppUseCase::with_send_delay(Arc::new(gateway), Duration::ZERO);
        let report = usecase.send_bulk(Vec::new()).await;
        assert_eq!(report, BulkSendReport::default());
    }
}
