use std::collections::HashMap;

use chrono::{DateTime, Utc};

use crate::domain::value_objects::{
    clients::ClientModel, enums::expiration_statuses::ExpirationStatus,
};

const DAY_MS: i64 = 86_400_000;

/// Days with any remaining time at all still count as a full day.
pub const EXPIRING_WINDOW_DAYS: i64 = 7;

/// Whole days until `expires_at`, rounding the millisecond delta up.
/// Negative for timestamps already in the past.
pub fn days_until_expiration(expires_at: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    let delta_ms = expires_at.signed_duration_since(now).num_milliseconds();
    // ceil(delta / day) without floating point
    -((-delta_ms).div_euclid(DAY_MS))
}

pub fn expiration_status(expires_at: DateTime<Utc>, now: DateTime<Utc>) -> ExpirationStatus {
    let days = days_until_expiration(expires_at, now);
    if days < 0 {
        ExpirationStatus::Expired
    } else if days <= EXPIRING_WINDOW_DAYS {
        ExpirationStatus::Expiring
    } else {
        ExpirationStatus::Active
    }
}

/// Formats centavos as Brazilian currency, e.g. `9990` -> `"R$ 99,90"`.
pub fn format_brl(price_minor: i32) -> String {
    let sign = if price_minor < 0 { "-" } else { "" };
    let abs = price_minor.unsigned_abs();
    let whole = (abs / 100).to_string();
    let cents = abs % 100;

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (idx, digit) in whole.chars().enumerate() {
        if idx > 0 && (whole.len() - idx) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(digit);
    }

    format!("R$ {}{},{:02}", sign, grouped, cents)
}

/// Renders the expiration notice for a client.
///
/// With a template, placeholders are substituted in a single pass over the
/// input so a resolved value containing a `{token}` of its own is never
/// re-expanded. Without one, a canned pt-BR body is picked by the sign of
/// `days_remaining`.
///
/// The price printed for `{valor}` falls back through the explicit
/// `plan_price_minor`, then the client's own override, then the plan-type
/// default.
pub fn generate_expiration_message(
    client: &ClientModel,
    plan_name: &str,
    days_remaining: i64,
    template: Option<&str>,
    plan_price_minor: Option<i32>,
) -> String {
    match template {
        Some(template) => {
            let price_minor = plan_price_minor
                .or(client.price_minor)
                .unwrap_or_else(|| client.plan_type.default_price_minor());

            let vars = HashMap::from([
                ("nome", client.name.clone()),
                ("plano", plan_name.to_string()),
                ("dias", days_remaining.abs().to_string()),
                (
                    "data_vencimento",
                    client.expires_at.format("%d/%m/%Y").to_string(),
                ),
                ("valor", format_brl(price_minor)),
            ]);

            render_template(template, &vars)
        }
        None => default_message(&client.name, plan_name, days_remaining),
    }
}

fn default_message(client_name: &str, plan_name: &str, days_remaining: i64) -> String {
    if days_remaining < 0 {
        format!(
            "Olá {}! Seu plano {} venceu há {} dias. Entre em contato para renovar e reativar o acesso.",
            client_name,
            plan_name,
            days_remaining.abs()
        )
    } else if days_remaining == 0 {
        format!(
            "Olá {}! Seu plano {} vence hoje. Renove agora para não perder o acesso.",
            client_name, plan_name
        )
    } else {
        format!(
            "Olá {}! Seu plano {} vence em {} dias. Renove e garanta a continuidade do serviço.",
            client_name, plan_name, days_remaining
        )
    }
}

fn render_template(template: &str, vars: &HashMap<&'static str, String>) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let tail = &rest[open..];
        match tail.find('}') {
            Some(close) => {
                let token = &tail[1..close];
                match vars.get(token) {
                    Some(value) => out.push_str(value),
                    // Unknown placeholders pass through untouched.
                    None => out.push_str(&tail[..=close]),
                }
                rest = &tail[close + 1..];
            }
            None => {
                out.push_str(tail);
                rest = "";
            }
        }
    }

    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_objects::enums::{plan_types::PlanType, service_types::ServiceType};
    use chrono::{Duration, TimeZone};
    use uuid::Uuid;

    fn sample_client(expires_at: DateTime<Utc>) -> ClientModel {
        ClientModel {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            name: "Ana".to_string(),
            phone: "(11) 91234-5678".to_string(),
            email: None,
            service_type: ServiceType::Iptv,
            plan_type: PlanType::Monthly,
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

    #[test]
    fn past_dates_are_expired() {
        let now = Utc::now();
        assert_eq!(
            expiration_status(now - Duration::days(3), now),
            ExpirationStatus::Expired
        );
        assert!(days_until_expiration(now - Duration::days(3), now) < 0);
    }

    #[test]
    fn seven_days_remaining_is_expiring_eight_is_active() {
        let now = Utc::now();
        assert_eq!(
            expiration_status(now + Duration::days(7), now),
            ExpirationStatus::Expiring
        );
        assert_eq!(
            expiration_status(now + Duration::days(8), now),
            ExpirationStatus::Active
        );
    }

    #[test]
    fn partial_days_round_up() {
        let now = Utc::now();
        assert_eq!(days_until_expiration(now + Duration::milliseconds(1), now), 1);
        assert_eq!(days_until_expiration(now, now), 0);
        assert_eq!(
            days_until_expiration(now - Duration::milliseconds(1), now),
            0
        );
        assert_eq!(
            days_until_expiration(now - Duration::days(1), now),
            -1
        );
    }

    #[test]
    fn today_boundary_is_expiring() {
        let now = Utc::now();
        assert_eq!(expiration_status(now, now), ExpirationStatus::Expiring);
    }

    #[test]
    fn brl_formatting() {
        assert_eq!(format_brl(9990), "R$ 99,90");
        assert_eq!(format_brl(100), "R$ 1,00");
        assert_eq!(format_brl(5), "R$ 0,05");
        assert_eq!(format_brl(123_456), "R$ 1.234,56");
    }

    #[test]
    fn template_substitution_uses_absolute_days_and_brl_price() {
        let expires_at = Utc.with_ymd_and_hms(2026, 3, 10, 12, 0, 0).unwrap();
        let client = sample_client(expires_at);

        let message = generate_expiration_message(
            &client,
            "Mensal",
            -3,
            Some("{nome} - {plano} - {dias} dias - {valor}"),
            Some(9990),
        );

        assert_eq!(message, "Ana - Mensal - 3 dias - R$ 99,90");
    }

    #[test]
    fn template_replaces_every_occurrence() {
        let client = sample_client(Utc::now());
        let message =
            generate_expiration_message(&client, "Mensal", 5, Some("{nome} {nome} {dias}"), None);
        assert_eq!(message, "Ana Ana 5");
    }

    #[test]
    fn template_formats_expiration_date_as_day_month_year() {
        let expires_at = Utc.with_ymd_and_hms(2026, 3, 10, 12, 0, 0).unwrap();
        let client = sample_client(expires_at);
        let message =
            generate_expiration_message(&client, "Mensal", 2, Some("{data_vencimento}"), None);
        assert_eq!(message, "10/03/2026");
    }

    #[test]
    fn resolved_values_are_not_rescanned() {
        let mut client = sample_client(Utc::now());
        client.name = "{plano}".to_string();
        let message =
            generate_expiration_message(&client, "Mensal", 5, Some("{nome} usa {plano}"), None);
        assert_eq!(message, "{plano} usa Mensal");
    }

    #[test]
    fn unknown_placeholders_pass_through() {
        let client = sample_client(Utc::now());
        let message =
            generate_expiration_message(&client, "Mensal", 5, Some("{nome} {cupom}"), None);
        assert_eq!(message, "Ana {cupom}");
    }

    #[test]
    fn price_falls_back_to_client_override_then_plan_default() {
        let mut client = sample_client(Utc::now());
        client.price_minor = Some(4550);

        let message = generate_expiration_message(&client, "Mensal", 5, Some("{valor}"), None);
        assert_eq!(message, "R$ 45,50");

        client.price_minor = None;
        let message = generate_expiration_message(&client, "Mensal", 5, Some("{valor}"), None);
        assert_eq!(message, format_brl(PlanType::Monthly.default_price_minor()));
    }

    #[test]
    fn default_message_for_today_mentions_today_and_plan() {
        let client = sample_client(Utc::now());
        let message = generate_expiration_message(&client, "Mensal", 0, None, None);
        assert!(message.contains("hoje"));
        assert!(message.contains("Mensal"));
    }

    #[test]
    fn default_message_for_future_has_no_negative_sign() {
        let client = sample_client(Utc::now());
        let message = generate_expiration_message(&client, "Mensal", 5, None, None);
        assert!(message.contains('5'));
        assert!(!message.contains('-'));
    }

    #[test]
    fn default_message_for_past_uses_absolute_days() {
        let client = sample_client(Utc::now());
        let message = generate_expiration_message(&client, "Mensal", -3, None, None);
        assert!(message.contains("venceu"));
        assert!(message.contains("3 dias"));
        assert!(!message.contains("-3"));
    }
}
