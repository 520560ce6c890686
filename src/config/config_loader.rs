use anyhow::{Ok, Result};

use super::config_model::DotEnvyConfig;

pub fn load() -> Result<DotEnvyConfig> {
    dotenvy::dotenv().ok();

    let server = super::config_model::Server {
        port: std::env::var("SERVER_PORT")
            .expect("SERVER_PORT is invalid")
            .parse()?,
        body_limit: std::env::var("SERVER_BODY_LIMIT")
            .expect("SERVER_BODY_LIMIT is invalid")
            .parse()?,
        timeout: std::env::var("SERVER_TIMEOUT")
            .expect("SERVER_TIMEOUT is invalid")
            .parse()?,
    };

    let database = super::config_model::Database {
        url: std::env::var("DATABASE_URL").expect("DATABASE_URL is invalid"),
    };

    let supabase = super::config_model::Supabase {
        jwt_secret: std::env::var("SUPABASE_JWT_SECRET").expect("SUPABASE_JWT_SECRET is invalid"),
    };

    // Gateway credentials may be absent in dev setups; their endpoints reject
    // at request time instead of failing boot.
    let whatsapp_gateway = super::config_model::WhatsAppGateway {
        base_url: std::env::var("WHATSAPP_GATEWAY_URL").unwrap_or_default(),
        admin_token: std::env::var("WHATSAPP_GATEWAY_ADMIN_TOKEN").unwrap_or_default(),
    };

    let vpn_test_api = super::config_model::VpnTestApi {
        api_url: std::env::var("VPN_TEST_API_URL").unwrap_or_default(),
        api_key: std::env::var("VPN_TEST_API_KEY").unwrap_or_default(),
    };

    let contacts_store = super::config_model::ContactsStore {
        file_path: std::env::var("CONTACTS_FILE_PATH")
            .unwrap_or_else(|_| "contacts.json".to_string()),
    };

    Ok(DotEnvyConfig {
        server,
        database,
        supabase,
        whatsapp_gateway,
        vpn_test_api,
        contacts_store,
    })
}
