#[derive(Debug, Clone)]
pub struct DotEnvyConfig {
    pub server: Server,
    pub database: Database,
    pub supabase: Supabase,
    pub whatsapp_gateway: WhatsAppGateway,
    pub vpn_test_api: VpnTestApi,
    pub contacts_store: ContactsStore,
}

#[derive(Debug, Clone)]
pub struct Server {
    pub port: u16,
    pub body_limit: u64,
    pub timeout: u64,
}

#[derive(Debug, Clone)]
pub struct Database {
    pub url: String,
}

#[derive(Debug, Clone)]
pub struct Supabase {
    pub jwt_secret: String,
}

#[derive(Debug, Clone)]
pub struct WhatsAppGateway {
    pub base_url: String,
    pub admin_token: String,
}

#[derive(Debug, Clone)]
pub struct VpnTestApi {
    pub api_url: String,
    pub api_key: String,
}

#[derive(Debug, Clone)]
pub struct ContactsStore {
    pub file_path: String,
}
