pub mod axum_http;
pub mod gateways;
pub mod postgres;
pub mod storage;
