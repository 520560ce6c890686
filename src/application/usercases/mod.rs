pub mod clients;
pub mod contacts;
pub mod expiration;
pub mod subscription_gate;
pub mod subscriptions;
pub mod vcard;
pub mod whatsapp;
