pub mod clients;
pub mod contacts;
pub mod subscriptions;
pub mod vpn_test;
pub mod whatsapp;
