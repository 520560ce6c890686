pub mod clients;
pub mod contacts;
pub mod enums;
pub mod messaging;
pub mod subscriptions;
