pub mod clients;
pub mod contacts;
pub mod plans;
pub mod renewals;
pub mod subscriptions;
