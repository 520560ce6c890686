pub mod clients;
pub mod plans;
pub mod renewals;
pub mod subscriptions;
