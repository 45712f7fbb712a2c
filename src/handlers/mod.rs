pub mod auth;
pub mod dashboard;
pub mod messages;
pub mod meta;
