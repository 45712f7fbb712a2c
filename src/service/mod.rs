pub mod auth;
pub mod password;
pub mod token;

pub use auth::{AuthService, LoginOutcome};
pub use token::TokenManager;
