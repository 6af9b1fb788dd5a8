//! ROOST Auth — access token issuance and verification.

pub mod config;
pub mod error;
pub mod token;

pub use config::TokenConfig;
pub use error::AuthError;
pub use token::AccessTokenClaims;
