//! Token configuration.

/// Configuration for access token issuance and verification.
#[derive(Debug, Clone)]
pub struct TokenConfig {
    /// Process-wide shared secret for HMAC-SHA256 signing.
    pub secret: String,
    /// Access token lifetime in seconds (default: 2_592_000 = 30 days).
    pub token_lifetime_secs: u64,
    /// Token issuer (`iss` claim).
    pub issuer: String,
}

impl Default for TokenConfig {
    fn default() -> Self {
        Self {
            secret: String::new(),
            token_lifetime_secs: 2_592_000,
            issuer: "roost".into(),
        }
    }
}
