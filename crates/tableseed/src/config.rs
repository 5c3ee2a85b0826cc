//! Connection settings for the target store.

use std::time::Duration;

/// Default local development endpoint.
pub const DEFAULT_ENDPOINT_URL: &str = "http://localhost:8000";

/// Default region label sent to the endpoint.
pub const DEFAULT_REGION: &str = "us-east-1";

/// Static credentials read from the environment.
#[derive(Clone, PartialEq, Eq)]
pub struct StaticCredentials {
    pub access_key_id: String,
    pub secret_access_key: String,
}

impl std::fmt::Debug for StaticCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StaticCredentials")
            .field("access_key_id", &self.access_key_id)
            .field("secret_access_key", &"<redacted>")
            .finish()
    }
}

impl StaticCredentials {
    /// Reads `AWS_ACCESS_KEY_ID` and `AWS_SECRET_ACCESS_KEY`.
    ///
    /// Returns `None` unless both are set, leaving the SDK default chain in charge.
    pub fn from_env() -> Option<Self> {
        Self::from_parts(
            std::env::var("AWS_ACCESS_KEY_ID").ok(),
            std::env::var("AWS_SECRET_ACCESS_KEY").ok(),
        )
    }

    fn from_parts(access_key_id: Option<String>, secret_access_key: Option<String>) -> Option<Self> {
        match (access_key_id, secret_access_key) {
            (Some(access_key_id), Some(secret_access_key)) => Some(Self {
                access_key_id,
                secret_access_key,
            }),
            _ => None,
        }
    }
}

/// Everything needed to reach the store, resolved once at startup.
#[derive(Debug, Clone)]
pub struct BootstrapConfig {
    pub endpoint_url: String,
    pub region: String,
    pub credentials: Option<StaticCredentials>,
}

impl BootstrapConfig {
    /// Creates a config for the given target, taking credentials from the environment.
    pub fn new(endpoint_url: impl Into<String>, region: impl Into<String>) -> Self {
        Self {
            endpoint_url: endpoint_url.into(),
            region: region.into(),
            credentials: StaticCredentials::from_env(),
        }
    }

    /// Returns a display string for the target environment.
    pub fn target_display(&self) -> String {
        format!("DynamoDB ({}, region: {})", self.endpoint_url, self.region)
    }
}

/// How long to poll for a deleted table to disappear.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WaitConfig {
    pub delay: Duration,
    pub max_attempts: u32,
}

impl Default for WaitConfig {
    fn default() -> Self {
        Self {
            delay: Duration::from_secs(2),
            max_attempts: 60,
        }
    }
}
