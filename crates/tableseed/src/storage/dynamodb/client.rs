//! AWS SDK client setup (Imperative Shell).

use aws_sdk_dynamodb::config::Credentials;
use aws_sdk_dynamodb::Client;

use crate::config::BootstrapConfig;

/// Creates a DynamoDB client with the given configuration.
///
/// Static credentials are used when configured; otherwise the SDK default
/// chain resolves them, failing at the first request if none are found.
pub async fn create_client(config: &BootstrapConfig) -> Client {
    let mut sdk_config_loader = aws_config::defaults(aws_config::BehaviorVersion::latest())
        .region(aws_config::Region::new(config.region.clone()))
        .endpoint_url(&config.endpoint_url);

    if let Some(creds) = &config.credentials {
        sdk_config_loader = sdk_config_loader.credentials_provider(Credentials::new(
            &creds.access_key_id,
            &creds.secret_access_key,
            None,
            None,
            "environment",
        ));
    }

    let sdk_config = sdk_config_loader.load().await;
    Client::new(&sdk_config)
}
