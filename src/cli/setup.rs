//! Shared startup for commands that talk to the service

use crate::cli::ServiceArgs;
use crate::client::HttpSummaryClient;
use crate::config::NepsumConfig;
use crate::coordinator::{CoordinatorOptions, SubmissionCoordinator};
use std::sync::Arc;

/// Load configuration with CLI overrides
pub fn load_config_with_overrides(
    args: &ServiceArgs,
) -> Result<NepsumConfig, Box<dyn std::error::Error>> {
    // A missing file at the default path just means "use defaults"
    let mut config = if args.config.exists() {
        NepsumConfig::load(Some(&args.config))?
    } else {
        tracing::debug!(path = %args.config.display(), "Config file not found, using defaults");
        NepsumConfig::default()
    };

    config = config.with_env_overrides();

    if let Some(ref endpoint) = args.endpoint {
        config.service.endpoint = endpoint.clone();
    }
    if let Some(timeout) = args.timeout {
        config.service.request_timeout_seconds = timeout;
    }
    if let Some(ref log_level) = args.log_level {
        config.logging.level = log_level.clone();
    }

    config.validate()?;
    Ok(config)
}

/// Wire an HTTP client into a fresh coordinator
pub fn build_coordinator(
    config: &NepsumConfig,
) -> Result<Arc<SubmissionCoordinator>, Box<dyn std::error::Error>> {
    let client = HttpSummaryClient::from_config(&config.service)?;
    tracing::debug!(endpoint = %client.endpoint(), "Summarization client ready");
    Ok(Arc::new(SubmissionCoordinator::new(
        Arc::new(client),
        CoordinatorOptions::from(config),
    )))
}
