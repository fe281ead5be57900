//! Resilience layer for uploads.
//!
//! Only the unsigned fallback path is retried, and only when configured.
//! The signed path is attempted once.

mod retry;

pub use retry::{RetryConfig, RetryPolicy};

use crate::config::CloudinaryConfig;

impl From<&CloudinaryConfig> for RetryConfig {
    fn from(config: &CloudinaryConfig) -> Self {
        RetryConfig::new(config.unsigned_max_retries)
            .with_initial_backoff(config.initial_backoff)
            .with_max_backoff(config.max_backoff)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_retry_config_from_cloudinary_config() {
        let config = CloudinaryConfig::builder()
            .cloud_name("demo")
            .unsigned_max_retries(2)
            .initial_backoff(Duration::from_millis(50))
            .max_backoff(Duration::from_secs(1))
            .build()
            .unwrap();

        let retry = RetryConfig::from(&config);
        assert_eq!(retry.max_retries, 2);
        assert_eq!(retry.initial_backoff, Duration::from_millis(50));
        assert_eq!(retry.max_backoff, Duration::from_secs(1));
    }
}
