//! Configuration validation.
//!
//! Semantic checks on top of the syntactic layer serde already handles.
//! Returns all violations, not just the first, so a bad invocation can be
//! fixed in one pass. Runs before the core is constructed.

use std::net::SocketAddr;
use thiserror::Error;
use url::Url;

use crate::config::schema::GateConfig;

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("a health check target URL is required")]
    MissingTarget,

    #[error("invalid target URL {0:?}: {1}")]
    InvalidTarget(String, url::ParseError),

    #[error("unsupported target scheme {0:?}, expected http or https")]
    UnsupportedScheme(String),

    #[error("invalid listen address {0:?}: {1}")]
    InvalidAddress(String, std::net::AddrParseError),

    #[error("interval_secs must be greater than zero")]
    ZeroInterval,

    #[error("timeout_secs must be greater than zero")]
    ZeroTimeout,

    #[error("healthy_threshold must be at least 1")]
    ZeroHealthyThreshold,

    #[error("unhealthy_threshold must be at least 1")]
    ZeroUnhealthyThreshold,
}

/// Validate a resolved configuration.
pub fn validate_config(config: &GateConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.target.is_empty() {
        errors.push(ValidationError::MissingTarget);
    } else {
        match Url::parse(&config.target) {
            Ok(url) if url.scheme() == "http" || url.scheme() == "https" => {}
            Ok(url) => errors.push(ValidationError::UnsupportedScheme(url.scheme().to_string())),
            Err(e) => errors.push(ValidationError::InvalidTarget(config.target.clone(), e)),
        }
    }

    if let Err(e) = config.address.parse::<SocketAddr>() {
        errors.push(ValidationError::InvalidAddress(config.address.clone(), e));
    }

    if config.interval_secs == 0 {
        errors.push(ValidationError::ZeroInterval);
    }
    if config.timeout_secs == 0 {
        errors.push(ValidationError::ZeroTimeout);
    }
    if config.healthy_threshold == 0 {
        errors.push(ValidationError::ZeroHealthyThreshold);
    }
    if config.unhealthy_threshold == 0 {
        errors.push(ValidationError::ZeroUnhealthyThreshold);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_config() -> GateConfig {
        GateConfig {
            target: "http://example.org/health".to_string(),
            ..GateConfig::default()
        }
    }

    #[test]
    fn accepts_valid_config() {
        assert!(validate_config(&valid_config()).is_ok());
    }

    #[test]
    fn rejects_missing_target() {
        let config = GateConfig::default();
        let errors = validate_config(&config).unwrap_err();
        assert!(matches!(errors[0], ValidationError::MissingTarget));
    }

    #[test]
    fn rejects_non_http_target() {
        let mut config = valid_config();
        config.target = "ftp://example.org".to_string();
        let errors = validate_config(&config).unwrap_err();
        assert!(matches!(errors[0], ValidationError::UnsupportedScheme(_)));
    }

    #[test]
    fn rejects_relative_target() {
        let mut config = valid_config();
        config.target = "example.org/health".to_string();
        let errors = validate_config(&config).unwrap_err();
        assert!(matches!(errors[0], ValidationError::InvalidTarget(_, _)));
    }

    #[test]
    fn collects_every_violation() {
        let config = GateConfig {
            target: String::new(),
            address: "not-an-address".to_string(),
            interval_secs: 0,
            timeout_secs: 0,
            healthy_threshold: 0,
            unhealthy_threshold: 0,
        };
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 6);
    }
}
