//! Configuration structures for the client context.
//!
//! The context crate itself does not read environment variables. All
//! configuration must be provided explicitly by the caller.

use serde::{Deserialize, Serialize};
use solana_sdk::commitment_config::CommitmentConfig;

use crate::cluster::{resolve_cluster_from_endpoint, Cluster};
use crate::errors::{ContextError, ContextResult};

/// Default RPC endpoint: a local validator.
pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:8899";

/// Client context configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ContextConfig {
    /// RPC endpoint URL.
    pub endpoint: String,

    pub commitment: Commitment,

    /// Explicit cluster. When unset, the cluster is inferred from the endpoint.
    pub cluster: Option<Cluster>,

    /// Ask the endpoint for its version while creating the context.
    pub verify_endpoint: bool,
}

impl Default for ContextConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            commitment: Commitment::Confirmed,
            cluster: None,
            verify_endpoint: false,
        }
    }
}

impl ContextConfig {
    pub fn with_endpoint(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            ..Self::default()
        }
    }

    /// Cluster this configuration targets.
    pub fn resolve_cluster(&self) -> ContextResult<Cluster> {
        match self.cluster {
            Some(c) => Ok(c),
            None => resolve_cluster_from_endpoint(&self.endpoint),
        }
    }
}

/// Commitment level used for RPC reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Commitment {
    Processed,
    Confirmed,
    Finalized,
}

impl Commitment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Processed => "processed",
            Self::Confirmed => "confirmed",
            Self::Finalized => "finalized",
        }
    }
}

impl From<Commitment> for CommitmentConfig {
    fn from(c: Commitment) -> Self {
        match c {
            Commitment::Processed => CommitmentConfig::processed(),
            Commitment::Confirmed => CommitmentConfig::confirmed(),
            Commitment::Finalized => CommitmentConfig::finalized(),
        }
    }
}

/// Validate a full configuration object.
pub fn validate_config(cfg: &ContextConfig) -> ContextResult<()> {
    if cfg.endpoint.trim().is_empty() {
        return Err(ContextError::invalid_config("endpoint must not be empty"));
    }
    if !(cfg.endpoint.starts_with("http://") || cfg.endpoint.starts_with("https://")) {
        return Err(ContextError::invalid_config(format!(
            "endpoint must be an http(s) URL: {}",
            cfg.endpoint
        )));
    }
    resolve_cluster_from_endpoint(&cfg.endpoint)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let cfg = ContextConfig::default();
        validate_config(&cfg).unwrap();
        assert_eq!(cfg.resolve_cluster().unwrap(), Cluster::Localnet);
    }

    #[test]
    fn empty_endpoint_detected() {
        let cfg = ContextConfig::with_endpoint("");
        assert!(validate_config(&cfg).is_err());
    }

    #[test]
    fn non_http_endpoint_detected() {
        let cfg = ContextConfig::with_endpoint("ws://127.0.0.1:8900");
        assert!(validate_config(&cfg).is_err());
    }

    #[test]
    fn explicit_cluster_wins() {
        let cfg = ContextConfig {
            cluster: Some(Cluster::Devnet),
            ..ContextConfig::default()
        };
        assert_eq!(cfg.resolve_cluster().unwrap(), Cluster::Devnet);
    }

    #[test]
    fn partial_json_falls_back_to_defaults() {
        let cfg: ContextConfig =
            serde_json::from_str(r#"{ "endpoint": "https://api.devnet.solana.com" }"#).unwrap();
        assert_eq!(cfg.commitment, Commitment::Confirmed);
        assert!(!cfg.verify_endpoint);
        assert_eq!(cfg.resolve_cluster().unwrap(), Cluster::Devnet);
    }
}
