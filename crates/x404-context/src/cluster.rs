//! Solana cluster identification.
//!
//! A context targets exactly one cluster. Programs may declare the clusters
//! they are deployed on; lookups through the context filter on it.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::errors::{ContextError, ContextResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Cluster {
    MainnetBeta,
    Devnet,
    Testnet,
    Localnet,
    Custom,
}

impl Cluster {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MainnetBeta => "mainnet-beta",
            Self::Devnet => "devnet",
            Self::Testnet => "testnet",
            Self::Localnet => "localnet",
            Self::Custom => "custom",
        }
    }
}

impl fmt::Display for Cluster {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Cluster {
    type Err = ContextError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mainnet-beta" | "mainnet" => Ok(Self::MainnetBeta),
            "devnet" => Ok(Self::Devnet),
            "testnet" => Ok(Self::Testnet),
            "localnet" | "localhost" => Ok(Self::Localnet),
            "custom" => Ok(Self::Custom),
            other => Err(ContextError::invalid_config(format!("unknown cluster: {other}"))),
        }
    }
}

/// Infer the cluster from an RPC endpoint URL by its host name.
pub fn resolve_cluster_from_endpoint(endpoint: &str) -> ContextResult<Cluster> {
    let url = Url::parse(endpoint)
        .map_err(|e| ContextError::invalid_config(format!("invalid endpoint {endpoint}: {e}")))?;
    let host = url
        .host_str()
        .ok_or_else(|| ContextError::invalid_config(format!("endpoint has no host: {endpoint}")))?;

    let cluster = if host.contains("mainnet") {
        Cluster::MainnetBeta
    } else if host.contains("devnet") {
        Cluster::Devnet
    } else if host.contains("testnet") {
        Cluster::Testnet
    } else if host == "localhost" || host == "127.0.0.1" {
        Cluster::Localnet
    } else {
        Cluster::Custom
    };
    Ok(cluster)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoints_resolve_by_host() {
        let cases = [
            ("https://api.mainnet-beta.solana.com", Cluster::MainnetBeta),
            ("https://api.devnet.solana.com", Cluster::Devnet),
            ("https://api.testnet.solana.com", Cluster::Testnet),
            ("http://127.0.0.1:8899", Cluster::Localnet),
            ("http://localhost:8899", Cluster::Localnet),
            ("https://rpc.example.org", Cluster::Custom),
        ];
        for (endpoint, expected) in cases {
            assert_eq!(resolve_cluster_from_endpoint(endpoint).unwrap(), expected, "{endpoint}");
        }
    }

    #[test]
    fn path_does_not_affect_resolution() {
        let c = resolve_cluster_from_endpoint("https://rpc.example.org/devnet").unwrap();
        assert_eq!(c, Cluster::Custom);
    }

    #[test]
    fn garbage_endpoint_is_rejected() {
        assert!(resolve_cluster_from_endpoint("not a url").is_err());
    }

    #[test]
    fn string_forms_roundtrip() {
        for c in [
            Cluster::MainnetBeta,
            Cluster::Devnet,
            Cluster::Testnet,
            Cluster::Localnet,
            Cluster::Custom,
        ] {
            assert_eq!(c.as_str().parse::<Cluster>().unwrap(), c);
        }
        assert_eq!(serde_json::to_string(&Cluster::MainnetBeta).unwrap(), "\"mainnet-beta\"");
    }
}
