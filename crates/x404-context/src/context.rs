//! Client context.
//!
//! The context owns everything a client needs to talk to one cluster: the
//! RPC client, the resolved cluster and the program registry. Plugins extend
//! it by registering programs.

use std::fmt;
use std::sync::Arc;

use solana_client::nonblocking::rpc_client::RpcClient;
use solana_program::pubkey::Pubkey;
use tracing::info;

use crate::cluster::Cluster;
use crate::config::{validate_config, ContextConfig};
use crate::errors::{ContextError, ContextResult};
use crate::program::{Program, ProgramErrorInfo};
use crate::registry::ProgramRegistry;

/// Something that extends a context, usually by registering programs.
pub trait ContextPlugin {
    fn install(&self, context: &mut ClientContext) -> ContextResult<()>;
}

pub struct ClientContext {
    pub config: ContextConfig,
    pub cluster: Cluster,
    pub rpc: Arc<RpcClient>,
    pub programs: ProgramRegistry,
}

impl fmt::Debug for ClientContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientContext")
            .field("config", &self.config)
            .field("cluster", &self.cluster)
            .field("programs", &self.programs.names())
            .finish()
    }
}

/// Build a client context from explicit configuration.
///
/// When `verify_endpoint` is set the endpoint must answer `getVersion`.
pub async fn create_context(config: ContextConfig) -> ContextResult<ClientContext> {
    validate_config(&config)?;
    let cluster = config.resolve_cluster()?;

    let rpc = RpcClient::new_with_commitment(config.endpoint.clone(), config.commitment.into());

    if config.verify_endpoint {
        let version = rpc.get_version().await.map_err(|e| ContextError::Rpc {
            endpoint: config.endpoint.clone(),
            source: Box::new(e),
        })?;
        info!(endpoint = %config.endpoint, node = %version.solana_core, "endpoint verified");
    }

    info!(
        endpoint = %config.endpoint,
        %cluster,
        commitment = config.commitment.as_str(),
        "client context created"
    );

    Ok(ClientContext {
        config,
        cluster,
        rpc: Arc::new(rpc),
        programs: ProgramRegistry::new(),
    })
}

impl ClientContext {
    /// Install a plugin into this context.
    pub fn use_plugin<P: ContextPlugin + ?Sized>(&mut self, plugin: &P) -> ContextResult<&mut Self> {
        plugin.install(self)?;
        Ok(self)
    }

    /// Look up a program by name, requiring it to be deployed on this
    /// context's cluster.
    pub fn program(&self, name: &str) -> ContextResult<&dyn Program> {
        let program = self.programs.get(name)?;
        if !program.is_on_cluster(self.cluster) {
            return Err(ContextError::ProgramNotOnCluster {
                name: name.to_string(),
                cluster: self.cluster,
            });
        }
        Ok(program)
    }

    /// Map a custom error code returned by `program_id` to its description.
    pub fn resolve_error(&self, program_id: &Pubkey, code: u32) -> Option<ProgramErrorInfo> {
        self.programs
            .get_by_address(program_id)
            .and_then(|p| p.error_from_code(code))
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;
    use crate::program::ProgramDescriptor;

    struct Pair(Pubkey);

    impl ContextPlugin for Pair {
        fn install(&self, context: &mut ClientContext) -> ContextResult<()> {
            context.programs.add(
                ProgramDescriptor::new("pair", self.0).error(6000, "Broken", "it broke"),
                false,
            )
        }
    }

    #[tokio::test]
    async fn default_context_targets_localnet() {
        let ctx = create_context(ContextConfig::default()).await.unwrap();
        assert_eq!(ctx.cluster, Cluster::Localnet);
        assert!(ctx.programs.is_empty());
    }

    #[tokio::test]
    async fn invalid_config_is_rejected() {
        let err = create_context(ContextConfig::with_endpoint("")).await.unwrap_err();
        assert_matches!(err, ContextError::InvalidConfig(_));
    }

    #[tokio::test]
    async fn unreachable_endpoint_fails_verification() {
        let config = ContextConfig {
            verify_endpoint: true,
            ..ContextConfig::with_endpoint("http://127.0.0.1:1")
        };
        let err = create_context(config).await.unwrap_err();
        assert_matches!(err, ContextError::Rpc { endpoint, .. } if endpoint == "http://127.0.0.1:1");
    }

    #[tokio::test]
    async fn unverified_endpoint_is_not_contacted() {
        let ctx = create_context(ContextConfig::with_endpoint("http://127.0.0.1:1"))
            .await
            .unwrap();
        assert_eq!(ctx.cluster, Cluster::Localnet);
    }

    #[tokio::test]
    async fn plugin_registers_and_resolves_errors() {
        let key = Pubkey::new_unique();
        let mut ctx = create_context(ContextConfig::default()).await.unwrap();
        ctx.use_plugin(&Pair(key)).unwrap();

        assert_eq!(ctx.program("pair").unwrap().public_key(), key);
        assert_eq!(ctx.resolve_error(&key, 6000).unwrap().name, "Broken");
        assert!(ctx.resolve_error(&key, 6001).is_none());
        assert!(ctx.resolve_error(&Pubkey::new_unique(), 6000).is_none());
    }

    #[tokio::test]
    async fn program_on_other_cluster_is_hidden() {
        let mut ctx = create_context(ContextConfig::default()).await.unwrap();
        ctx.programs
            .add(
                ProgramDescriptor::new("mainnet-only", Pubkey::new_unique()).cluster(Cluster::MainnetBeta),
                true,
            )
            .unwrap();

        assert_matches!(
            ctx.program("mainnet-only").err(),
            Some(ContextError::ProgramNotOnCluster { cluster: Cluster::Localnet, .. })
        );
        assert!(ctx.programs.get("mainnet-only").is_ok());
    }
}
