//! x404-context
//!
//! A small client context for Solana programs:
//! - program descriptors and the `Program` capability trait
//! - a deterministic program registry with per-entry locking
//! - cluster resolution from RPC endpoints
//! - explicit context configuration and the async `create_context` helper
//! - the `ContextPlugin` trait used by program crates to register themselves

pub mod cluster;
pub mod config;
pub mod context;
pub mod errors;
pub mod program;
pub mod registry;

pub use crate::cluster::{resolve_cluster_from_endpoint, Cluster};
pub use crate::config::{validate_config, Commitment, ContextConfig};
pub use crate::context::{create_context, ClientContext, ContextPlugin};
pub use crate::errors::{ContextError, ContextResult};
pub use crate::program::{Program, ProgramDescriptor, ProgramErrorInfo};
pub use crate::registry::{ProgramRegistry, RegisteredProgram};

/// Convenience re-exports.
pub mod prelude {
    pub use crate::{
        create_context, ClientContext, Cluster, ContextConfig, ContextError, ContextPlugin,
        ContextResult, Program, ProgramDescriptor, ProgramErrorInfo,
    };
    pub use solana_program::pubkey::Pubkey;
}
