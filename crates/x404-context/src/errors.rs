//! Error types for the client context.

use solana_program::pubkey::Pubkey;
use thiserror::Error;

use crate::cluster::Cluster;

pub type ContextResult<T> = Result<T, ContextError>;

#[derive(Debug, Error)]
pub enum ContextError {
    #[error("invalid program descriptor: {0}")]
    InvalidProgram(String),

    #[error("program {name} is locked to {existing}; refusing to register {attempted}")]
    ProgramLocked {
        name: String,
        existing: Pubkey,
        attempted: Pubkey,
    },

    #[error("program not recognized: {name}")]
    ProgramNotRecognized { name: String },

    #[error("program {name} is not deployed on cluster {cluster}")]
    ProgramNotOnCluster { name: String, cluster: Cluster },

    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error("rpc endpoint {endpoint} unreachable: {source}")]
    Rpc {
        endpoint: String,
        #[source]
        source: Box<solana_client::client_error::ClientError>,
    },
}

impl ContextError {
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }

    pub fn invalid_program(msg: impl Into<String>) -> Self {
        Self::InvalidProgram(msg.into())
    }
}
