use std::path::PathBuf;

use clap::{Parser, Subcommand};
use x404_context::Cluster;

use crate::idl::IdlGenerator;

#[derive(Parser, Debug, Clone)]
#[command(name = "x404", version, about = "sol-x404 CLI")]
pub struct Cli {
    /// Emit logs as JSON lines on stderr.
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Generate the program IDL with shank or anchor.
    Idl(IdlArgs),

    /// Create a client context, install solX404 and list registered programs.
    Programs {
        /// RPC endpoint.
        #[arg(long, env = "SOLANA_URL", default_value = x404_context::config::DEFAULT_ENDPOINT)]
        url: String,

        /// Cluster override: mainnet-beta|devnet|testnet|localnet|custom
        #[arg(long, env = "X404_CLUSTER")]
        cluster: Option<Cluster>,

        /// Query the endpoint version before listing.
        #[arg(long)]
        verify: bool,
    },

    /// Run environment checks.
    Doctor,
}

#[derive(clap::Args, Debug, Clone)]
pub struct IdlArgs {
    /// IDL config file (JSON, camelCase keys).
    #[arg(long, default_value = "configs/idl.json")]
    pub config: PathBuf,

    #[arg(long, value_enum)]
    pub generator: Option<IdlGenerator>,

    #[arg(long)]
    pub program_name: Option<String>,

    #[arg(long)]
    pub program_id: Option<String>,

    #[arg(long)]
    pub idl_dir: Option<PathBuf>,

    #[arg(long)]
    pub binary_install_dir: Option<PathBuf>,

    #[arg(long)]
    pub program_dir: Option<PathBuf>,

    /// Delete an existing IDL before generating.
    #[arg(long)]
    pub remove_existing_idl: bool,
}
