use anyhow::Result;

use crate::args::{Cli, Command};

mod doctor;
mod idl;
mod programs;

pub async fn dispatch(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Idl(args) => idl::run(&args).await,
        Command::Programs { url, cluster, verify } => programs::run(&url, cluster, verify).await,
        Command::Doctor => doctor::run().await,
    }
}
