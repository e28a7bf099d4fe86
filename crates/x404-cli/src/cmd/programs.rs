use anyhow::Result;
use serde::Serialize;
use x404_context::{create_context, Cluster, ContextConfig};

use crate::output;

#[derive(Debug, Serialize)]
pub struct ProgramInfo {
    pub name: String,
    pub address: String,
    pub locked: bool,
}

#[derive(Debug, Serialize)]
pub struct ProgramsOut {
    pub endpoint: String,
    pub cluster: Cluster,
    pub programs: Vec<ProgramInfo>,
}

pub async fn run(url: &str, cluster: Option<Cluster>, verify: bool) -> Result<()> {
    let config = ContextConfig {
        cluster,
        verify_endpoint: verify,
        ..ContextConfig::with_endpoint(url)
    };
    let mut ctx = create_context(config).await?;
    ctx.use_plugin(&x404_client::sol_x404())?;

    let programs = ctx
        .programs
        .iter()
        .map(|(name, reg)| ProgramInfo {
            name: name.clone(),
            address: reg.program.public_key().to_string(),
            locked: reg.locked,
        })
        .collect();

    output::print(&ProgramsOut {
        endpoint: ctx.config.endpoint.clone(),
        cluster: ctx.cluster,
        programs,
    })?;
    Ok(())
}
