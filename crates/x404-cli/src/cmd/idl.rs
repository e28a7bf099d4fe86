use anyhow::Result;
use tracing::info;

use crate::args::IdlArgs;
use crate::idl::{generate_idl, IdlConfig};
use crate::output;

pub async fn run(args: &IdlArgs) -> Result<()> {
    let cfg = resolve_config(args)?;
    let generated = generate_idl(&cfg).await?;
    output::print(&generated)?;
    Ok(())
}

/// File settings (if the file exists), then flags on top.
fn resolve_config(args: &IdlArgs) -> Result<IdlConfig> {
    let mut cfg = if args.config.exists() {
        IdlConfig::load(&args.config)?
    } else {
        info!(config = %args.config.display(), "config file not found, using defaults");
        IdlConfig::default()
    };

    if let Some(g) = args.generator {
        cfg.generator = g;
    }
    if let Some(name) = &args.program_name {
        cfg.program_name = name.clone();
    }
    if let Some(id) = &args.program_id {
        cfg.program_id = id.clone();
    }
    if let Some(dir) = &args.idl_dir {
        cfg.idl_dir = dir.clone();
    }
    if let Some(dir) = &args.binary_install_dir {
        cfg.binary_install_dir = dir.clone();
    }
    if let Some(dir) = &args.program_dir {
        cfg.program_dir = dir.clone();
    }
    if args.remove_existing_idl {
        cfg.remove_existing_idl = true;
    }
    Ok(cfg)
}
