//! IDL generation.
//!
//! Runs the configured generator against the program crate and stamps the
//! resulting IDL with the program address so downstream client generators
//! know where the program lives.

mod binary;
mod config;

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use serde::Serialize;
use serde_json::{Map, Value};
use tokio::process::Command;
use tracing::{info, warn};

pub use config::{IdlConfig, IdlGenerator};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedIdl {
    pub path: PathBuf,
    pub generator: IdlGenerator,
    pub program_id: String,
}

/// External programs the generators are driven through.
#[derive(Debug, Clone)]
pub struct Toolchain {
    pub cargo: OsString,
    pub anchor: OsString,
}

impl Default for Toolchain {
    fn default() -> Self {
        Self {
            cargo: OsString::from("cargo"),
            anchor: OsString::from("anchor"),
        }
    }
}

/// Generate the IDL described by `config`.
pub async fn generate_idl(config: &IdlConfig) -> Result<GeneratedIdl> {
    generate_idl_with(config, &Toolchain::default()).await
}

/// Generate the IDL, resolving `cargo` and `anchor` through `tools`.
pub async fn generate_idl_with(config: &IdlConfig, tools: &Toolchain) -> Result<GeneratedIdl> {
    config.validate()?;

    fs::create_dir_all(&config.idl_dir)
        .with_context(|| format!("creating {}", config.idl_dir.display()))?;

    let idl_path = config.idl_path();
    if config.remove_existing_idl && idl_path.exists() {
        info!(path = %idl_path.display(), "removing existing idl");
        fs::remove_file(&idl_path)
            .with_context(|| format!("removing {}", idl_path.display()))?;
    }

    let (program, args, cwd) = match config.generator {
        IdlGenerator::Shank => {
            let bin = binary::ensure_binary(
                &binary::SHANK,
                &config.binary_install_dir,
                &config.program_dir,
                &tools.cargo,
            )
            .await?;
            (bin.into_os_string(), shank_args(config), None)
        }
        IdlGenerator::Anchor => (
            tools.anchor.clone(),
            anchor_args(config),
            Some(config.program_dir.as_path()),
        ),
    };

    info!(
        generator = %config.generator,
        program = %config.program_name,
        program_dir = %config.program_dir.display(),
        "generating idl"
    );
    run(&program, &args, cwd).await?;

    if !idl_path.exists() {
        bail!(
            "{} finished but produced no idl at {}",
            config.generator,
            idl_path.display()
        );
    }
    stamp_metadata(&idl_path, &config.program_id, config.generator)?;

    info!(path = %idl_path.display(), "idl written");
    Ok(GeneratedIdl {
        path: idl_path,
        generator: config.generator,
        program_id: config.program_id.clone(),
    })
}

fn shank_args(config: &IdlConfig) -> Vec<OsString> {
    vec![
        "idl".into(),
        "--out-dir".into(),
        config.idl_dir.clone().into_os_string(),
        "--crate-root".into(),
        config.program_dir.clone().into_os_string(),
        "--program-id".into(),
        config.program_id.clone().into(),
    ]
}

fn anchor_args(config: &IdlConfig) -> Vec<OsString> {
    vec![
        "build".into(),
        "--idl".into(),
        absolute(&config.idl_dir).into_os_string(),
    ]
}

// anchor runs inside the program dir, so a relative idl dir would move.
fn absolute(p: &Path) -> PathBuf {
    if p.is_absolute() {
        return p.to_path_buf();
    }
    std::env::current_dir()
        .map(|cwd| cwd.join(p))
        .unwrap_or_else(|_| p.to_path_buf())
}

async fn run(program: &OsString, args: &[OsString], cwd: Option<&Path>) -> Result<()> {
    let mut cmd = Command::new(program);
    cmd.args(args);
    if let Some(dir) = cwd {
        cmd.current_dir(dir);
    }

    let out = cmd
        .output()
        .await
        .with_context(|| format!("spawning {}", Path::new(program).display()))?;
    if !out.status.success() {
        bail!(
            "{} exited with {}: {}",
            Path::new(program).display(),
            out.status,
            String::from_utf8_lossy(&out.stderr).trim()
        );
    }
    Ok(())
}

/// Set `metadata.address` and `metadata.origin`, keeping other metadata keys.
pub fn stamp_metadata(path: &Path, program_id: &str, generator: IdlGenerator) -> Result<()> {
    let raw = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let mut idl: Value =
        serde_json::from_str(&raw).with_context(|| format!("parsing {}", path.display()))?;

    let Some(root) = idl.as_object_mut() else {
        bail!("idl root is not an object: {}", path.display());
    };
    let metadata = root
        .entry("metadata")
        .or_insert_with(|| Value::Object(Map::new()));
    let Some(metadata) = metadata.as_object_mut() else {
        bail!("idl metadata is not an object: {}", path.display());
    };

    if let Some(prev) = metadata.get("address").and_then(Value::as_str) {
        if prev != program_id {
            warn!(previous = prev, address = program_id, "overwriting idl program address");
        }
    }
    metadata.insert("address".to_string(), Value::from(program_id));
    metadata.insert("origin".to_string(), Value::from(generator.as_str()));

    let mut out = serde_json::to_string_pretty(&idl)?;
    out.push('\n');
    fs::write(path, out).with_context(|| format!("writing {}", path.display()))?;
    Ok(())
}
