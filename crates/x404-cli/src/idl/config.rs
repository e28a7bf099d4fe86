//! IDL generation parameters.
//!
//! Parameters come from a JSON file (camelCase keys) and may be overridden
//! from the command line. Relative paths in a file are resolved against the
//! directory holding that file.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use solana_program::pubkey::Pubkey;

use x404_client::{SOL_X404_IDL_NAME, SOL_X404_PROGRAM_ID_STR};

/// Tool producing the IDL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum IdlGenerator {
    Shank,
    Anchor,
}

impl IdlGenerator {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Shank => "shank",
            Self::Anchor => "anchor",
        }
    }
}

impl fmt::Display for IdlGenerator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct IdlConfig {
    pub generator: IdlGenerator,

    /// Name of the produced IDL, `<idl_dir>/<program_name>.json`.
    pub program_name: String,

    /// Program id written into the IDL metadata.
    pub program_id: String,

    pub idl_dir: PathBuf,

    /// Root for generator binaries installed on demand (`<dir>/bin/<tool>`).
    pub binary_install_dir: PathBuf,

    /// Crate root of the program.
    pub program_dir: PathBuf,

    /// Delete a previously generated IDL before running the generator.
    pub remove_existing_idl: bool,
}

impl Default for IdlConfig {
    fn default() -> Self {
        Self {
            generator: IdlGenerator::Shank,
            program_name: SOL_X404_IDL_NAME.to_string(),
            program_id: SOL_X404_PROGRAM_ID_STR.to_string(),
            idl_dir: PathBuf::from("idls"),
            binary_install_dir: PathBuf::from(".crates"),
            program_dir: PathBuf::from("programs").join("sol-x404"),
            remove_existing_idl: false,
        }
    }
}

impl IdlConfig {
    /// Load a config file. Missing keys take their defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("reading idl config {}", path.display()))?;
        let mut cfg: IdlConfig = serde_json::from_str(&raw)
            .with_context(|| format!("parsing idl config {}", path.display()))?;

        if let Some(base) = path.parent() {
            cfg.rebase(base);
        }
        Ok(cfg)
    }

    fn rebase(&mut self, base: &Path) {
        for p in [
            &mut self.idl_dir,
            &mut self.binary_install_dir,
            &mut self.program_dir,
        ] {
            if p.is_relative() {
                *p = base.join(&*p);
            }
        }
    }

    /// Path of the IDL file the generator is expected to produce.
    pub fn idl_path(&self) -> PathBuf {
        self.idl_dir.join(format!("{}.json", self.program_name))
    }

    pub fn program_pubkey(&self) -> Result<Pubkey> {
        self.program_id
            .parse()
            .map_err(|_| anyhow::anyhow!("invalid program id: {}", self.program_id))
    }

    pub fn validate(&self) -> Result<()> {
        if self.program_name.trim().is_empty() {
            bail!("program name is empty");
        }
        if self.program_name.contains(['/', '\\']) {
            bail!("program name must not contain path separators: {}", self.program_name);
        }
        self.program_pubkey()?;
        if !self.program_dir.is_dir() {
            bail!("program directory not found: {}", self.program_dir.display());
        }
        Ok(())
    }
}
