//! Generator binary resolution.
//!
//! Generator binaries live under `<binary_install_dir>/bin`. A missing binary,
//! or one whose version does not satisfy the library requirement the program
//! crate declares, is (re)installed with `cargo install --root`.

use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use semver::{Version, VersionReq};
use tokio::process::Command;
use tracing::{info, warn};

/// A generator tool distributed as a cargo crate.
#[derive(Debug, Clone, Copy)]
pub struct RustBin {
    /// Executable name.
    pub bin: &'static str,
    /// Crate providing the executable.
    pub crate_name: &'static str,
    /// Library crate the program depends on; its version selects the binary.
    pub lib_name: &'static str,
}

pub const SHANK: RustBin = RustBin {
    bin: "shank",
    crate_name: "shank-cli",
    lib_name: "shank",
};

impl RustBin {
    pub fn path_in(&self, install_dir: &Path) -> PathBuf {
        let file = if cfg!(windows) {
            format!("{}.exe", self.bin)
        } else {
            self.bin.to_string()
        };
        install_dir.join("bin").join(file)
    }
}

/// Version requirement on a library, as written in a crate manifest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LibRequirement {
    pub raw: String,
    pub req: VersionReq,
}

impl LibRequirement {
    pub fn parse(raw: &str) -> Result<Self> {
        let raw = raw.trim().to_string();
        let req = VersionReq::parse(&raw)
            .with_context(|| format!("invalid version requirement: {raw}"))?;
        Ok(Self { raw, req })
    }

    /// Argument for `cargo install --version`. Cargo reads a bare version
    /// there as an exact pin, unlike a manifest, so make the caret explicit.
    pub fn install_arg(&self) -> String {
        if self.raw.starts_with(|c: char| c.is_ascii_digit()) {
            format!("^{}", self.raw)
        } else {
            self.raw.clone()
        }
    }
}

/// Locate the binary, installing it when missing or outdated.
pub async fn ensure_binary(
    tool: &RustBin,
    install_dir: &Path,
    program_dir: &Path,
    cargo: &OsStr,
) -> Result<PathBuf> {
    let wanted = lib_requirement(&program_dir.join("Cargo.toml"), tool.lib_name)?;
    let path = tool.path_in(install_dir);

    if path.exists() {
        let Some(wanted) = &wanted else {
            return Ok(path);
        };
        match installed_version(&path).await {
            Some(have) if wanted.req.matches(&have) => return Ok(path),
            have => {
                let installed = have.map(|v| v.to_string());
                warn!(
                    bin = tool.bin,
                    wanted = %wanted.req,
                    installed = installed.as_deref().unwrap_or("unknown"),
                    "generator version mismatch, reinstalling"
                );
            }
        }
    }

    install(tool, install_dir, wanted.as_ref(), cargo).await?;
    if !path.exists() {
        bail!("{} was installed but {} is missing", tool.crate_name, path.display());
    }
    Ok(path)
}

async fn install(
    tool: &RustBin,
    install_dir: &Path,
    version: Option<&LibRequirement>,
    cargo: &OsStr,
) -> Result<()> {
    let version = version.map(LibRequirement::install_arg);
    info!(
        krate = tool.crate_name,
        version = version.as_deref().unwrap_or("latest"),
        root = %install_dir.display(),
        "installing generator"
    );

    let mut cmd = Command::new(cargo);
    cmd.arg("install").arg(tool.crate_name).arg("--root").arg(install_dir);
    if let Some(v) = &version {
        cmd.arg("--version").arg(v);
    }
    cmd.arg("--locked");

    let out = cmd
        .output()
        .await
        .with_context(|| format!("spawning cargo install {}", tool.crate_name))?;
    if !out.status.success() {
        bail!(
            "cargo install {} failed ({}): {}",
            tool.crate_name,
            out.status,
            String::from_utf8_lossy(&out.stderr).trim()
        );
    }
    Ok(())
}

async fn installed_version(path: &Path) -> Option<Version> {
    let out = Command::new(path).arg("--version").output().await.ok()?;
    if !out.status.success() {
        return None;
    }
    parse_version_output(&String::from_utf8_lossy(&out.stdout))
}

/// `"shank-cli 0.4.2\n"` -> `0.4.2`.
fn parse_version_output(s: &str) -> Option<Version> {
    let last = s.split_whitespace().last()?;
    Version::parse(last.trim_start_matches('v')).ok()
}

/// Requirement on `lib` declared in a crate manifest, if any.
///
/// Accepts both `lib = "<req>"` and `lib = { version = "<req>" }`.
pub fn lib_requirement(manifest: &Path, lib: &str) -> Result<Option<LibRequirement>> {
    if !manifest.exists() {
        return Ok(None);
    }
    let raw = fs::read_to_string(manifest)
        .with_context(|| format!("reading {}", manifest.display()))?;
    let doc: toml::Table = raw
        .parse()
        .with_context(|| format!("parsing {}", manifest.display()))?;

    let dep = doc.get("dependencies").and_then(|d| d.get(lib));
    let req = match dep {
        Some(toml::Value::String(s)) => Some(s.as_str()),
        Some(toml::Value::Table(t)) => t.get("version").and_then(|v| v.as_str()),
        _ => None,
    };

    req.filter(|r| !r.trim().is_empty())
        .map(LibRequirement::parse)
        .transpose()
        .with_context(|| format!("{} dependency in {}", lib, manifest.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn manifest(dir: &Path, deps: &str) -> PathBuf {
        let path = dir.join("Cargo.toml");
        fs::write(
            &path,
            format!("[package]\nname = \"p\"\nversion = \"0.1.0\"\n\n[dependencies]\n{deps}\n"),
        )
        .unwrap();
        path
    }

    fn v(s: &str) -> Version {
        Version::parse(s).unwrap()
    }

    #[test]
    fn bare_requirement_is_caret() {
        let dir = tempfile::tempdir().unwrap();
        let m = manifest(dir.path(), "shank = \"0.4\"");
        let req = lib_requirement(&m, "shank").unwrap().unwrap();

        assert_eq!(req.raw, "0.4");
        assert!(req.req.matches(&v("0.4.2")));
        assert!(!req.req.matches(&v("0.5.0")));
        assert_eq!(req.install_arg(), "^0.4");
    }

    #[test]
    fn table_requirement_with_operator() {
        let dir = tempfile::tempdir().unwrap();
        let m = manifest(dir.path(), "shank = { version = \"=0.3.0\", optional = true }");
        let req = lib_requirement(&m, "shank").unwrap().unwrap();

        assert!(req.req.matches(&v("0.3.0")));
        assert!(!req.req.matches(&v("0.3.1")));
        assert_eq!(req.install_arg(), "=0.3.0");
    }

    #[test]
    fn requirement_absent() {
        let dir = tempfile::tempdir().unwrap();
        let m = manifest(dir.path(), "borsh = \"1\"");
        assert_eq!(lib_requirement(&m, "shank").unwrap(), None);
        assert_eq!(lib_requirement(&dir.path().join("nope.toml"), "shank").unwrap(), None);
    }

    #[test]
    fn malformed_requirement_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let m = manifest(dir.path(), "shank = \"not a version\"");
        assert!(lib_requirement(&m, "shank").is_err());
    }

    #[test]
    fn version_output_parsing() {
        assert_eq!(parse_version_output("shank-cli 0.4.2\n"), Some(v("0.4.2")));
        assert_eq!(parse_version_output("anchor-cli v0.30.1"), Some(v("0.30.1")));
        assert_eq!(parse_version_output("shank-cli dev"), None);
        assert_eq!(parse_version_output("  "), None);
    }

    #[test]
    fn binary_path_is_under_bin() {
        let p = SHANK.path_in(Path::new(".crates"));
        assert!(p.starts_with(Path::new(".crates").join("bin")));
    }
}
