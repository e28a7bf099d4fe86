//! Program descriptors.
//!
//! A program descriptor identifies a deployed on-chain program by a logical
//! name and its address, and carries the static metadata a client needs to
//! make sense of failures coming back from it:
//! - the custom error table
//! - the clusters the program is deployed on
//!
//! Descriptors are data-only and immutable once built.

use std::fmt;

use solana_program::pubkey::Pubkey;

use crate::cluster::Cluster;
use crate::errors::{ContextError, ContextResult};

/// A custom error a program can return.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgramErrorInfo {
    pub code: u32,
    pub name: String,
    pub message: String,
}

impl ProgramErrorInfo {
    pub fn new(code: u32, name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code,
            name: name.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ProgramErrorInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}): {}", self.name, self.code, self.message)
    }
}

/// Capabilities a registered program exposes to the context.
pub trait Program: Send + Sync {
    /// Logical name used as the registry key.
    fn name(&self) -> &str;

    /// On-chain address.
    fn public_key(&self) -> Pubkey;

    fn error_from_code(&self, _code: u32) -> Option<ProgramErrorInfo> {
        None
    }

    fn error_from_name(&self, _name: &str) -> Option<ProgramErrorInfo> {
        None
    }

    /// Whether the program is deployed on `cluster`.
    fn is_on_cluster(&self, _cluster: Cluster) -> bool {
        true
    }

    /// Checked by the registry before the program is stored.
    fn validate(&self) -> ContextResult<()> {
        Ok(())
    }
}

/// Static program description.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgramDescriptor {
    pub name: String,
    pub public_key: Pubkey,

    /// Custom errors, in code order.
    pub errors: Vec<ProgramErrorInfo>,

    /// Clusters the program is deployed on. Empty means all of them.
    pub clusters: Vec<Cluster>,
}

impl ProgramDescriptor {
    pub fn new(name: impl Into<String>, public_key: Pubkey) -> Self {
        Self {
            name: name.into(),
            public_key,
            errors: Vec::new(),
            clusters: Vec::new(),
        }
    }

    pub fn error(mut self, code: u32, name: impl Into<String>, message: impl Into<String>) -> Self {
        self.errors.push(ProgramErrorInfo::new(code, name, message));
        self
    }

    pub fn errors(mut self, errors: impl IntoIterator<Item = ProgramErrorInfo>) -> Self {
        self.errors.extend(errors);
        self
    }

    pub fn cluster(mut self, cluster: Cluster) -> Self {
        if !self.clusters.contains(&cluster) {
            self.clusters.push(cluster);
        }
        self
    }
}

impl Program for ProgramDescriptor {
    fn name(&self) -> &str {
        &self.name
    }

    fn public_key(&self) -> Pubkey {
        self.public_key
    }

    fn error_from_code(&self, code: u32) -> Option<ProgramErrorInfo> {
        self.errors.iter().find(|e| e.code == code).cloned()
    }

    fn error_from_name(&self, name: &str) -> Option<ProgramErrorInfo> {
        self.errors.iter().find(|e| e.name == name).cloned()
    }

    fn is_on_cluster(&self, cluster: Cluster) -> bool {
        self.clusters.is_empty() || self.clusters.contains(&cluster)
    }

    /// Rejects a bad name or duplicate error codes.
    fn validate(&self) -> ContextResult<()> {
        validate_name(&self.name)?;

        let mut codes: Vec<u32> = self.errors.iter().map(|e| e.code).collect();
        codes.sort_unstable();
        if let Some(w) = codes.windows(2).find(|w| w[0] == w[1]) {
            return Err(ContextError::invalid_program(format!(
                "{}: duplicate error code {}",
                self.name, w[0]
            )));
        }
        Ok(())
    }
}

pub(crate) fn validate_name(name: &str) -> ContextResult<()> {
    if name.trim().is_empty() {
        return Err(ContextError::invalid_program("program name is empty"));
    }
    if !name.is_ascii() {
        return Err(ContextError::invalid_program(format!(
            "program name must be ASCII: {name}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ProgramDescriptor {
        ProgramDescriptor::new("sample", Pubkey::new_unique())
            .error(6000, "InvalidLength", "Invalid Length")
            .error(6001, "OnlyCallByFactory", "Can only call by Factory")
    }

    #[test]
    fn descriptor_validate_ok() {
        sample().validate().unwrap();
    }

    #[test]
    fn empty_name_rejected() {
        let d = ProgramDescriptor::new("  ", Pubkey::new_unique());
        assert!(d.validate().is_err());
    }

    #[test]
    fn duplicate_error_codes_rejected() {
        let d = sample().error(6000, "Again", "dup");
        assert!(d.validate().is_err());
    }

    #[test]
    fn errors_resolve_by_code_and_name() {
        let d = sample();
        assert_eq!(d.error_from_code(6001).unwrap().name, "OnlyCallByFactory");
        assert_eq!(d.error_from_name("InvalidLength").unwrap().code, 6000);
        assert!(d.error_from_code(42).is_none());
        assert_eq!(
            d.error_from_code(6000).unwrap().to_string(),
            "InvalidLength (6000): Invalid Length"
        );
    }

    #[test]
    fn cluster_filter() {
        let anywhere = sample();
        assert!(anywhere.is_on_cluster(Cluster::MainnetBeta));

        let devnet_only = sample().cluster(Cluster::Devnet).cluster(Cluster::Devnet);
        assert_eq!(devnet_only.clusters, vec![Cluster::Devnet]);
        assert!(devnet_only.is_on_cluster(Cluster::Devnet));
        assert!(!devnet_only.is_on_cluster(Cluster::MainnetBeta));
    }
}
