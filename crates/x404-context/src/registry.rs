//! Program registry.
//!
//! The registry maps logical program names to program instances and provides
//! deterministic lookup.
//!
//! Requirements:
//! - stable ordering for lookups and iteration
//! - clear errors for missing or locked programs
//! - no global mutable state
//!
//! An entry registered as non-overridable is locked: a later registration
//! under the same name is accepted only when it points at the same address,
//! in which case it is a no-op.

use std::collections::BTreeMap;
use std::sync::Arc;

use solana_program::pubkey::Pubkey;
use tracing::debug;

use crate::errors::{ContextError, ContextResult};
use crate::program::{validate_name, Program};

/// A program instance plus its lock flag.
#[derive(Clone)]
pub struct RegisteredProgram {
    pub program: Arc<dyn Program>,
    pub locked: bool,
}

/// A registry of programs keyed by logical name.
#[derive(Clone, Default)]
pub struct ProgramRegistry {
    programs: BTreeMap<String, RegisteredProgram>,
}

impl ProgramRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            programs: BTreeMap::new(),
        }
    }

    /// Number of registered programs.
    pub fn len(&self) -> usize {
        self.programs.len()
    }

    /// Returns true if registry is empty.
    pub fn is_empty(&self) -> bool {
        self.programs.is_empty()
    }

    /// Register a program.
    ///
    /// With `overridable = false` the entry is locked against later
    /// registrations that point the same name at a different address.
    pub fn add<P>(&mut self, program: P, overridable: bool) -> ContextResult<()>
    where
        P: Program + 'static,
    {
        self.add_shared(Arc::new(program), overridable)
    }

    /// Register an already shared program instance.
    pub fn add_shared(&mut self, program: Arc<dyn Program>, overridable: bool) -> ContextResult<()> {
        validate_name(program.name())?;
        program.validate()?;

        let name = program.name().to_string();
        let attempted = program.public_key();

        if let Some(existing) = self.programs.get(&name) {
            if existing.locked {
                let current = existing.program.public_key();
                if current == attempted {
                    debug!(%name, address = %attempted, "program already registered and locked");
                    return Ok(());
                }
                return Err(ContextError::ProgramLocked {
                    name,
                    existing: current,
                    attempted,
                });
            }
            debug!(
                %name,
                previous = %existing.program.public_key(),
                address = %attempted,
                "replacing overridable program"
            );
        } else {
            debug!(%name, address = %attempted, locked = !overridable, "registering program");
        }

        self.programs.insert(
            name,
            RegisteredProgram {
                program,
                locked: !overridable,
            },
        );
        Ok(())
    }

    /// Get a program by name.
    pub fn get(&self, name: &str) -> ContextResult<&dyn Program> {
        self.programs
            .get(name)
            .map(|r| r.program.as_ref())
            .ok_or_else(|| ContextError::ProgramNotRecognized {
                name: name.to_string(),
            })
    }

    /// Address of the program registered under `name`.
    pub fn get_public_key(&self, name: &str) -> ContextResult<Pubkey> {
        self.get(name).map(|p| p.public_key())
    }

    /// Reverse lookup by on-chain address.
    pub fn get_by_address(&self, address: &Pubkey) -> Option<&dyn Program> {
        self.programs
            .values()
            .map(|r| r.program.as_ref())
            .find(|p| p.public_key() == *address)
    }

    /// Returns true if the program is registered and locked.
    pub fn is_locked(&self, name: &str) -> bool {
        self.programs.get(name).map(|r| r.locked).unwrap_or(false)
    }

    /// List program names in deterministic order.
    pub fn names(&self) -> Vec<String> {
        self.programs.keys().cloned().collect()
    }

    /// Iterate over registered programs in deterministic name order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &RegisteredProgram)> {
        self.programs.iter()
    }
}
