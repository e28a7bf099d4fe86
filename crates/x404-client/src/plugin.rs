//! Context plugin registering solX404.

use tracing::debug;
use x404_context::{ClientContext, ContextPlugin, ContextResult};

use crate::program::create_sol_x404_program;

/// Register solX404 in `context` as a non-overridable program.
pub fn install(context: &mut ClientContext) -> ContextResult<()> {
    context.programs.add(create_sol_x404_program(), false)?;
    debug!(cluster = %context.cluster, "solX404 installed");
    Ok(())
}

/// Plugin form of [`install`].
#[derive(Debug, Clone, Copy, Default)]
pub struct SolX404Plugin;

impl ContextPlugin for SolX404Plugin {
    fn install(&self, context: &mut ClientContext) -> ContextResult<()> {
        install(context)
    }
}

pub fn sol_x404() -> SolX404Plugin {
    SolX404Plugin
}
