//! solX404 program descriptor.

use solana_program::pubkey::Pubkey;
use x404_context::{ClientContext, ContextResult, ProgramDescriptor};

use crate::constants::{SOL_X404_PROGRAM_ID, SOL_X404_PROGRAM_NAME};
use crate::errors::SolX404Error;

/// Build the solX404 descriptor: name, program id and custom error table.
pub fn create_sol_x404_program() -> ProgramDescriptor {
    ProgramDescriptor::new(SOL_X404_PROGRAM_NAME, SOL_X404_PROGRAM_ID)
        .errors(SolX404Error::ALL.iter().map(|e| e.info()))
}

/// Address registered for solX404 in `context`, honoring its cluster.
pub fn get_sol_x404_program_id(context: &ClientContext) -> ContextResult<Pubkey> {
    context
        .program(SOL_X404_PROGRAM_NAME)
        .map(|p| p.public_key())
}
