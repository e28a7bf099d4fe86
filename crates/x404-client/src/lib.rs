//! x404-client
//!
//! Client plugin for the solX404 on-chain program.
//!
//! It includes:
//! - the program id and name constants
//! - the custom error table of the program
//! - a descriptor factory and the plugin installing it into a client context
//!
//! Instruction building and account decoding live with the program, not here.

pub mod constants;
pub mod errors;
pub mod plugin;
pub mod program;

pub use constants::*;
pub use errors::SolX404Error;
pub use plugin::{install, sol_x404, SolX404Plugin};
pub use program::{create_sol_x404_program, get_sol_x404_program_id};
