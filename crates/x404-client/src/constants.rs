//! Constants shared between the on-chain program and clients.
//!
//! Keep these stable: the program id and name are what clients look the
//! program up by.

use solana_program::pubkey::Pubkey;

/// Logical name the program is registered under.
pub const SOL_X404_PROGRAM_NAME: &str = "solX404";

/// Deployed program id, base58.
pub const SOL_X404_PROGRAM_ID_STR: &str = "BTz8yJGxKm6jEZAncTCMHDs4uTFvi5sVMUjCBUwfVkUM";

/// Deployed program id.
pub const SOL_X404_PROGRAM_ID: Pubkey =
    solana_program::pubkey!("BTz8yJGxKm6jEZAncTCMHDs4uTFvi5sVMUjCBUwfVkUM");

/// Program crate name used when generating the IDL.
pub const SOL_X404_IDL_NAME: &str = "sol_x404_program";

/// Anchor numbers custom errors from this offset.
pub const CUSTOM_ERROR_OFFSET: u32 = 6000;
