//! Custom errors returned by the solX404 program.

use solana_program::program_error::ProgramError;
use thiserror::Error;
use x404_context::ProgramErrorInfo;

use crate::constants::CUSTOM_ERROR_OFFSET;

#[derive(Clone, Copy, Debug, Eq, Error, PartialEq)]
#[repr(u32)]
pub enum SolX404Error {
    /// 6000 (0x1770)
    #[error("Invalid Length")]
    InvalidLength = 6000,
    /// 6001 (0x1771)
    #[error("Can only call by Factory")]
    OnlyCallByFactory,
    /// 6002 (0x1772)
    #[error("Target NFT is not blue chip NFT")]
    NotBlueChipNFT,
    /// 6003 (0x1773)
    #[error("Corresponding X404 not created yet")]
    X404NotCreate,
    /// 6004 (0x1774)
    #[error("Corresponding X404 not created yet")]
    CantBeZeroAddress,
    /// 6005 (0x1775)
    #[error("Shoule be sined by NFT address")]
    InvalidNFTAddress,
    /// 6006 (0x1776)
    #[error("Invalid Redeem DeadLine")]
    InvalidDeadLine,
    /// 6007 (0x1777)
    #[error("NFT cannot be redeemed yet")]
    NFTCannotRedeem,
    /// 6008 (0x1778)
    #[error("Failed to redeem token")]
    RemoveFailed,
    /// 6009 (0x1779)
    #[error("Current state is emergency closed")]
    EmergencyClose,
    /// 6010 (0x177a)
    #[error("Invalid max redeem deadline")]
    InvaildRedeemMaxDeadline,
    /// 6011 (0x177b)
    #[error("Insufficient fee for redeem")]
    MsgValueNotEnough,
    /// 6012 (0x177c)
    #[error("Failed to send Sol token")]
    SendSolFailed,
    /// 6013 (0x177d)
    #[error("Redeem fee is too high")]
    RedeemFeeTooHigh,
    /// 6014 (0x177e)
    #[error("Collection is not verified yet")]
    NotVerifiedCollection,
    /// 6015 (0x177f)
    #[error("Failed to generate account")]
    FailedToGenerateAccount,
}

impl SolX404Error {
    /// Every variant in code order.
    pub const ALL: [SolX404Error; 16] = [
        Self::InvalidLength,
        Self::OnlyCallByFactory,
        Self::NotBlueChipNFT,
        Self::X404NotCreate,
        Self::CantBeZeroAddress,
        Self::InvalidNFTAddress,
        Self::InvalidDeadLine,
        Self::NFTCannotRedeem,
        Self::RemoveFailed,
        Self::EmergencyClose,
        Self::InvaildRedeemMaxDeadline,
        Self::MsgValueNotEnough,
        Self::SendSolFailed,
        Self::RedeemFeeTooHigh,
        Self::NotVerifiedCollection,
        Self::FailedToGenerateAccount,
    ];

    pub fn code(self) -> u32 {
        self as u32
    }

    pub fn from_code(code: u32) -> Option<Self> {
        let index = code.checked_sub(CUSTOM_ERROR_OFFSET)? as usize;
        Self::ALL.get(index).copied()
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::InvalidLength => "InvalidLength",
            Self::OnlyCallByFactory => "OnlyCallByFactory",
            Self::NotBlueChipNFT => "NotBlueChipNFT",
            Self::X404NotCreate => "X404NotCreate",
            Self::CantBeZeroAddress => "CantBeZeroAddress",
            Self::InvalidNFTAddress => "InvalidNFTAddress",
            Self::InvalidDeadLine => "InvalidDeadLine",
            Self::NFTCannotRedeem => "NFTCannotRedeem",
            Self::RemoveFailed => "RemoveFailed",
            Self::EmergencyClose => "EmergencyClose",
            Self::InvaildRedeemMaxDeadline => "InvaildRedeemMaxDeadline",
            Self::MsgValueNotEnough => "MsgValueNotEnough",
            Self::SendSolFailed => "SendSolFailed",
            Self::RedeemFeeTooHigh => "RedeemFeeTooHigh",
            Self::NotVerifiedCollection => "NotVerifiedCollection",
            Self::FailedToGenerateAccount => "FailedToGenerateAccount",
        }
    }

    pub fn info(self) -> ProgramErrorInfo {
        ProgramErrorInfo::new(self.code(), self.name(), self.to_string())
    }
}

impl From<SolX404Error> for ProgramError {
    fn from(e: SolX404Error) -> Self {
        ProgramError::Custom(e as u32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_are_contiguous_from_offset() {
        for (i, e) in SolX404Error::ALL.iter().enumerate() {
            assert_eq!(e.code(), CUSTOM_ERROR_OFFSET + i as u32, "{}", e.name());
            assert_eq!(SolX404Error::from_code(e.code()), Some(*e));
        }
    }

    #[test]
    fn out_of_range_codes_are_unknown() {
        assert_eq!(SolX404Error::from_code(0), None);
        assert_eq!(SolX404Error::from_code(5999), None);
        assert_eq!(SolX404Error::from_code(6016), None);
    }

    #[test]
    fn converts_to_custom_program_error() {
        let e: ProgramError = SolX404Error::EmergencyClose.into();
        assert_eq!(e, ProgramError::Custom(6009));
    }

    #[test]
    fn info_carries_message() {
        let info = SolX404Error::RedeemFeeTooHigh.info();
        assert_eq!(info.code, 6013);
        assert_eq!(info.name, "RedeemFeeTooHigh");
        assert_eq!(info.message, "Redeem fee is too high");
    }
}
