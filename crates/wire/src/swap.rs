//! `SwapBaseIn` instruction payload
//!
//! Layout (17 bytes):
//! - `[0]`     opcode (9)
//! - `[1..9]`  amount_in, u64 little-endian
//! - `[9..17]` minimum_amount_out, u64 little-endian

use crate::error::WireError;
use crate::instruction::{write_u64, InstructionReader};

/// Opcode of the fixed-input swap in the AMM program
pub const SWAP_BASE_IN_OPCODE: u8 = 9;

/// Number of accounts the swap instruction expects
pub const SWAP_ACCOUNT_COUNT: usize = 18;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SwapBaseIn {
    pub amount_in: u64,
    pub minimum_amount_out: u64,
}

impl SwapBaseIn {
    pub const LEN: usize = 1 + 8 + 8;

    pub fn new(amount_in: u64, minimum_amount_out: u64) -> Self {
        Self {
            amount_in,
            minimum_amount_out,
        }
    }

    /// Encode as the exact bytes the program expects
    pub fn pack(&self) -> [u8; Self::LEN] {
        let mut out = [0u8; Self::LEN];
        out[0] = SWAP_BASE_IN_OPCODE;
        // Cannot fail: offsets are inside the fixed array
        let _ = write_u64(&mut out, 1, self.amount_in);
        let _ = write_u64(&mut out, 9, self.minimum_amount_out);
        out
    }

    /// Decode a payload produced by [`SwapBaseIn::pack`]
    pub fn unpack(data: &[u8]) -> Result<Self, WireError> {
        let mut reader = InstructionReader::new(data);
        if reader.read_u8()? != SWAP_BASE_IN_OPCODE {
            return Err(WireError::UnknownOpcode);
        }
        let amount_in = reader.read_u64()?;
        let minimum_amount_out = reader.read_u64()?;
        reader.finish()?;
        Ok(Self {
            amount_in,
            minimum_amount_out,
        })
    }
}
