//! Wire decoding errors

use core::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum WireError {
    /// Payload shorter than the field being read
    UnexpectedEnd = 0,
    /// Leading opcode byte does not match the expected instruction
    UnknownOpcode = 1,
    /// Payload has bytes left over after the last field
    TrailingBytes = 2,
}

impl fmt::Display for WireError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WireError::UnexpectedEnd => f.write_str("instruction data ended early"),
            WireError::UnknownOpcode => f.write_str("unknown instruction opcode"),
            WireError::TrailingBytes => f.write_str("instruction data has trailing bytes"),
        }
    }
}

impl core::error::Error for WireError {}
