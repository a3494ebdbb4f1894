//! Instruction data helpers
//!
//! Little-endian readers with bounds checking. Every read returns an error
//! instead of panicking on short input.

use crate::error::WireError;

/// Read a u8 from instruction data
#[inline]
pub fn read_u8(data: &[u8], offset: usize) -> Result<u8, WireError> {
    data.get(offset).copied().ok_or(WireError::UnexpectedEnd)
}

/// Read a u64 (little-endian) from instruction data
#[inline]
pub fn read_u64(data: &[u8], offset: usize) -> Result<u64, WireError> {
    let end = offset.checked_add(8).ok_or(WireError::UnexpectedEnd)?;
    if end > data.len() {
        return Err(WireError::UnexpectedEnd);
    }
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(&data[offset..end]);
    Ok(u64::from_le_bytes(bytes))
}

/// Write a u64 (little-endian) into `out` at `offset`
#[inline]
pub fn write_u64(out: &mut [u8], offset: usize, value: u64) -> Result<(), WireError> {
    let end = offset.checked_add(8).ok_or(WireError::UnexpectedEnd)?;
    if end > out.len() {
        return Err(WireError::UnexpectedEnd);
    }
    out[offset..end].copy_from_slice(&value.to_le_bytes());
    Ok(())
}

/// Sequential reader over instruction data
pub struct InstructionReader<'a> {
    data: &'a [u8],
    offset: usize,
}

impl<'a> InstructionReader<'a> {
    #[inline]
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, offset: 0 }
    }

    #[inline]
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Bytes not yet consumed
    #[inline]
    pub fn remaining(&self) -> usize {
        self.data.len().saturating_sub(self.offset)
    }

    #[inline]
    pub fn read_u8(&mut self) -> Result<u8, WireError> {
        let val = read_u8(self.data, self.offset)?;
        self.offset += 1;
        Ok(val)
    }

    #[inline]
    pub fn read_u64(&mut self) -> Result<u64, WireError> {
        let val = read_u64(self.data, self.offset)?;
        self.offset += 8;
        Ok(val)
    }

    /// Fail if anything is left after the last expected field
    #[inline]
    pub fn finish(&self) -> Result<(), WireError> {
        if self.remaining() == 0 {
            Ok(())
        } else {
            Err(WireError::TrailingBytes)
        }
    }
}
