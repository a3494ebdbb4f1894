//! Checked integer helpers for quoting
//!
//! Everything returns `Err(ArithmeticError::Overflow)` instead of wrapping or
//! saturating. Division is always floor.

use crate::error::ArithmeticError;

/// Basis points scale (10,000 bps = 100%)
pub const BPS_SCALE: u128 = 10_000;

/// Multiply with overflow check
#[inline]
pub fn mul(a: u128, b: u128) -> Result<u128, ArithmeticError> {
    a.checked_mul(b).ok_or(ArithmeticError::Overflow)
}

/// Add with overflow check
#[inline]
pub fn add(a: u128, b: u128) -> Result<u128, ArithmeticError> {
    a.checked_add(b).ok_or(ArithmeticError::Overflow)
}

/// Subtract with underflow check
#[inline]
pub fn sub(a: u128, b: u128) -> Result<u128, ArithmeticError> {
    a.checked_sub(b).ok_or(ArithmeticError::Overflow)
}

/// floor(a * b / c)
#[inline]
pub fn mul_div_floor(a: u128, b: u128, c: u128) -> Result<u128, ArithmeticError> {
    mul(a, b)?.checked_div(c).ok_or(ArithmeticError::Overflow)
}

/// floor(value * (10000 - bps) / 10000)
#[inline]
pub fn apply_bps_discount(value: u64, bps: u16) -> Result<u64, ArithmeticError> {
    let keep = sub(BPS_SCALE, bps as u128)?;
    to_u64(mul_div_floor(value as u128, keep, BPS_SCALE)?)
}

/// floor(num * 10000 / den) for `num <= den`
///
/// Both operands are shifted right together until `num * 10000` fits in
/// 128 bits. The shift drops at most one part in 2^100 of precision.
pub fn ratio_bps(num: u128, den: u128) -> Result<u32, ArithmeticError> {
    if den == 0 || num > den {
        return Err(ArithmeticError::Overflow);
    }
    let bits = 128 - den.leading_zeros();
    let shift = bits.saturating_sub(114);
    let (num, den) = (num >> shift, den >> shift);
    let bps = mul_div_floor(num, BPS_SCALE, den)?;
    u32::try_from(bps).map_err(|_| ArithmeticError::Overflow)
}

/// Narrow to u64
#[inline]
pub fn to_u64(x: u128) -> Result<u64, ArithmeticError> {
    u64::try_from(x).map_err(|_| ArithmeticError::Overflow)
}
