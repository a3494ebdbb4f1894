//! Constant product quoting (x·y=k) with fee on input
//!
//! - Δx_net = Δx_in · (10000 - fee_bps) / 10000
//! - Δy_out = Δx_net · y0 / (x0 + Δx_net)
//! - min_out = Δy_out · (10000 - slippage_bps) / 10000
//!
//! All divisions floor, all intermediates are u128 and checked.

use crate::error::ArithmeticError;
use crate::math::{self, BPS_SCALE};

/// Reserve snapshot of one pool, oriented in the swap direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolReserves {
    /// Reserve of the asset being sold to the pool
    pub reserve_in: u64,
    /// Reserve of the asset being bought from the pool
    pub reserve_out: u64,
    /// Trade fee in basis points, below 10000
    pub fee_rate_bps: u16,
    /// Market lot size of the input asset
    pub lot_size_in: u64,
    /// Market lot size of the output asset
    pub lot_size_out: u64,
}

impl PoolReserves {
    pub fn new(reserve_in: u64, reserve_out: u64, fee_rate_bps: u16) -> Self {
        Self {
            reserve_in,
            reserve_out,
            fee_rate_bps,
            lot_size_in: 1,
            lot_size_out: 1,
        }
    }

    pub fn with_lot_sizes(mut self, lot_size_in: u64, lot_size_out: u64) -> Self {
        self.lot_size_in = lot_size_in;
        self.lot_size_out = lot_size_out;
        self
    }

    /// Same pool seen from the other side
    pub fn reversed(&self) -> Self {
        Self {
            reserve_in: self.reserve_out,
            reserve_out: self.reserve_in,
            fee_rate_bps: self.fee_rate_bps,
            lot_size_in: self.lot_size_out,
            lot_size_out: self.lot_size_in,
        }
    }
}

/// Result of quoting a fixed-input swap
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SwapQuote {
    pub amount_in: u64,
    /// Input left after the pool fee
    pub amount_in_after_fee: u64,
    pub amount_out_expected: u64,
    /// Floor the swap instruction enforces on-chain
    pub amount_out_min: u64,
    /// Move of the pool price caused by this trade, relative to spot
    pub price_impact_bps: u32,
}

/// Quote selling `amount_in` into the pool
pub fn quote(
    reserves: &PoolReserves,
    amount_in: u64,
    slippage_bps: u16,
) -> Result<SwapQuote, ArithmeticError> {
    if reserves.reserve_in == 0 || reserves.reserve_out == 0 {
        return Err(ArithmeticError::ZeroReserve);
    }
    if amount_in == 0 {
        return Err(ArithmeticError::ZeroAmount);
    }
    if reserves.fee_rate_bps as u128 >= BPS_SCALE {
        return Err(ArithmeticError::InvalidFeeRate(reserves.fee_rate_bps));
    }
    if slippage_bps as u128 > BPS_SCALE {
        return Err(ArithmeticError::InvalidSlippage(slippage_bps));
    }

    let x0 = reserves.reserve_in as u128;
    let y0 = reserves.reserve_out as u128;

    let amount_in_after_fee = math::apply_bps_discount(amount_in, reserves.fee_rate_bps)?;
    let dx_net = amount_in_after_fee as u128;

    // Δy = Δx_net · y0 / (x0 + Δx_net)
    let x1 = math::add(x0, dx_net)?;
    let dy_out = math::mul_div_floor(dx_net, y0, x1)?;
    let amount_out_expected = math::to_u64(dy_out)?;

    if amount_out_expected >= reserves.reserve_out {
        return Err(ArithmeticError::ReserveExhausted {
            amount_out: amount_out_expected,
            reserve_out: reserves.reserve_out,
        });
    }

    let amount_out_min = math::apply_bps_discount(amount_out_expected, slippage_bps)?;
    let price_impact_bps = price_impact_bps(x0, y0, amount_in as u128, dy_out)?;

    log::trace!(
        "quote in={} net={} out={} min={} impact={}bps",
        amount_in,
        amount_in_after_fee,
        amount_out_expected,
        amount_out_min,
        price_impact_bps
    );

    Ok(SwapQuote {
        amount_in,
        amount_in_after_fee,
        amount_out_expected,
        amount_out_min,
        price_impact_bps,
    })
}

/// (spot - post) / spot in bps
///
/// spot = y0 / x0, post = (y0 - Δy) / (x0 + Δx). Cross-multiplied:
/// 1 - (y0 - Δy)·x0 / ((x0 + Δx)·y0)
///
/// x0 and x0 + Δx only appear as a ratio, so both are shifted right together
/// until they fit in 64 bits. Every product then stays below 2^128.
fn price_impact_bps(x0: u128, y0: u128, dx: u128, dy: u128) -> Result<u32, ArithmeticError> {
    let x1 = math::add(x0, dx)?;
    let shift = (128 - x1.leading_zeros()).saturating_sub(64);
    let (x0, x1) = (x0 >> shift, x1 >> shift);

    let den = math::mul(x1, y0)?;
    let post = math::mul(math::sub(y0, dy)?, x0)?;
    math::ratio_bps(math::sub(den, post)?, den)
}
