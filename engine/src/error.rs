//! Error taxonomy for the swap core
//!
//! Every failure is returned before any instruction is built, so callers
//! never receive a partial batch.

use solana_sdk::program_error::ProgramError;
use solana_sdk::signer::SignerError;
use thiserror::Error;

use crate::validate::Violation;

/// Request rejected before assembly; the caller can fix it
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid swap request: {}{}", first(.violations), more(.violations))]
pub struct ValidationError {
    pub violations: Vec<Violation>,
}

fn first(violations: &[Violation]) -> String {
    violations
        .first()
        .map(|v| v.to_string())
        .unwrap_or_else(|| "no violations recorded".to_string())
}

fn more(violations: &[Violation]) -> String {
    match violations.len() {
        0 | 1 => String::new(),
        n => format!(" (+{} more)", n - 1),
    }
}

impl ValidationError {
    pub fn new(violations: Vec<Violation>) -> Self {
        Self { violations }
    }

    pub fn single(field: &'static str, reason: impl Into<String>) -> Self {
        Self::new(vec![Violation::new(field, reason)])
    }

    /// First violation reported
    pub fn first(&self) -> Option<&Violation> {
        self.violations.first()
    }
}

/// Reserve snapshot or amounts cannot produce a quote
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ArithmeticError {
    #[error("pool reserve is zero")]
    ZeroReserve,
    #[error("input amount is zero")]
    ZeroAmount,
    #[error("fee rate {0} bps is not below 10000")]
    InvalidFeeRate(u16),
    #[error("slippage tolerance {0} bps exceeds 10000")]
    InvalidSlippage(u16),
    #[error("intermediate value overflowed")]
    Overflow,
    #[error("expected output {amount_out} would drain reserve {reserve_out}")]
    ReserveExhausted { amount_out: u64, reserve_out: u64 },
}

/// Program-derived address search failed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DerivationError {
    #[error("no off-curve address for any bump")]
    NoViableBump,
    #[error("too many seeds: {0} (max {max})", max = crate::address::MAX_SEEDS - 1)]
    TooManySeeds(usize),
    #[error("seed {index} is {len} bytes (max {max})", max = crate::address::MAX_SEED_LEN)]
    SeedTooLong { index: usize, len: usize },
}

/// Anything the core can fail with
#[derive(Debug, Error)]
pub enum SwapError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("quote failed: {0}")]
    Arithmetic(#[from] ArithmeticError),

    #[error("address derivation failed: {0}")]
    Derivation(#[from] DerivationError),

    /// Token program helper refused its inputs
    #[error("token instruction could not be built: {0}")]
    TokenInstruction(#[from] ProgramError),

    #[error("ephemeral signing failed: {0}")]
    Signing(#[from] SignerError),
}

pub type Result<T, E = SwapError> = std::result::Result<T, E>;
