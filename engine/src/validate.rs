//! Pre-assembly request checks
//!
//! Checks are independent and all failures are collected, so a caller sees
//! every problem with a request at once.

use std::fmt;

use solana_sdk::pubkey::Pubkey;

use crate::config::{ProgramIds, ValidatorConfig};
use crate::error::ValidationError;
use crate::math::BPS_SCALE;
use crate::types::{PoolKeys, SwapRequest};

/// One rejected field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    pub field: &'static str,
    pub reason: String,
}

impl Violation {
    pub fn new(field: &'static str, reason: impl Into<String>) -> Self {
        Self {
            field,
            reason: reason.into(),
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.reason)
    }
}

/// Violations found in a request; empty means it may be assembled
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationResult {
    pub violations: Vec<Violation>,
}

impl ValidationResult {
    pub fn is_ok(&self) -> bool {
        self.violations.is_empty()
    }

    pub fn len(&self) -> usize {
        self.violations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    fn push(&mut self, field: &'static str, reason: impl Into<String>) {
        self.violations.push(Violation::new(field, reason));
    }

    /// Append the violations of another check, keeping their order
    pub fn merge(&mut self, other: ValidationResult) {
        self.violations.extend(other.violations);
    }

    pub fn into_result(self) -> Result<(), ValidationError> {
        if self.is_ok() {
            Ok(())
        } else {
            Err(ValidationError::new(self.violations))
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ParameterValidator {
    config: ValidatorConfig,
}

impl ParameterValidator {
    pub fn new(config: ValidatorConfig) -> Self {
        Self { config }
    }

    pub fn validate(&self, request: &SwapRequest) -> ValidationResult {
        let mut result = ValidationResult::default();

        if request.amount_in <= self.config.dust_threshold {
            result.push(
                "amount_in",
                format!(
                    "{} is not above the dust threshold {}",
                    request.amount_in, self.config.dust_threshold
                ),
            );
        }

        // Before quoting, the minimum output is zero exactly when the whole
        // output is allowed to slip away
        if request.amount_in > 0 && request.slippage_bps as u128 >= BPS_SCALE {
            result.push(
                "amount_out_min",
                format!(
                    "slippage of {} bps leaves no minimum output",
                    request.slippage_bps
                ),
            );
        }

        for (field, address) in [
            ("payer", &request.payer),
            ("input_mint", &request.input_mint),
            ("output_mint", &request.output_mint),
        ] {
            if *address == Pubkey::default() {
                result.push(field, "is the default address");
            }
        }

        if request.slippage_bps > self.config.max_slippage_bps {
            result.push(
                "slippage_bps",
                format!(
                    "{} bps is above the allowed maximum of {} bps",
                    request.slippage_bps, self.config.max_slippage_bps
                ),
            );
        }

        if request.input_mint == request.output_mint {
            result.push("output_mint", "is the same as input_mint");
        }

        result
    }

    /// Check the pool's accounts before any of them reach an instruction
    pub fn validate_pool(&self, pool: &PoolKeys, programs: &ProgramIds) -> ValidationResult {
        let mut result = ValidationResult::default();

        for (field, address) in [
            ("pool.program_id", &pool.program_id),
            ("pool.id", &pool.id),
            ("pool.open_orders", &pool.open_orders),
            ("pool.target_orders", &pool.target_orders),
            ("pool.base_mint", &pool.base_mint),
            ("pool.quote_mint", &pool.quote_mint),
            ("pool.base_vault", &pool.base_vault),
            ("pool.quote_vault", &pool.quote_vault),
            ("pool.market_program_id", &pool.market_program_id),
            ("pool.market_id", &pool.market_id),
            ("pool.market_bids", &pool.market_bids),
            ("pool.market_asks", &pool.market_asks),
            ("pool.market_event_queue", &pool.market_event_queue),
            ("pool.market_base_vault", &pool.market_base_vault),
            ("pool.market_quote_vault", &pool.market_quote_vault),
            ("pool.market_authority", &pool.market_authority),
        ] {
            if *address == Pubkey::default() {
                result.push(field, "is the default address");
            }
        }

        if pool.program_id != programs.amm_program {
            result.push(
                "pool.program_id",
                format!("{} is not the AMM program {}", pool.program_id, programs.amm_program),
            );
        }
        if pool.market_program_id != programs.market_program {
            result.push(
                "pool.market_program_id",
                format!(
                    "{} is not the market program {}",
                    pool.market_program_id, programs.market_program
                ),
            );
        }

        result
    }
}
