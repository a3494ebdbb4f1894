//! ammswap engine - quoting and instruction assembly for constant-product swaps
//!
//! Pure and synchronous: given pool keys, a reserve snapshot and a request,
//! produce a quote and an ordered, unsigned instruction batch. Fetching
//! reserves, signing and submitting belong to the caller (see
//! [`collaborators`]).
//!
//! Components, leaf first:
//! - [`address`]: program-derived address search
//! - [`quote`]: constant-product quote with fee and slippage
//! - [`validate`]: request checks, all violations collected
//! - [`assemble`]: the swap batch, including wrapped-native lifecycles

pub mod address;
pub mod assemble;
pub mod collaborators;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod math;
pub mod quote;
pub mod tx_builder;
pub mod types;
pub mod validate;

pub use address::{AddressDeriver, DerivedAddress, MemoizedDeriver, PdaDeriver};
pub use assemble::{EphemeralAccount, InstructionAssembler, SwapPlan, WrapSide};
pub use config::{EngineConfig, ProgramIds, ValidatorConfig};
pub use diagnostics::{RejectionKind, SimulationRejected};
pub use error::{ArithmeticError, DerivationError, SwapError, ValidationError};
pub use quote::{quote, PoolReserves, SwapQuote};
pub use types::{PoolKeys, SwapRequest};
pub use validate::{ParameterValidator, ValidationResult, Violation};
