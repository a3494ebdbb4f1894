//! Byte layouts shared by the swap engine and its tests.
//!
//! Only the swap path of the AMM program is modelled here. Pool
//! initialisation payloads are intentionally absent.

#![no_std]

pub mod error;
pub mod instruction;
pub mod swap;

pub use error::*;
pub use instruction::*;
pub use swap::*;
