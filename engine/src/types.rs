//! Inputs of the assembler

use solana_sdk::pubkey::Pubkey;

use crate::quote::PoolReserves;

/// Every account the swap instruction needs from the pool and its market
///
/// All fields are mandatory; the program rejects a swap missing any of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolKeys {
    /// AMM program owning the pool
    pub program_id: Pubkey,
    /// Pool state account
    pub id: Pubkey,
    pub open_orders: Pubkey,
    pub target_orders: Pubkey,
    pub base_mint: Pubkey,
    pub quote_mint: Pubkey,
    pub base_vault: Pubkey,
    pub quote_vault: Pubkey,

    /// Order-book program hosting the market
    pub market_program_id: Pubkey,
    pub market_id: Pubkey,
    pub market_bids: Pubkey,
    pub market_asks: Pubkey,
    pub market_event_queue: Pubkey,
    pub market_base_vault: Pubkey,
    pub market_quote_vault: Pubkey,
    /// Vault signer of the market
    pub market_authority: Pubkey,
}

impl PoolKeys {
    /// True if the pool trades exactly this pair, in either direction
    pub fn trades_pair(&self, a: &Pubkey, b: &Pubkey) -> bool {
        (self.base_mint == *a && self.quote_mint == *b)
            || (self.base_mint == *b && self.quote_mint == *a)
    }
}

/// Fixed-input swap the caller wants assembled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SwapRequest {
    /// Wallet paying fees and owning the token accounts
    pub payer: Pubkey,
    pub input_mint: Pubkey,
    pub output_mint: Pubkey,
    pub amount_in: u64,
    pub slippage_bps: u16,
    /// Reserves oriented input -> output, fetched by the caller
    pub reserves: PoolReserves,
    /// Whether the payer's token account for `output_mint` already exists
    pub destination_exists: bool,
}
