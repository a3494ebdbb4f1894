//! Shared fixtures for the ammswap integration tests
//!
//! Everything here is deterministic test scaffolding: pool key sets, request
//! builders and in-memory stand-ins for the external collaborators.

use std::cell::RefCell;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use ammswap_engine::{
    address::{AddressDeriver, DerivedAddress, PdaDeriver},
    collaborators::{
        sign_as_payer, FetchError, ReserveFetcher, SubmitError, TransactionSubmitter,
        WalletProvider,
    },
    DerivationError, PoolKeys, PoolReserves, ProgramIds, SimulationRejected, SwapRequest,
};
use solana_sdk::{
    hash::Hash,
    instruction::Instruction,
    message::Message,
    pubkey::Pubkey,
    signature::{Keypair, Signature},
    signer::{Signer, SignerError},
    transaction::Transaction,
};

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Pool of the default AMM and market programs trading `base_mint`/`quote_mint`,
/// with fresh keys for everything else
pub fn pool_keys(base_mint: Pubkey, quote_mint: Pubkey) -> PoolKeys {
    let programs = ProgramIds::default();
    PoolKeys {
        program_id: programs.amm_program,
        id: Pubkey::new_unique(),
        open_orders: Pubkey::new_unique(),
        target_orders: Pubkey::new_unique(),
        base_mint,
        quote_mint,
        base_vault: Pubkey::new_unique(),
        quote_vault: Pubkey::new_unique(),
        market_program_id: programs.market_program,
        market_id: Pubkey::new_unique(),
        market_bids: Pubkey::new_unique(),
        market_asks: Pubkey::new_unique(),
        market_event_queue: Pubkey::new_unique(),
        market_base_vault: Pubkey::new_unique(),
        market_quote_vault: Pubkey::new_unique(),
        market_authority: Pubkey::new_unique(),
    }
}

/// Reserves of the reference pool: 1e12 in, 1e11 out, 25 bps fee
pub fn reference_reserves() -> PoolReserves {
    PoolReserves::new(1_000_000_000_000, 100_000_000_000, 25)
}

/// Sell 1e8 of the base mint with 1% slippage
pub fn reference_request(pool: &PoolKeys, payer: Pubkey) -> SwapRequest {
    SwapRequest {
        payer,
        input_mint: pool.base_mint,
        output_mint: pool.quote_mint,
        amount_in: 100_000_000,
        slippage_bps: 100,
        reserves: reference_reserves(),
        destination_exists: true,
    }
}

/// Deriver that counts how often it is asked
#[derive(Debug, Default)]
pub struct CountingDeriver {
    calls: AtomicUsize,
}

impl CountingDeriver {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl AddressDeriver for CountingDeriver {
    fn derive(&self, seeds: &[&[u8]], program_id: &Pubkey) -> Result<DerivedAddress, DerivationError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        PdaDeriver.derive(seeds, program_id)
    }
}

/// Reserve snapshots keyed by pool id
#[derive(Debug, Default)]
pub struct StaticReserves(pub HashMap<Pubkey, PoolReserves>);

impl ReserveFetcher for StaticReserves {
    fn fetch(&self, pool_id: &Pubkey) -> Result<PoolReserves, FetchError> {
        self.0.get(pool_id).copied().ok_or(FetchError::NotFound(*pool_id))
    }
}

pub struct LocalWallet(pub Keypair);

impl WalletProvider for LocalWallet {
    fn pubkey(&self) -> Pubkey {
        self.0.pubkey()
    }

    fn sign_message(&self, message: &[u8]) -> Result<Signature, SignerError> {
        self.0.try_sign_message(message)
    }
}

/// Submitter that signs, verifies and records the batch, then either
/// accepts it or replays canned simulation logs
pub struct RecordingSubmitter {
    pub blockhash: Hash,
    pub reject_with: Option<Vec<String>>,
    pub submitted: RefCell<Vec<Transaction>>,
}

impl RecordingSubmitter {
    pub fn accepting() -> Self {
        Self {
            blockhash: Hash::new_unique(),
            reject_with: None,
            submitted: RefCell::new(Vec::new()),
        }
    }

    pub fn rejecting(logs: &[&str]) -> Self {
        Self {
            reject_with: Some(logs.iter().map(|l| l.to_string()).collect()),
            ..Self::accepting()
        }
    }
}

impl TransactionSubmitter for RecordingSubmitter {
    fn submit(
        &self,
        instructions: &[Instruction],
        ephemeral_signers: &[&Keypair],
        wallet: &dyn WalletProvider,
    ) -> Result<Signature, SubmitError> {
        let message = Message::new_with_blockhash(instructions, Some(&wallet.pubkey()), &self.blockhash);
        let mut tx = Transaction::new_unsigned(message);
        tx.try_partial_sign(ephemeral_signers, self.blockhash)
            .map_err(|e| SubmitError::Transport(e.to_string()))?;
        sign_as_payer(&mut tx, wallet).map_err(|e| SubmitError::Transport(e.to_string()))?;
        tx.verify().map_err(|e| SubmitError::Transport(e.to_string()))?;

        if let Some(logs) = &self.reject_with {
            return Err(SimulationRejected::from_logs(logs.clone()).into());
        }

        let signature = tx.signatures[0];
        self.submitted.borrow_mut().push(tx);
        Ok(signature)
    }
}
