//! Interfaces of the systems around the core
//!
//! The core never calls these. They fix the shapes a caller wires together:
//! fetch reserves, assemble, sign, submit.

use solana_sdk::{
    instruction::Instruction,
    pubkey::Pubkey,
    signature::{Keypair, Signature},
    signer::SignerError,
    transaction::Transaction,
};
use thiserror::Error;

use crate::diagnostics::SimulationRejected;
use crate::quote::PoolReserves;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("pool {0} not found")]
    NotFound(Pubkey),
    #[error("rpc error: {0}")]
    Rpc(String),
}

/// Supplies a live reserve snapshot; retries are its own business
pub trait ReserveFetcher {
    fn fetch(&self, pool_id: &Pubkey) -> Result<PoolReserves, FetchError>;
}

/// Holds the payer key; the core only sees the address
pub trait WalletProvider {
    fn pubkey(&self) -> Pubkey;
    fn sign_message(&self, message: &[u8]) -> Result<Signature, SignerError>;
}

#[derive(Debug, Error)]
pub enum SubmitError {
    #[error(transparent)]
    SimulationRejected(#[from] SimulationRejected),
    #[error("transport error: {0}")]
    Transport(String),
}

/// Sends a batch to the ledger in the given instruction order
pub trait TransactionSubmitter {
    fn submit(
        &self,
        instructions: &[Instruction],
        ephemeral_signers: &[&Keypair],
        wallet: &dyn WalletProvider,
    ) -> Result<Signature, SubmitError>;
}

/// Put the wallet's signature into the payer slot of `transaction`
pub fn sign_as_payer(
    transaction: &mut Transaction,
    wallet: &dyn WalletProvider,
) -> Result<(), SignerError> {
    let payer = wallet.pubkey();
    let signers = usize::from(transaction.message.header.num_required_signatures);
    let slot = transaction
        .message
        .account_keys
        .get(..signers)
        .ok_or_else(|| {
            SignerError::InvalidInput(format!(
                "message requires {} signers but lists {} accounts",
                signers,
                transaction.message.account_keys.len()
            ))
        })?
        .iter()
        .position(|k| *k == payer)
        .ok_or(SignerError::KeypairPubkeyMismatch)?;

    let signature = wallet.sign_message(&transaction.message_data())?;
    let entry = transaction
        .signatures
        .get_mut(slot)
        .ok_or(SignerError::NotEnoughSigners)?;
    *entry = signature;
    Ok(())
}
