//! Instruction builders for the swap batch

use ammswap_wire::SwapBaseIn;
use solana_sdk::{
    instruction::{AccountMeta, Instruction},
    program_error::ProgramError,
    pubkey::Pubkey,
    system_instruction,
};
use spl_token::solana_program::program_pack::Pack;

/// Token and user accounts a swap moves funds between
#[derive(Debug, Clone, Copy)]
pub struct SwapAccounts {
    pub token_program: Pubkey,
    pub pool_authority: Pubkey,
    pub source: Pubkey,
    pub destination: Pubkey,
    pub owner: Pubkey,
}

/// Build the fixed-input swap instruction
///
/// Account order is defined by the AMM program and is positional.
pub fn build_swap_instruction(
    pool: &crate::types::PoolKeys,
    accounts: &SwapAccounts,
    amount_in: u64,
    minimum_amount_out: u64,
) -> Instruction {
    let data = SwapBaseIn::new(amount_in, minimum_amount_out).pack().to_vec();

    let accounts = vec![
        AccountMeta::new_readonly(accounts.token_program, false),
        AccountMeta::new(pool.id, false),
        AccountMeta::new_readonly(accounts.pool_authority, false),
        AccountMeta::new(pool.open_orders, false),
        AccountMeta::new(pool.target_orders, false),
        AccountMeta::new(pool.base_vault, false),
        AccountMeta::new(pool.quote_vault, false),
        AccountMeta::new_readonly(pool.market_program_id, false),
        AccountMeta::new(pool.market_id, false),
        AccountMeta::new(pool.market_bids, false),
        AccountMeta::new(pool.market_asks, false),
        AccountMeta::new(pool.market_event_queue, false),
        AccountMeta::new(pool.market_base_vault, false),
        AccountMeta::new(pool.market_quote_vault, false),
        AccountMeta::new_readonly(pool.market_authority, false),
        AccountMeta::new(accounts.source, false),
        AccountMeta::new(accounts.destination, false),
        AccountMeta::new_readonly(accounts.owner, true),
    ];

    Instruction {
        program_id: pool.program_id,
        accounts,
        data,
    }
}

/// Create and initialise a wrapped-native token account owned by `owner`
///
/// `lamports` must already include the rent-exempt minimum.
pub fn build_wrapped_native_account(
    payer: &Pubkey,
    account: &Pubkey,
    owner: &Pubkey,
    lamports: u64,
    token_program: &Pubkey,
    native_mint: &Pubkey,
) -> Result<[Instruction; 2], ProgramError> {
    let create = system_instruction::create_account(
        payer,
        account,
        lamports,
        spl_token::state::Account::LEN as u64,
        token_program,
    );
    let init = spl_token::instruction::initialize_account(token_program, account, native_mint, owner)?;
    Ok([create, init])
}

/// Close a token account, sending its lamports to `destination`
pub fn build_close_account(
    token_program: &Pubkey,
    account: &Pubkey,
    destination: &Pubkey,
    owner: &Pubkey,
) -> Result<Instruction, ProgramError> {
    spl_token::instruction::close_account(token_program, account, destination, owner, &[])
}

/// Create the associated token account of `wallet` for `mint`, paid by `payer`
pub fn build_create_associated_account(
    payer: &Pubkey,
    wallet: &Pubkey,
    mint: &Pubkey,
    token_program: &Pubkey,
) -> Instruction {
    spl_associated_token_account::instruction::create_associated_token_account(
        payer,
        wallet,
        mint,
        token_program,
    )
}
