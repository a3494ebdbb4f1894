//! Swap batch assembly
//!
//! Validation -> quote -> derivation -> wrap -> create destination -> swap -> close.
//! Nothing is derived and no key material is generated for a request that
//! fails validation, including a quote whose minimum output rounds to zero. A close instruction is appended for every ephemeral
//! account, so wrapped funds never outlive the batch.

use solana_sdk::{
    hash::Hash,
    instruction::Instruction,
    message::Message,
    pubkey::Pubkey,
    signature::Keypair,
    signer::Signer,
    transaction::Transaction,
};

use crate::address::{associated_token_address, pool_authority, AddressDeriver, PdaDeriver};
use crate::config::EngineConfig;
use crate::error::{ArithmeticError, Result, ValidationError};
use crate::quote::{quote, SwapQuote};
use crate::tx_builder::{
    build_close_account, build_create_associated_account, build_swap_instruction,
    build_wrapped_native_account, SwapAccounts,
};
use crate::types::{PoolKeys, SwapRequest};
use crate::validate::ParameterValidator;

/// Which side of the swap a temporary wrapped-native account serves
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WrapSide {
    /// Holds the native input for the swap
    Source,
    /// Receives the output, unwrapped to the payer on close
    Destination,
}

/// Single-use wrapped-native token account
///
/// The caller owns the key until the batch is submitted and must drop it
/// afterwards.
#[derive(Debug)]
pub struct EphemeralAccount {
    pub keypair: Keypair,
    pub side: WrapSide,
}

impl EphemeralAccount {
    fn generate(side: WrapSide) -> Self {
        Self {
            keypair: Keypair::new(),
            side,
        }
    }

    pub fn pubkey(&self) -> Pubkey {
        self.keypair.pubkey()
    }
}

/// Ordered instructions for one atomic swap
#[derive(Debug)]
pub struct SwapPlan {
    pub quote: SwapQuote,
    /// Must be submitted in this exact order
    pub instructions: Vec<Instruction>,
    /// Extra signers besides the payer
    pub ephemeral_signers: Vec<EphemeralAccount>,
}

impl SwapPlan {
    /// Transaction signed by every ephemeral account; the payer signature
    /// slot is left for the wallet
    pub fn to_transaction(&self, payer: &Pubkey, recent_blockhash: Hash) -> Result<Transaction> {
        let message = Message::new(&self.instructions, Some(payer));
        let mut transaction = Transaction::new_unsigned(message);

        let signers: Vec<&Keypair> = self.ephemeral_signers.iter().map(|e| &e.keypair).collect();
        transaction.try_partial_sign(signers.as_slice(), recent_blockhash)?;

        Ok(transaction)
    }
}

/// Turns a validated request into a [`SwapPlan`]
#[derive(Debug)]
pub struct InstructionAssembler<D = PdaDeriver> {
    config: EngineConfig,
    validator: ParameterValidator,
    deriver: D,
}

impl InstructionAssembler<PdaDeriver> {
    pub fn new(config: EngineConfig) -> Self {
        Self::with_deriver(config, PdaDeriver)
    }
}

impl<D: AddressDeriver> InstructionAssembler<D> {
    pub fn with_deriver(config: EngineConfig, deriver: D) -> Self {
        Self {
            validator: ParameterValidator::new(config.validator),
            config,
            deriver,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn deriver(&self) -> &D {
        &self.deriver
    }

    pub fn assemble(&self, pool: &PoolKeys, request: &SwapRequest) -> Result<SwapPlan> {
        let programs = &self.config.programs;

        // 1. Validate
        let mut checks = self.validator.validate(request);
        checks.merge(self.validator.validate_pool(pool, programs));
        checks.into_result()?;
        if !pool.trades_pair(&request.input_mint, &request.output_mint) {
            return Err(ValidationError::single(
                "output_mint",
                format!("pool {} does not trade this pair", pool.id),
            )
            .into());
        }

        // 2. Quote
        let quote = quote(&request.reserves, request.amount_in, request.slippage_bps)?;
        if quote.amount_out_min == 0 {
            return Err(ValidationError::single(
                "amount_out_min",
                format!("quote for {} leaves no minimum output", request.amount_in),
            )
            .into());
        }

        let payer = request.payer;
        let wrap_source = request.input_mint == programs.native_mint;
        let wrap_destination = request.output_mint == programs.native_mint;

        // 3. Derive
        let authority = pool_authority(&self.deriver, &pool.program_id)?.address;
        let source_ata = if wrap_source {
            None
        } else {
            Some(self.payer_token_account(&payer, &request.input_mint)?)
        };
        let destination_ata = if wrap_destination {
            None
        } else {
            Some(self.payer_token_account(&payer, &request.output_mint)?)
        };

        let rent = self.config.token_account_rent_lamports;
        let mut instructions = Vec::with_capacity(8);
        let mut ephemeral_signers = Vec::new();

        // 4. Wrap native input / output
        let source = match source_ata {
            Some(ata) => ata,
            None => {
                let lamports = request
                    .amount_in
                    .checked_add(rent)
                    .ok_or(ArithmeticError::Overflow)?;
                let account = EphemeralAccount::generate(WrapSide::Source);
                instructions.extend(build_wrapped_native_account(
                    &payer,
                    &account.pubkey(),
                    &payer,
                    lamports,
                    &programs.token_program,
                    &programs.native_mint,
                )?);
                let key = account.pubkey();
                ephemeral_signers.push(account);
                key
            }
        };

        let destination = match destination_ata {
            // 5. Create the destination if the caller says it is missing
            Some(ata) => {
                if !request.destination_exists {
                    instructions.push(build_create_associated_account(
                        &payer,
                        &payer,
                        &request.output_mint,
                        &programs.token_program,
                    ));
                }
                ata
            }
            None => {
                let account = EphemeralAccount::generate(WrapSide::Destination);
                instructions.extend(build_wrapped_native_account(
                    &payer,
                    &account.pubkey(),
                    &payer,
                    rent,
                    &programs.token_program,
                    &programs.native_mint,
                )?);
                let key = account.pubkey();
                ephemeral_signers.push(account);
                key
            }
        };

        // 6. Swap
        let accounts = SwapAccounts {
            token_program: programs.token_program,
            pool_authority: authority,
            source,
            destination,
            owner: payer,
        };
        instructions.push(build_swap_instruction(
            pool,
            &accounts,
            quote.amount_in,
            quote.amount_out_min,
        ));

        // 7. Close every temporary account, rent back to the payer
        for account in &ephemeral_signers {
            instructions.push(build_close_account(
                &programs.token_program,
                &account.pubkey(),
                &payer,
                &payer,
            )?);
        }

        log::debug!(
            "assembled swap on pool {}: {} instructions, {} ephemeral signers, min out {}",
            pool.id,
            instructions.len(),
            ephemeral_signers.len(),
            quote.amount_out_min
        );

        Ok(SwapPlan {
            quote,
            instructions,
            ephemeral_signers,
        })
    }

    fn payer_token_account(&self, payer: &Pubkey, mint: &Pubkey) -> Result<Pubkey> {
        let programs = &self.config.programs;
        Ok(associated_token_address(
            &self.deriver,
            payer,
            mint,
            &programs.token_program,
            &programs.associated_token_program,
        )?
        .address)
    }
}
