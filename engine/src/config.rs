//! Engine configuration
//!
//! Program ids and validator thresholds. Loaded from TOML; program ids are
//! written as base58 strings. Missing keys take the mainnet defaults.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use solana_sdk::pubkey::Pubkey;
use solana_sdk::rent::Rent;
use spl_token::solana_program::program_pack::Pack;
use spl_token::state::Account as TokenAccount;

/// Environment variable naming the config file
pub const CONFIG_ENV: &str = "AMMSWAP_CONFIG";

/// File read when `AMMSWAP_CONFIG` is unset
pub const DEFAULT_CONFIG_PATH: &str = "ammswap.toml";

/// Raydium AMM v4 on mainnet
pub const MAINNET_AMM_PROGRAM: Pubkey = solana_sdk::pubkey!("675kPX9MHTjS2zt1qfr1NYHuzeLXfQM9H24wFSUt1Mp8");

/// Serum/OpenBook v3 order-book program on mainnet
pub const MAINNET_MARKET_PROGRAM: Pubkey = solana_sdk::pubkey!("srmqPvymJeFKQ4zGQed1GFppgkRHL9kaELCbyksJtPX");

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Lamports that keep a token account rent exempt
    pub token_account_rent_lamports: u64,

    pub programs: ProgramIds,
    pub validator: ValidatorConfig,
}

/// Programs and mints the assembler targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProgramIds {
    /// Pools owned by any other program are rejected
    #[serde(with = "base58")]
    pub amm_program: Pubkey,
    /// Order-book program the pools' markets must live on
    #[serde(with = "base58")]
    pub market_program: Pubkey,
    #[serde(with = "base58")]
    pub token_program: Pubkey,
    #[serde(with = "base58")]
    pub associated_token_program: Pubkey,
    /// Wrapper mint of the native asset
    #[serde(with = "base58")]
    pub native_mint: Pubkey,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidatorConfig {
    /// Inputs at or below this amount are rejected
    pub dust_threshold: u64,
    /// Largest accepted slippage tolerance (5000 = 50%)
    pub max_slippage_bps: u16,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            dust_threshold: 0,
            max_slippage_bps: 5_000,
        }
    }
}

impl Default for ProgramIds {
    fn default() -> Self {
        Self {
            amm_program: MAINNET_AMM_PROGRAM,
            market_program: MAINNET_MARKET_PROGRAM,
            token_program: spl_token::id(),
            associated_token_program: spl_associated_token_account::id(),
            native_mint: spl_token::native_mint::id(),
        }
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            token_account_rent_lamports: Rent::default().minimum_balance(TokenAccount::LEN),
            programs: ProgramIds::default(),
            validator: ValidatorConfig::default(),
        }
    }
}

impl EngineConfig {
    /// Load from the file named by `AMMSWAP_CONFIG`, or `ammswap.toml`
    ///
    /// Falls back to the mainnet defaults when that file does not exist.
    /// A file that exists but cannot be read or parsed is an error.
    pub fn load() -> Result<Self> {
        let path = std::env::var(CONFIG_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
        if !Path::new(&path).exists() {
            log::info!("No config at {}, using mainnet defaults", path);
            return Ok(Self::default());
        }
        Self::load_from(&path)
    }

    pub fn load_from(path: &str) -> Result<Self> {
        let config_str = std::fs::read_to_string(path)
            .context(format!("Failed to read config file: {}", path))?;

        let config = Self::from_toml_str(&config_str)?;
        log::debug!("Loaded engine config from {}", path);
        Ok(config)
    }

    pub fn from_toml_str(s: &str) -> Result<Self> {
        toml::from_str(s).context("Failed to parse config TOML")
    }

    /// Write the default config to `path`
    pub fn write_default(path: &str) -> Result<()> {
        let toml_str = toml::to_string_pretty(&Self::default())
            .context("Failed to serialize config")?;

        std::fs::write(path, toml_str)
            .context(format!("Failed to write config to {}", path))?;

        log::info!("Created default config at {}", path);
        Ok(())
    }
}

mod base58 {
    use serde::{de, Deserialize, Deserializer, Serializer};
    use solana_sdk::pubkey::Pubkey;
    use std::str::FromStr;

    pub fn serialize<S: Serializer>(key: &Pubkey, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&key.to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Pubkey, D::Error> {
        let s = String::deserialize(d)?;
        Pubkey::from_str(&s).map_err(|e| de::Error::custom(format!("invalid pubkey {s}: {e}")))
    }
}
