//! Program-derived address search
//!
//! Same algorithm as the runtime: hash `seeds ++ [bump] ++ program_id ++
//! "ProgramDerivedAddress"` for bump = 255..=0 and keep the first digest that
//! is not an ed25519 point. No key can sign for such an address, only the
//! owning program.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use solana_sdk::hash::hashv;
use solana_sdk::pubkey::Pubkey;

use crate::error::DerivationError;

pub use solana_sdk::pubkey::{MAX_SEEDS, MAX_SEED_LEN};

/// Domain separator appended after the program id
pub const PDA_MARKER: &[u8; 21] = b"ProgramDerivedAddress";

/// Seed of the AMM pool authority
pub const AMM_AUTHORITY_SEED: &[u8] = b"amm authority";

/// Address plus the bump that pushed it off the curve
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DerivedAddress {
    pub address: Pubkey,
    pub bump: u8,
}

/// Derives program addresses
///
/// Implementations must be pure: equal inputs give equal outputs.
pub trait AddressDeriver {
    fn derive(&self, seeds: &[&[u8]], program_id: &Pubkey) -> Result<DerivedAddress, DerivationError>;
}

impl<D: AddressDeriver + ?Sized> AddressDeriver for &D {
    fn derive(&self, seeds: &[&[u8]], program_id: &Pubkey) -> Result<DerivedAddress, DerivationError> {
        (**self).derive(seeds, program_id)
    }
}

/// Straight bump search with no caching
#[derive(Debug, Clone, Copy, Default)]
pub struct PdaDeriver;

impl AddressDeriver for PdaDeriver {
    fn derive(&self, seeds: &[&[u8]], program_id: &Pubkey) -> Result<DerivedAddress, DerivationError> {
        check_seeds(seeds)?;

        for bump in (0..=u8::MAX).rev() {
            let candidate = candidate_address(seeds, bump, program_id);
            if !candidate.is_on_curve() {
                log::trace!("derived {} with bump {} under {}", candidate, bump, program_id);
                return Ok(DerivedAddress {
                    address: candidate,
                    bump,
                });
            }
        }

        Err(DerivationError::NoViableBump)
    }
}

/// Hash one candidate without the curve check
pub fn candidate_address(seeds: &[&[u8]], bump: u8, program_id: &Pubkey) -> Pubkey {
    let bump = [bump];
    let mut parts: Vec<&[u8]> = Vec::with_capacity(seeds.len() + 3);
    parts.extend_from_slice(seeds);
    parts.push(&bump);
    parts.push(program_id.as_ref());
    parts.push(PDA_MARKER);
    Pubkey::new_from_array(hashv(&parts).to_bytes())
}

fn check_seeds(seeds: &[&[u8]]) -> Result<(), DerivationError> {
    // One slot is reserved for the bump
    if seeds.len() >= MAX_SEEDS {
        return Err(DerivationError::TooManySeeds(seeds.len()));
    }
    for (index, seed) in seeds.iter().enumerate() {
        if seed.len() > MAX_SEED_LEN {
            return Err(DerivationError::SeedTooLong {
                index,
                len: seed.len(),
            });
        }
    }
    Ok(())
}

type CacheKey = (Vec<Vec<u8>>, Pubkey);

/// Entries kept by [`MemoizedDeriver::new`]
pub const DEFAULT_MEMO_CAPACITY: usize = 4_096;

/// Caches results of an inner deriver
///
/// Meant for a bounded key set such as pool authorities and payer token
/// accounts. Once `capacity` entries are held the cache is cleared before the
/// next insert. Safe to share between threads. Errors are not cached.
#[derive(Debug)]
pub struct MemoizedDeriver<D> {
    inner: D,
    capacity: usize,
    cache: RwLock<HashMap<CacheKey, DerivedAddress>>,
}

impl<D: AddressDeriver + Default> Default for MemoizedDeriver<D> {
    fn default() -> Self {
        Self::new(D::default())
    }
}

impl<D: AddressDeriver> MemoizedDeriver<D> {
    pub fn new(inner: D) -> Self {
        Self::with_capacity(inner, DEFAULT_MEMO_CAPACITY)
    }

    pub fn with_capacity(inner: D, capacity: usize) -> Self {
        Self {
            inner,
            capacity: capacity.max(1),
            cache: RwLock::new(HashMap::new()),
        }
    }

    /// Number of cached derivations
    pub fn len(&self) -> usize {
        self.cache.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<D: AddressDeriver> AddressDeriver for MemoizedDeriver<D> {
    fn derive(&self, seeds: &[&[u8]], program_id: &Pubkey) -> Result<DerivedAddress, DerivationError> {
        let key: CacheKey = (seeds.iter().map(|s| s.to_vec()).collect(), *program_id);

        if let Some(hit) = self
            .cache
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&key)
        {
            return Ok(*hit);
        }

        let derived = self.inner.derive(seeds, program_id)?;
        let mut cache = self.cache.write().unwrap_or_else(PoisonError::into_inner);
        if cache.len() >= self.capacity && !cache.contains_key(&key) {
            log::debug!("derivation cache full at {} entries, clearing", cache.len());
            cache.clear();
        }
        cache.insert(key, derived);
        Ok(derived)
    }
}

/// Authority PDA that signs for the pool's vaults
pub fn pool_authority<D: AddressDeriver>(
    deriver: &D,
    amm_program: &Pubkey,
) -> Result<DerivedAddress, DerivationError> {
    deriver.derive(&[AMM_AUTHORITY_SEED], amm_program)
}

/// Associated token account of `wallet` for `mint`
pub fn associated_token_address<D: AddressDeriver>(
    deriver: &D,
    wallet: &Pubkey,
    mint: &Pubkey,
    token_program: &Pubkey,
    associated_token_program: &Pubkey,
) -> Result<DerivedAddress, DerivationError> {
    deriver.derive(
        &[wallet.as_ref(), token_program.as_ref(), mint.as_ref()],
        associated_token_program,
    )
}
