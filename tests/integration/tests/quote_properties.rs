//! Quote and derivation properties over random inputs

use ammswap_engine::{address::AddressDeriver, quote, PdaDeriver, PoolReserves};
use ammswap_wire::SwapBaseIn;
use proptest::prelude::*;
use solana_sdk::pubkey::Pubkey;

fn reserves() -> impl Strategy<Value = PoolReserves> {
    (1u64..=u64::MAX, 1u64..=u64::MAX, 0u16..10_000)
        .prop_map(|(reserve_in, reserve_out, fee)| PoolReserves::new(reserve_in, reserve_out, fee))
}

proptest! {
    #[test]
    fn prop_output_below_reserve(pool in reserves(), amount_in in 1u64..=u64::MAX, slippage in 0u16..=10_000) {
        // Any u64 pool and input fits the u128 intermediates
        let q = quote(&pool, amount_in, slippage);
        prop_assert!(q.is_ok(), "quote failed: {:?}", q);
        let q = q.unwrap();
        prop_assert!(q.amount_out_expected < pool.reserve_out);
        prop_assert!(q.price_impact_bps <= 10_000);
    }

    #[test]
    fn prop_minimum_is_floored_discount(pool in reserves(), amount_in in 1u64..=u64::MAX, slippage in 0u16..=10_000) {
        if let Ok(q) = quote(&pool, amount_in, slippage) {
            let expected = (q.amount_out_expected as u128 * (10_000 - slippage as u128) / 10_000) as u64;
            prop_assert_eq!(q.amount_out_min, expected);
            prop_assert!(q.amount_out_min <= q.amount_out_expected);
        }
    }

    #[test]
    fn prop_output_monotonic_in_input(
        reserve_in in 1u64..=1u64 << 48,
        reserve_out in 1u64..=1u64 << 48,
        fee in 0u16..10_000,
        a in 1u64..=1u64 << 40,
        b in 1u64..=1u64 << 40,
    ) {
        let pool = PoolReserves::new(reserve_in, reserve_out, fee);
        let (small, large) = if a <= b { (a, b) } else { (b, a) };
        let q_small = quote(&pool, small, 0).unwrap();
        let q_large = quote(&pool, large, 0).unwrap();
        prop_assert!(q_small.amount_out_expected <= q_large.amount_out_expected);
    }

    #[test]
    fn prop_zero_fee_keeps_input(pool in reserves(), amount_in in 1u64..=u64::MAX) {
        let pool = PoolReserves { fee_rate_bps: 0, ..pool };
        if let Ok(q) = quote(&pool, amount_in, 0) {
            prop_assert_eq!(q.amount_in_after_fee, amount_in);
        }
    }

    #[test]
    fn prop_swap_payload_round_trip(amount_in in any::<u64>(), min_out in any::<u64>()) {
        let bytes = SwapBaseIn::new(amount_in, min_out).pack();
        let decoded = SwapBaseIn::unpack(&bytes).unwrap();
        prop_assert_eq!(decoded.amount_in, amount_in);
        prop_assert_eq!(decoded.minimum_amount_out, min_out);
    }

    #[test]
    fn prop_derivation_deterministic_and_matches_runtime(seed in proptest::collection::vec(any::<u8>(), 0..=32), program in any::<[u8; 32]>()) {
        let program = Pubkey::new_from_array(program);
        let first = PdaDeriver.derive(&[seed.as_slice()], &program).unwrap();
        let second = PdaDeriver.derive(&[seed.as_slice()], &program).unwrap();
        prop_assert_eq!(first, second);

        let (address, bump) = Pubkey::find_program_address(&[seed.as_slice()], &program);
        prop_assert_eq!(first.address, address);
        prop_assert_eq!(first.bump, bump);
    }
}
