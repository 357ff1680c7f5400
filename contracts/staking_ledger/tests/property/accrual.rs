//! Property-based tests for reward accrual.
//!
//! Invariants tested:
//! - A sole staker earns `emission × elapsed`, minus at most one unit of rounding
//! - Accrual is proportional to balance between concurrent stakers
//! - Doubling elapsed time doubles accrual when the balance is a power of ten

use proptest::prelude::*;

use crate::common::Fixture;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn prop_sole_staker_earns_full_emission(
        emission in 1i128..=1_000,
        balance in 1i128..=1_000_000,
        elapsed in 1u64..=1_000_000,
    ) {
        let fx = Fixture::new(emission, 1, balance);
        let u = &fx.users[0];
        fx.client.stake(u, u, &balance);

        fx.advance(elapsed);
        let earned = fx.client.get_total_rewards_balance(u);
        let expected = emission * elapsed as i128;

        prop_assert!(earned <= expected);
        prop_assert!(earned >= expected - 1);
    }

    #[test]
    fn prop_accrual_proportional_to_balance(
        emission in 1i128..=1_000,
        small in 1i128..=500_000,
        elapsed in 1u64..=100_000,
    ) {
        let fx = Fixture::new(emission, 2, 2 * small);
        let (a, b) = (&fx.users[0], &fx.users[1]);
        fx.client.stake(a, a, &small);
        fx.client.stake(b, b, &(2 * small));

        fx.advance(elapsed);
        let r_small = fx.client.get_total_rewards_balance(a);
        let r_large = fx.client.get_total_rewards_balance(b);

        prop_assert!(r_large >= 2 * r_small);
        prop_assert!(r_large <= 2 * r_small + 1);
    }

    #[test]
    fn prop_accrual_linear_in_time(
        emission in 1i128..=1_000,
        exponent in 0u32..=6,
        elapsed in 1u64..=100_000,
    ) {
        let balance = 10i128.pow(exponent);
        let fx = Fixture::new(emission, 1, balance);
        let u = &fx.users[0];
        fx.client.stake(u, u, &balance);

        fx.advance(elapsed);
        let once = fx.client.get_total_rewards_balance(u);
        fx.advance(elapsed);
        let twice = fx.client.get_total_rewards_balance(u);

        prop_assert_eq!(once, emission * elapsed as i128);
        prop_assert_eq!(twice, 2 * once);
    }
}
