//! Ledger-wide invariants under random operation sequences.
//!
//! Invariants tested:
//! - `total_staked` always equals the sum of every account's balance
//! - the ledger's token holdings always equal `total_staked`
//! - `user_count` always equals the number of accounts with a non-zero balance
//! - the reward index never decreases
//! - a successful redeem reduces the balance by exactly the amount asked

use proptest::prelude::*;
use proptest_derive::Arbitrary;
use soroban_sdk::{token::Client as TokenClient, I256};

use crate::common::Fixture;

const USERS: usize = 3;

#[derive(Arbitrary, Clone, Debug)]
enum Op {
    Stake {
        #[proptest(strategy = "0usize..3")]
        user: usize,
        #[proptest(strategy = "1i128..=10_000")]
        amount: i128,
    },
    StakeFor {
        #[proptest(strategy = "0usize..3")]
        from: usize,
        #[proptest(strategy = "0usize..3")]
        to: usize,
        #[proptest(strategy = "1i128..=10_000")]
        amount: i128,
    },
    Cooldown {
        #[proptest(strategy = "0usize..3")]
        user: usize,
    },
    Redeem {
        #[proptest(strategy = "0usize..3")]
        user: usize,
        #[proptest(strategy = "1i128..=10_000")]
        amount: i128,
    },
    Claim {
        #[proptest(strategy = "0usize..3")]
        user: usize,
        #[proptest(strategy = "1i128..=5_000")]
        amount: i128,
    },
    Advance {
        #[proptest(strategy = "0u64..=150")]
        seconds: u64,
    },
}

fn check_invariants(fx: &Fixture, last_index: &mut I256) -> Result<(), TestCaseError> {
    let balances: std::vec::Vec<i128> = fx.users.iter().map(|u| fx.client.get_staked(u)).collect();
    let total = fx.client.get_total_staked();

    prop_assert_eq!(total, balances.iter().sum::<i128>());
    prop_assert_eq!(
        TokenClient::new(&fx.env, &fx.staked_token).balance(&fx.client.address),
        total
    );
    prop_assert_eq!(
        fx.client.user_count(),
        balances.iter().filter(|b| **b > 0).count() as u64
    );

    let index = fx.client.get_reward_index().cumulative_reward_per_unit;
    prop_assert!(index >= *last_index);
    *last_index = index;
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn prop_ledger_invariants_hold(ops in proptest::collection::vec(any::<Op>(), 1..40)) {
        let fx = Fixture::new(5, USERS, 1_000_000);
        let mut last_index = I256::from_i32(&fx.env, 0);

        for op in ops {
            match op {
                Op::Stake { user, amount } => {
                    let u = &fx.users[user];
                    let _ = fx.client.try_stake(u, u, &amount);
                }
                Op::StakeFor { from, to, amount } => {
                    let _ = fx.client.try_stake(&fx.users[from], &fx.users[to], &amount);
                }
                Op::Cooldown { user } => {
                    let _ = fx.client.try_cooldown(&fx.users[user]);
                }
                Op::Redeem { user, amount } => {
                    let u = &fx.users[user];
                    let before = fx.client.get_staked(u);
                    if fx.client.try_redeem(u, u, &amount).is_ok() {
                        prop_assert_eq!(fx.client.get_staked(u), before - amount);
                    } else {
                        prop_assert_eq!(fx.client.get_staked(u), before);
                    }
                }
                Op::Claim { user, amount } => {
                    let u = &fx.users[user];
                    let before = fx.client.get_total_rewards_balance(u);
                    let result = fx.client.try_claim_rewards(u, u, &amount);
                    prop_assert_eq!(result.is_ok(), amount <= before);
                }
                Op::Advance { seconds } => fx.advance(seconds),
            }
            check_invariants(&fx, &mut last_index)?;
        }
    }

    /// Redeeming before the window opens always fails, whatever the amount.
    #[test]
    fn prop_early_redeem_always_fails(
        stake in 1i128..=100_000,
        amount in 1i128..=100_000,
        wait in 0u64..crate::common::COOLDOWN,
    ) {
        let fx = Fixture::new(1, 1, 100_000);
        let u = &fx.users[0];
        fx.client.stake(u, u, &stake);
        fx.client.cooldown(u);
        fx.advance(wait);

        match fx.client.try_redeem(u, u, &amount) {
            Err(Ok(e)) => prop_assert_eq!(e, staking_ledger::ContractError::CooldownNotMatured),
            _ => prop_assert!(false, "redeem before maturity must fail"),
        }
        prop_assert_eq!(fx.client.get_staked(u), stake);
    }
}
