#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use soroban_sdk::{
    testutils::{Address as _, Ledger as _},
    token::{Client as TokenClient, StellarAssetClient},
    vec, Address, Env, I256,
};
use staking_ledger::{
    AssetConfigInput, CooldownPolicy, StakingLedgerContract, StakingLedgerContractClient,
};

#[derive(Arbitrary, Debug)]
pub enum FuzzAction {
    Stake { user: u8, amount: u64 },
    StakeFor { from: u8, to: u8, amount: u64 },
    Cooldown { user: u8 },
    Redeem { user: u8, amount: u64 },
    ClaimRewards { user: u8, amount: u64 },
    Advance { seconds: u16 },
    SetEmission { rate: u32 },
    TogglePolicy,
}

fuzz_target!(|actions: Vec<FuzzAction>| {
    let env = Env::default();
    env.mock_all_auths();
    env.ledger().set_timestamp(1);

    let staked_token = env
        .register_stellar_asset_contract_v2(Address::generate(&env))
        .address();
    let reward_token = env
        .register_stellar_asset_contract_v2(Address::generate(&env))
        .address();

    let contract_id = env.register(StakingLedgerContract, ());
    let client = StakingLedgerContractClient::new(&env, &contract_id);

    let admin = Address::generate(&env);
    let vault = Address::generate(&env);
    client.initialize(
        &admin,
        &staked_token,
        &reward_token,
        &60,
        &600,
        &vault,
        &31_536_000,
        &CooldownPolicy::Weighted,
    );

    let funds = i128::from(u64::MAX);
    StellarAssetClient::new(&env, &reward_token).mint(&vault, &funds);
    TokenClient::new(&env, &reward_token).approve(
        &vault,
        &contract_id,
        &funds,
        &(env.ledger().sequence() + 1_000),
    );

    let users: Vec<Address> = (0..5).map(|_| Address::generate(&env)).collect();
    let minter = StellarAssetClient::new(&env, &staked_token);
    for user in users.iter() {
        minter.mint(user, &i128::from(u64::MAX));
    }
    let pick = |i: u8| &users[usize::from(i) % users.len()];

    let mut policy = CooldownPolicy::Weighted;
    let mut last_index = I256::from_i32(&env, 0);

    for action in actions {
        match action {
            FuzzAction::Stake { user, amount } => {
                let u = pick(user);
                let _ = client.try_stake(u, u, &i128::from(amount));
            }
            FuzzAction::StakeFor { from, to, amount } => {
                let _ = client.try_stake(pick(from), pick(to), &i128::from(amount));
            }
            FuzzAction::Cooldown { user } => {
                let _ = client.try_cooldown(pick(user));
            }
            FuzzAction::Redeem { user, amount } => {
                let u = pick(user);
                let _ = client.try_redeem(u, u, &i128::from(amount));
            }
            FuzzAction::ClaimRewards { user, amount } => {
                let u = pick(user);
                let _ = client.try_claim_rewards(u, u, &i128::from(amount));
            }
            FuzzAction::Advance { seconds } => {
                let now = env.ledger().timestamp();
                env.ledger().set_timestamp(now + u64::from(seconds));
            }
            FuzzAction::SetEmission { rate } => {
                let entry = AssetConfigInput {
                    emission_per_second: i128::from(rate),
                    total_staked: 0,
                    underlying_asset: contract_id.clone(),
                };
                let _ = client.try_configure_assets(&admin, &vec![&env, entry]);
            }
            FuzzAction::TogglePolicy => {
                policy = match policy {
                    CooldownPolicy::Weighted => CooldownPolicy::Reset,
                    CooldownPolicy::Reset => CooldownPolicy::Weighted,
                };
                client.set_cooldown_policy(&admin, &policy);
            }
        }

        // Ledger invariants must hold after every action, successful or not.
        let total: i128 = users.iter().map(|u| client.get_staked(u)).sum();
        assert_eq!(client.get_total_staked(), total);
        let holders = users.iter().filter(|u| client.get_staked(u) > 0).count() as u64;
        assert_eq!(client.user_count(), holders);

        let index = client.get_reward_index().cumulative_reward_per_unit;
        assert!(index >= last_index);
        last_index = index;
    }
});
