//! Shared fixture for the property suites.

use soroban_sdk::testutils::{Address as _, Ledger as _};
use soroban_sdk::token::{Client as TokenClient, StellarAssetClient};
use soroban_sdk::{vec, Address, Env};
use staking_ledger::{
    AssetConfigInput, CooldownPolicy, StakingLedgerContract, StakingLedgerContractClient,
};

pub const START: u64 = 1_000;
pub const COOLDOWN: u64 = 10;
pub const WINDOW: u64 = 100;

pub struct Fixture {
    pub env: Env,
    pub client: StakingLedgerContractClient<'static>,
    pub staked_token: Address,
    pub users: std::vec::Vec<Address>,
}

impl Fixture {
    /// Ledger with `emission` per second and `n_users` users each holding
    /// `balance` staked tokens. The rewards vault is effectively unlimited.
    pub fn new(emission: i128, n_users: usize, balance: i128) -> Self {
        let env = Env::default();
        env.mock_all_auths();
        env.ledger().set_timestamp(START);

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
            &COOLDOWN,
            &WINDOW,
            &vault,
            &(365 * 24 * 3600),
            &CooldownPolicy::Weighted,
        );

        let funds = 1_000_000_000_000i128;
        StellarAssetClient::new(&env, &reward_token).mint(&vault, &funds);
        TokenClient::new(&env, &reward_token).approve(
            &vault,
            &contract_id,
            &funds,
            &(env.ledger().sequence() + 1_000),
        );

        let entry = AssetConfigInput {
            emission_per_second: emission,
            total_staked: 0,
            underlying_asset: contract_id.clone(),
        };
        client.configure_assets(&admin, &vec![&env, entry]);

        let minter = StellarAssetClient::new(&env, &staked_token);
        let users = (0..n_users)
            .map(|_| {
                let user = Address::generate(&env);
                minter.mint(&user, &balance);
                user
            })
            .collect();

        Self {
            env,
            client,
            staked_token,
            users,
        }
    }

    pub fn advance(&self, seconds: u64) {
        let now = self.env.ledger().timestamp();
        self.env.ledger().set_timestamp(now + seconds);
    }
}
