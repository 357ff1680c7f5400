#![allow(deprecated)] // events().publish migration tracked separately

use soroban_sdk::{symbol_short, Address, Env, I256};

use crate::cooldown::CooldownPolicy;

// ── Event payloads ──────────────────────────────────────────────────────────

/// Fired once when the ledger is bootstrapped.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct InitializedEvent {
    pub admin: Address,
    pub staked_token: Address,
    pub reward_token: Address,
    pub rewards_vault: Address,
    pub cooldown_seconds: u64,
    pub unstake_window: u64,
    pub distribution_end: u64,
    pub timestamp: u64,
}

/// Fired when stake is deposited.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StakedEvent {
    pub from: Address,
    pub on_behalf_of: Address,
    pub amount: i128,
    pub new_total_staked: i128,
    pub timestamp: u64,
}

/// Fired when a staker starts (or restarts) the cooldown.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CooldownActivatedEvent {
    pub staker: Address,
    pub lock_end: u64,
    pub timestamp: u64,
}

/// Fired when stake is withdrawn inside the redeem window.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RedeemedEvent {
    pub staker: Address,
    pub to: Address,
    pub amount: i128,
    pub new_total_staked: i128,
    pub timestamp: u64,
}

/// Fired when newly earned rewards are banked into an account.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RewardsAccruedEvent {
    pub user: Address,
    pub amount: i128,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RewardsClaimedEvent {
    pub staker: Address,
    pub to: Address,
    pub amount: i128,
    pub timestamp: u64,
}

/// Fired when the emission rate is replaced.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AssetConfigUpdatedEvent {
    pub asset: Address,
    pub emission_per_second: i128,
    pub timestamp: u64,
}

/// Fired whenever a sync actually moves the reward index.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct IndexUpdatedEvent {
    pub asset: Address,
    pub index: I256,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CooldownPolicySetEvent {
    pub policy: CooldownPolicy,
    pub timestamp: u64,
}

// ── Publishers ──────────────────────────────────────────────────────────────

pub fn publish_initialized(env: &Env, event: InitializedEvent) {
    env.events().publish((symbol_short!("INIT"),), event);
}

pub fn publish_staked(
    env: &Env,
    from: Address,
    on_behalf_of: Address,
    amount: i128,
    new_total_staked: i128,
    timestamp: u64,
) {
    env.events().publish(
        (symbol_short!("STAKED"), on_behalf_of.clone()),
        StakedEvent {
            from,
            on_behalf_of,
            amount,
            new_total_staked,
            timestamp,
        },
    );
}

pub fn publish_cooldown_activated(env: &Env, staker: Address, lock_end: u64, timestamp: u64) {
    env.events().publish(
        (symbol_short!("COOLDOWN"), staker.clone()),
        CooldownActivatedEvent {
            staker,
            lock_end,
            timestamp,
        },
    );
}

pub fn publish_redeemed(
    env: &Env,
    staker: Address,
    to: Address,
    amount: i128,
    new_total_staked: i128,
    timestamp: u64,
) {
    env.events().publish(
        (symbol_short!("REDEEMED"), staker.clone()),
        RedeemedEvent {
            staker,
            to,
            amount,
            new_total_staked,
            timestamp,
        },
    );
}

pub fn publish_rewards_accrued(env: &Env, user: Address, amount: i128, timestamp: u64) {
    env.events().publish(
        (symbol_short!("ACCRUED"), user.clone()),
        RewardsAccruedEvent {
            user,
            amount,
            timestamp,
        },
    );
}

pub fn publish_rewards_claimed(
    env: &Env,
    staker: Address,
    to: Address,
    amount: i128,
    timestamp: u64,
) {
    env.events().publish(
        (symbol_short!("CLAIMED"), staker.clone()),
        RewardsClaimedEvent {
            staker,
            to,
            amount,
            timestamp,
        },
    );
}

pub fn publish_asset_config_updated(
    env: &Env,
    asset: Address,
    emission_per_second: i128,
    timestamp: u64,
) {
    env.events().publish(
        (symbol_short!("ASSET_CFG"), asset.clone()),
        AssetConfigUpdatedEvent {
            asset,
            emission_per_second,
            timestamp,
        },
    );
}

pub fn publish_index_updated(env: &Env, asset: Address, index: I256, timestamp: u64) {
    env.events().publish(
        (symbol_short!("IDX_UPD"), asset.clone()),
        IndexUpdatedEvent {
            asset,
            index,
            timestamp,
        },
    );
}

pub fn publish_cooldown_policy_set(env: &Env, policy: CooldownPolicy, timestamp: u64) {
    env.events().publish(
        (symbol_short!("POLICY"),),
        CooldownPolicySetEvent { policy, timestamp },
    );
}
