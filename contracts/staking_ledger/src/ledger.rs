use soroban_sdk::{contracttype, symbol_short, Address, Env, Symbol, I256};

use crate::cooldown::{CooldownPolicy, CooldownWindow};
use crate::distribution::{AssetConfig, RewardIndex};
use crate::events;
use crate::ContractError;

// ── Storage key constants ────────────────────────────────────────────────────

const INITIALIZED: Symbol = symbol_short!("INIT");
const CONFIG: Symbol = symbol_short!("CONFIG");
const ASSET: Symbol = symbol_short!("ASSET");
const INDEX: Symbol = symbol_short!("INDEX");
const USER_COUNT: Symbol = symbol_short!("USR_CNT");

const INSTANCE_TTL_THRESHOLD: u32 = 518400;
const INSTANCE_TTL_EXTEND_TO: u32 = 1036800;

// ── Types ───────────────────────────────────────────────────────────────────

/// Deployment parameters, fixed at initialisation except for the policy.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct LedgerConfig {
    pub staked_token: Address,
    pub reward_token: Address,
    /// Holder of the reward supply; must approve the ledger as spender.
    pub rewards_vault: Address,
    pub cooldown_seconds: u64,
    pub unstake_window: u64,
    /// No rewards accrue after this instant.
    pub distribution_end: u64,
    pub cooldown_policy: CooldownPolicy,
}

impl LedgerConfig {
    pub fn window(&self) -> CooldownWindow {
        CooldownWindow {
            cooldown_seconds: self.cooldown_seconds,
            unstake_window: self.unstake_window,
        }
    }
}

/// In-memory copy of every ledger-wide record.
///
/// Operations mutate this copy and call `commit` only once settlement has
/// succeeded.
#[derive(Clone, Debug)]
pub struct LedgerState {
    pub config: LedgerConfig,
    pub asset: AssetConfig,
    pub index: RewardIndex,
    pub user_count: u64,
    index_moved: bool,
}

impl LedgerState {
    /// Fresh state for a ledger initialised at `now`.
    pub fn genesis(env: &Env, config: LedgerConfig, underlying_asset: Address, now: u64) -> Self {
        Self {
            config,
            asset: AssetConfig {
                emission_per_second: 0,
                total_staked: 0,
                underlying_asset,
            },
            index: RewardIndex::new(env, now),
            user_count: 0,
            index_moved: false,
        }
    }

    pub fn is_initialized(env: &Env) -> bool {
        env.storage().instance().has(&INITIALIZED)
    }

    pub fn load(env: &Env) -> Result<Self, ContractError> {
        let storage = env.storage().instance();
        if !storage.has(&INITIALIZED) {
            return Err(ContractError::NotInitialized);
        }

        let config: LedgerConfig = storage.get(&CONFIG).ok_or(ContractError::NotInitialized)?;
        let asset: AssetConfig = storage.get(&ASSET).ok_or(ContractError::NotInitialized)?;
        let index: RewardIndex = storage.get(&INDEX).ok_or(ContractError::NotInitialized)?;
        let user_count: u64 = storage.get(&USER_COUNT).unwrap_or(0);

        Ok(Self {
            config,
            asset,
            index,
            user_count,
            index_moved: false,
        })
    }

    /// Advance the reward index to `now` using the current emission rate.
    pub fn sync(&mut self, env: &Env, now: u64) {
        let next = self
            .index
            .synced(env, &self.asset, now, self.config.distribution_end);
        if next.cumulative_reward_per_unit != self.index.cumulative_reward_per_unit {
            self.index_moved = true;
        }
        self.index = next;
    }

    /// Index as it would read at `now`, leaving `self` untouched.
    pub fn shadow_index(&self, env: &Env, now: u64) -> I256 {
        self.index
            .synced(env, &self.asset, now, self.config.distribution_end)
            .cumulative_reward_per_unit
    }

    pub fn add_stake(&mut self, amount: i128, first_stake: bool) -> Result<(), ContractError> {
        self.asset.total_staked = self
            .asset
            .total_staked
            .checked_add(amount)
            .ok_or(ContractError::Overflow)?;
        if first_stake {
            self.user_count = self.user_count.saturating_add(1);
        }
        Ok(())
    }

    pub fn remove_stake(&mut self, amount: i128, emptied: bool) -> Result<(), ContractError> {
        self.asset.total_staked = self
            .asset
            .total_staked
            .checked_sub(amount)
            .ok_or(ContractError::Overflow)?;
        if emptied {
            self.user_count = self.user_count.saturating_sub(1);
        }
        Ok(())
    }

    /// Persist every ledger-wide record.
    pub fn commit(&self, env: &Env, now: u64) {
        let storage = env.storage().instance();
        storage.set(&INITIALIZED, &true);
        storage.set(&CONFIG, &self.config);
        storage.set(&ASSET, &self.asset);
        storage.set(&INDEX, &self.index);
        storage.set(&USER_COUNT, &self.user_count);
        storage.extend_ttl(INSTANCE_TTL_THRESHOLD, INSTANCE_TTL_EXTEND_TO);

        if self.index_moved {
            events::publish_index_updated(
                env,
                self.asset.underlying_asset.clone(),
                self.index.cumulative_reward_per_unit.clone(),
                now,
            );
        }
    }
}
