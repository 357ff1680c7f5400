#![no_std]

pub mod access;
pub mod account;
pub mod cooldown;
pub mod distribution;
pub mod events;
pub mod ledger;
pub mod settlement;

use soroban_sdk::{contract, contractimpl, Address, Env, Vec};

pub use access::AdminTier;
pub use account::UserAccount;
pub use cooldown::{CooldownPolicy, CooldownState};
pub use distribution::{AssetConfig, AssetConfigInput, RewardIndex, PRECISION};
pub use ledger::LedgerConfig;

use ledger::LedgerState;
use settlement::SettlementGateway;

// ── Contract errors ──────────────────────────────────────────────────────────

#[soroban_sdk::contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum ContractError {
    NotInitialized = 1,
    AlreadyInitialized = 2,
    Unauthorized = 3,
    InvalidInput = 4,
    /// Zero or negative token quantity.
    InvalidAmount = 5,
    InsufficientBalance = 6,
    InsufficientRewards = 7,
    /// Redeem attempted outside the open redeem window.
    CooldownNotMatured = 8,
    NothingStaked = 9,
    /// The token contract rejected a transfer; nothing was committed.
    SettlementFailed = 10,
    UnknownAsset = 11,
    Overflow = 12,
}

// ── Contract ─────────────────────────────────────────────────────────────────

#[contract]
pub struct StakingLedgerContract;

#[contractimpl]
impl StakingLedgerContract {
    // ── Initialisation ──────────────────────────────────────────────────────

    /// Bootstrap the ledger.
    ///
    /// * `staked_token`          – SAC address of the token users stake.
    /// * `reward_token`          – SAC address of the token paid as rewards
    ///                             (may equal `staked_token`).
    /// * `cooldown_seconds`      – wait between `cooldown` and the redeem window.
    /// * `unstake_window`        – length of the redeem window in seconds.
    /// * `rewards_vault`         – reward holder; must approve this contract.
    /// * `distribution_duration` – seconds from now until emission stops.
    /// * `cooldown_policy`       – how top-ups during a cooldown move its start.
    #[allow(clippy::too_many_arguments)]
    pub fn initialize(
        env: Env,
        admin: Address,
        staked_token: Address,
        reward_token: Address,
        cooldown_seconds: u64,
        unstake_window: u64,
        rewards_vault: Address,
        distribution_duration: u64,
        cooldown_policy: CooldownPolicy,
    ) -> Result<(), ContractError> {
        if LedgerState::is_initialized(&env) {
            return Err(ContractError::AlreadyInitialized);
        }

        let now = env.ledger().timestamp();
        let config = LedgerConfig {
            staked_token: staked_token.clone(),
            reward_token: reward_token.clone(),
            rewards_vault: rewards_vault.clone(),
            cooldown_seconds,
            unstake_window,
            distribution_end: now.saturating_add(distribution_duration),
            cooldown_policy,
        };

        let state = LedgerState::genesis(&env, config, env.current_contract_address(), now);
        state.commit(&env, now);

        access::set_super_admin(&env, &admin);

        events::publish_initialized(
            &env,
            events::InitializedEvent {
                admin,
                staked_token,
                reward_token,
                rewards_vault,
                cooldown_seconds,
                unstake_window,
                distribution_end: state.config.distribution_end,
                timestamp: now,
            },
        );

        Ok(())
    }

    // ── Staking ─────────────────────────────────────────────────────────────

    /// Deposit `amount` staked tokens from `from`, credited to `on_behalf_of`.
    ///
    /// Rewards earned so far by `on_behalf_of` are banked before the balance
    /// changes, so the deposit never earns retroactively.
    pub fn stake(
        env: Env,
        from: Address,
        on_behalf_of: Address,
        amount: i128,
    ) -> Result<(), ContractError> {
        let now = env.ledger().timestamp();
        let mut state = LedgerState::load(&env)?;
        from.require_auth();

        if amount <= 0 {
            return Err(ContractError::InvalidAmount);
        }

        state.sync(&env, now);
        let mut account = account::load(&env, &on_behalf_of);
        let accrued = account
            .bank(&env, &state.index.cumulative_reward_per_unit)
            .ok_or(ContractError::Overflow)?;

        let window = state.config.window();
        account.cooldown_timestamp = window
            .next_cooldown_timestamp(
                state.config.cooldown_policy,
                account.cooldown_timestamp,
                account.staked_balance,
                amount,
                now,
            )
            .ok_or(ContractError::Overflow)?;
        account.lock_end_timestamp = window.lock_end(account.cooldown_timestamp);

        let first_stake = account.staked_balance == 0;
        account.staked_balance = account
            .staked_balance
            .checked_add(amount)
            .ok_or(ContractError::Overflow)?;
        state.add_stake(amount, first_stake)?;

        SettlementGateway::new(&env).pull(&state.config.staked_token, &from, amount)?;

        state.commit(&env, now);
        account::store(&env, &on_behalf_of, &account);

        if accrued > 0 {
            events::publish_rewards_accrued(&env, on_behalf_of.clone(), accrued, now);
        }
        events::publish_staked(
            &env,
            from,
            on_behalf_of,
            amount,
            state.asset.total_staked,
            now,
        );

        Ok(())
    }

    /// Start the cooldown for the caller's whole position.
    ///
    /// Calling again restarts the clock. Fails with `InvalidInput` while the
    /// ledger clock reads zero.
    pub fn cooldown(env: Env, staker: Address) -> Result<(), ContractError> {
        let now = env.ledger().timestamp();
        let mut state = LedgerState::load(&env)?;
        staker.require_auth();

        // A zero cooldown timestamp encodes `Idle`.
        if now == 0 {
            return Err(ContractError::InvalidInput);
        }

        let mut account = account::load(&env, &staker);
        if account.staked_balance == 0 {
            return Err(ContractError::NothingStaked);
        }

        state.sync(&env, now);
        let accrued = account
            .bank(&env, &state.index.cumulative_reward_per_unit)
            .ok_or(ContractError::Overflow)?;

        account.cooldown_timestamp = now;
        account.lock_end_timestamp = state.config.window().lock_end(now);

        state.commit(&env, now);
        account::store(&env, &staker, &account);

        if accrued > 0 {
            events::publish_rewards_accrued(&env, staker.clone(), accrued, now);
        }
        events::publish_cooldown_activated(&env, staker, account.lock_end_timestamp, now);

        Ok(())
    }

    /// Withdraw `amount` of the caller's stake to `to`.
    ///
    /// Only allowed while the redeem window is open. Redeeming the whole
    /// balance returns the account to `Idle`.
    pub fn redeem(env: Env, staker: Address, to: Address, amount: i128) -> Result<(), ContractError> {
        let now = env.ledger().timestamp();
        let mut state = LedgerState::load(&env)?;
        staker.require_auth();

        if amount <= 0 {
            return Err(ContractError::InvalidAmount);
        }

        state.sync(&env, now);
        let mut account = account::load(&env, &staker);
        let accrued = account
            .bank(&env, &state.index.cumulative_reward_per_unit)
            .ok_or(ContractError::Overflow)?;

        let window = state.config.window();
        if window.state_at(account.cooldown_timestamp, now) != CooldownState::RedeemWindowOpen {
            return Err(ContractError::CooldownNotMatured);
        }
        if amount > account.staked_balance {
            return Err(ContractError::InsufficientBalance);
        }

        account.staked_balance = account
            .staked_balance
            .checked_sub(amount)
            .ok_or(ContractError::Overflow)?;
        let emptied = account.staked_balance == 0;
        if emptied {
            account.cooldown_timestamp = 0;
            account.lock_end_timestamp = 0;
        }
        state.remove_stake(amount, emptied)?;

        SettlementGateway::new(&env).push(&state.config.staked_token, &to, amount)?;

        state.commit(&env, now);
        account::store(&env, &staker, &account);

        if accrued > 0 {
            events::publish_rewards_accrued(&env, staker.clone(), accrued, now);
        }
        events::publish_redeemed(&env, staker, to, amount, state.asset.total_staked, now);

        Ok(())
    }

    // ── Rewards ─────────────────────────────────────────────────────────────

    /// Pay `amount` of the caller's banked rewards to `to` from the vault.
    pub fn claim_rewards(
        env: Env,
        staker: Address,
        to: Address,
        amount: i128,
    ) -> Result<(), ContractError> {
        let now = env.ledger().timestamp();
        let mut state = LedgerState::load(&env)?;
        staker.require_auth();

        if amount <= 0 {
            return Err(ContractError::InvalidAmount);
        }

        state.sync(&env, now);
        let mut account = account::load(&env, &staker);
        let accrued = account
            .bank(&env, &state.index.cumulative_reward_per_unit)
            .ok_or(ContractError::Overflow)?;

        if amount > account.accrued_rewards {
            return Err(ContractError::InsufficientRewards);
        }
        account.accrued_rewards = account
            .accrued_rewards
            .checked_sub(amount)
            .ok_or(ContractError::Overflow)?;

        SettlementGateway::new(&env).pay_reward(
            &state.config.reward_token,
            &state.config.rewards_vault,
            &to,
            amount,
        )?;

        state.commit(&env, now);
        account::store(&env, &staker, &account);

        if accrued > 0 {
            events::publish_rewards_accrued(&env, staker.clone(), accrued, now);
        }
        events::publish_rewards_claimed(&env, staker, to, amount, now);

        Ok(())
    }

    // ── View functions ───────────────────────────────────────────────────────

    /// Banked plus not-yet-banked rewards for `user` as of now.
    pub fn get_total_rewards_balance(env: Env, user: Address) -> Result<i128, ContractError> {
        let now = env.ledger().timestamp();
        let state = LedgerState::load(&env)?;
        let index = state.shadow_index(&env, now);
        account::load(&env, &user)
            .total_rewards(&env, &index)
            .ok_or(ContractError::Overflow)
    }

    /// Instant the user's redeem window opens, or 0 when no cooldown is live.
    pub fn get_user_lock_end_timestamp(env: Env, user: Address) -> u64 {
        let Ok(state) = LedgerState::load(&env) else {
            return 0;
        };
        let account = account::load(&env, &user);
        let now = env.ledger().timestamp();
        match state.config.window().state_at(account.cooldown_timestamp, now) {
            CooldownState::Idle => 0,
            _ => account.lock_end_timestamp,
        }
    }

    /// Number of accounts currently holding a non-zero stake.
    pub fn user_count(env: Env) -> u64 {
        LedgerState::load(&env).map(|s| s.user_count).unwrap_or(0)
    }

    pub fn get_asset_emission_per_second(env: Env) -> i128 {
        LedgerState::load(&env)
            .map(|s| s.asset.emission_per_second)
            .unwrap_or(0)
    }

    pub fn get_staked(env: Env, user: Address) -> i128 {
        account::load(&env, &user).staked_balance
    }

    pub fn get_total_staked(env: Env) -> i128 {
        LedgerState::load(&env)
            .map(|s| s.asset.total_staked)
            .unwrap_or(0)
    }

    pub fn get_user_account(env: Env, user: Address) -> UserAccount {
        account::load(&env, &user)
    }

    pub fn get_cooldown_state(env: Env, user: Address) -> Result<CooldownState, ContractError> {
        let state = LedgerState::load(&env)?;
        let account = account::load(&env, &user);
        Ok(state
            .config
            .window()
            .state_at(account.cooldown_timestamp, env.ledger().timestamp()))
    }

    pub fn get_asset_config(env: Env) -> Result<AssetConfig, ContractError> {
        LedgerState::load(&env).map(|s| s.asset)
    }

    /// The stored reward index (not advanced to now).
    pub fn get_reward_index(env: Env) -> Result<RewardIndex, ContractError> {
        LedgerState::load(&env).map(|s| s.index)
    }

    pub fn get_config(env: Env) -> Result<LedgerConfig, ContractError> {
        LedgerState::load(&env).map(|s| s.config)
    }

    pub fn is_initialized(env: Env) -> bool {
        LedgerState::is_initialized(&env)
    }

    pub fn get_admin(env: Env) -> Result<Address, ContractError> {
        access::get_super_admin(&env).ok_or(ContractError::NotInitialized)
    }

    // ── Admin functions ──────────────────────────────────────────────────────

    /// Replace the emission rate.
    ///
    /// The index is flushed at the old rate first, so accrual is piecewise:
    /// old rate up to now, new rate afterwards. Every entry is validated
    /// before any is applied; with duplicate entries the last one wins.
    ///
    /// Requires at least `EmissionManager` tier.
    pub fn configure_assets(
        env: Env,
        caller: Address,
        assets: Vec<AssetConfigInput>,
    ) -> Result<(), ContractError> {
        let now = env.ledger().timestamp();
        let mut state = LedgerState::load(&env)?;
        caller.require_auth();
        Self::require_admin_tier(&env, &caller, &AdminTier::EmissionManager)?;

        let mut emission = None;
        for input in assets.iter() {
            if input.underlying_asset != state.asset.underlying_asset {
                return Err(ContractError::UnknownAsset);
            }
            if input.emission_per_second < 0 {
                return Err(ContractError::InvalidInput);
            }
            emission = Some(input.emission_per_second);
        }
        let emission = emission.ok_or(ContractError::InvalidInput)?;

        state.sync(&env, now);
        state.asset.emission_per_second = emission;
        state.commit(&env, now);

        events::publish_asset_config_updated(
            &env,
            state.asset.underlying_asset.clone(),
            emission,
            now,
        );

        Ok(())
    }

    /// Change how stake deposited during a cooldown moves its start.
    /// Affects only future deposits.
    ///
    /// Requires at least `EmissionManager` tier.
    pub fn set_cooldown_policy(
        env: Env,
        caller: Address,
        policy: CooldownPolicy,
    ) -> Result<(), ContractError> {
        let now = env.ledger().timestamp();
        let mut state = LedgerState::load(&env)?;
        caller.require_auth();
        Self::require_admin_tier(&env, &caller, &AdminTier::EmissionManager)?;

        state.config.cooldown_policy = policy;
        state.commit(&env, now);

        events::publish_cooldown_policy_set(&env, policy, now);

        Ok(())
    }

    // ── Admin tier management ────────────────────────────────────────────────

    /// Grants `tier` to `target`. Only a `SuperAdmin` may call this.
    pub fn promote_admin(
        env: Env,
        caller: Address,
        target: Address,
        tier: AdminTier,
    ) -> Result<(), ContractError> {
        LedgerState::load(&env)?;
        caller.require_auth();
        if !access::promote_admin(&env, &caller, &target, tier) {
            return Err(ContractError::Unauthorized);
        }
        Ok(())
    }

    /// Removes `target`'s tier. Only a `SuperAdmin` may call this, and the
    /// bootstrap admin cannot be removed.
    pub fn demote_admin(env: Env, caller: Address, target: Address) -> Result<(), ContractError> {
        LedgerState::load(&env)?;
        caller.require_auth();
        if !access::demote_admin(&env, &caller, &target) {
            return Err(ContractError::Unauthorized);
        }
        Ok(())
    }

    pub fn get_admin_tier(env: Env, admin: Address) -> Option<AdminTier> {
        access::get_admin_tier(&env, &admin)
    }

    // ── Internal helpers ─────────────────────────────────────────────────────

    fn require_admin_tier(
        env: &Env,
        caller: &Address,
        min_tier: &AdminTier,
    ) -> Result<(), ContractError> {
        if access::require_tier(env, caller, min_tier) {
            Ok(())
        } else {
            Err(ContractError::Unauthorized)
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
