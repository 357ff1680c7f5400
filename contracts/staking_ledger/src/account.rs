use soroban_sdk::{contracttype, symbol_short, Address, Env, Symbol, I256};

use crate::distribution;

// ── Storage keys ────────────────────────────────────────────────────────────

const USER_ACCOUNT: Symbol = symbol_short!("USR_ACCT");

const TTL_THRESHOLD: u32 = 5184000;
const TTL_EXTEND_TO: u32 = 10368000;

// ── Types ───────────────────────────────────────────────────────────────────

/// Per-user staking position.
///
/// Created on first stake and kept forever, so rewards banked before a full
/// redeem stay claimable.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct UserAccount {
    pub staked_balance: i128,
    /// Global reward-per-unit value at the account's last sync.
    pub reward_snapshot: I256,
    /// Banked rewards not yet claimed.
    pub accrued_rewards: i128,
    /// Instant the cooldown was triggered; 0 when idle.
    pub cooldown_timestamp: u64,
    /// Instant the redeem window opens; 0 when idle.
    pub lock_end_timestamp: u64,
}

impl UserAccount {
    /// Zeroed account for a user who never staked.
    pub fn empty(env: &Env) -> Self {
        Self {
            staked_balance: 0,
            reward_snapshot: I256::from_i32(env, 0),
            accrued_rewards: 0,
            cooldown_timestamp: 0,
            lock_end_timestamp: 0,
        }
    }

    /// Rewards accrued since the last snapshot, not yet banked.
    pub fn pending(&self, env: &Env, index: &I256) -> Option<i128> {
        distribution::accrued_since(env, self.staked_balance, index, &self.reward_snapshot)
    }

    /// Bank everything earned up to `index` and move the snapshot there.
    ///
    /// Returns the newly banked amount.
    pub fn bank(&mut self, env: &Env, index: &I256) -> Option<i128> {
        let fresh = self.pending(env, index)?;
        self.accrued_rewards = self.accrued_rewards.checked_add(fresh)?;
        self.reward_snapshot = index.clone();
        Some(fresh)
    }

    /// Total claimable rewards as of `index`, without mutating the account.
    pub fn total_rewards(&self, env: &Env, index: &I256) -> Option<i128> {
        self.accrued_rewards.checked_add(self.pending(env, index)?)
    }
}

// ── Storage helpers ─────────────────────────────────────────────────────────

fn account_key(user: &Address) -> (Symbol, Address) {
    (USER_ACCOUNT, user.clone())
}

/// Load a user's account, or a zeroed one if the user never staked.
pub fn load(env: &Env, user: &Address) -> UserAccount {
    let key = account_key(user);
    let account: Option<UserAccount> = env.storage().persistent().get(&key);
    match account {
        Some(account) => {
            env.storage()
                .persistent()
                .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);
            account
        }
        None => UserAccount::empty(env),
    }
}

pub fn store(env: &Env, user: &Address, account: &UserAccount) {
    let key = account_key(user);
    env.storage().persistent().set(&key, account);
    env.storage()
        .persistent()
        .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);
}
