use soroban_sdk::{contracttype, Address, Env, I256};

/// Fixed-point scaling factor for the reward-per-unit accumulator.
///
/// Every division in this module rounds down, so the ledger can never promise
/// more rewards than the emission schedule produced.
pub const PRECISION: i128 = 1_000_000_000_000_000_000;

// ── Types ───────────────────────────────────────────────────────────────────

/// Emission parameters for the reward-bearing asset.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AssetConfig {
    /// Reward units emitted per second across all stakers.
    pub emission_per_second: i128,
    /// Sum of every account's staked balance.
    pub total_staked: i128,
    /// The asset whose holders earn the emission (this ledger's own address).
    pub underlying_asset: Address,
}

/// One entry of a `configure_assets` call.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AssetConfigInput {
    pub emission_per_second: i128,
    /// Accepted for interface compatibility; the ledger keeps its own tally.
    pub total_staked: i128,
    pub underlying_asset: Address,
}

/// Global reward accumulator.
///
/// Held in 256 bits: `emission × elapsed × PRECISION` exceeds `i128` within
/// minutes at 18-decimal rates, and a dust-sized `total_staked` inflates the
/// per-unit value further.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RewardIndex {
    /// Rewards earned by one staked unit since genesis, scaled by `PRECISION`.
    pub cumulative_reward_per_unit: I256,
    pub last_update_timestamp: u64,
}

impl RewardIndex {
    pub fn new(env: &Env, now: u64) -> Self {
        Self {
            cumulative_reward_per_unit: I256::from_i32(env, 0),
            last_update_timestamp: now,
        }
    }

    /// Returns the index advanced to `now`.
    ///
    /// Accrual stops at `distribution_end`; `last_update_timestamp` still
    /// moves to `now` so a later call never re-counts the same interval.
    pub fn synced(&self, env: &Env, asset: &AssetConfig, now: u64, distribution_end: u64) -> Self {
        let accrue_until = now.min(distribution_end);
        let elapsed = accrue_until.saturating_sub(self.last_update_timestamp);

        Self {
            cumulative_reward_per_unit: compute_reward_per_unit(
                env,
                &self.cumulative_reward_per_unit,
                asset.emission_per_second,
                elapsed,
                asset.total_staked,
            ),
            last_update_timestamp: now.max(self.last_update_timestamp),
        }
    }
}

// ── Core reward engine ──────────────────────────────────────────────────────

/// Advance a reward-per-unit value by `elapsed` seconds of emission.
///
/// ```text
/// Δ = emission × elapsed × PRECISION / total_staked
/// ```
///
/// The product is bounded by `i128::MAX × u64::MAX × 1e18`, well inside 256
/// bits. No rewards accrue while nothing is staked.
pub fn compute_reward_per_unit(
    env: &Env,
    stored: &I256,
    emission_per_second: i128,
    elapsed: u64,
    total_staked: i128,
) -> I256 {
    if total_staked <= 0 || emission_per_second <= 0 || elapsed == 0 {
        return stored.clone();
    }

    let delta = I256::from_i128(env, emission_per_second)
        .mul(&I256::from_i128(env, i128::from(elapsed)))
        .mul(&I256::from_i128(env, PRECISION))
        .div(&I256::from_i128(env, total_staked));

    stored.add(&delta)
}

/// Rewards a balance earned while the index moved from `snapshot` to `current`.
///
/// The balance was part of `total_staked` for the whole interval, so the
/// result never exceeds what was emitted. Returns `None` only when that no
/// longer fits an `i128`.
pub fn accrued_since(env: &Env, balance: i128, current: &I256, snapshot: &I256) -> Option<i128> {
    current
        .sub(snapshot)
        .mul(&I256::from_i128(env, balance))
        .div(&I256::from_i128(env, PRECISION))
        .to_i128()
}

// ── Unit tests ──────────────────────────────────────────────────────────────
