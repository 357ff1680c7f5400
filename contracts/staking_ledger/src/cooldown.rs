use soroban_sdk::contracttype;

/// How a stake deposited during an active cooldown moves the recipient's
/// cooldown start.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum CooldownPolicy {
    /// Start moves towards `now` in proportion to the deposit's share of the
    /// resulting balance.
    Weighted = 0,
    /// Start becomes `now`; the full cooldown must be served again.
    Reset = 1,
}

/// Where an account sits in the withdrawal lifecycle.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum CooldownState {
    Idle = 0,
    Cooling = 1,
    RedeemWindowOpen = 2,
}

/// Cooldown durations configured at initialisation.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct CooldownWindow {
    pub cooldown_seconds: u64,
    pub unstake_window: u64,
}

impl CooldownWindow {
    /// Instant the redeem window opens for a cooldown started at `start`.
    pub fn opens_at(&self, start: u64) -> u64 {
        start.saturating_add(self.cooldown_seconds)
    }

    /// Last instant (inclusive) at which redemption is allowed.
    pub fn closes_at(&self, start: u64) -> u64 {
        self.opens_at(start).saturating_add(self.unstake_window)
    }

    /// Classify a cooldown started at `start` as seen at `now`.
    ///
    /// A window that has lapsed reads as `Idle`: the staker must call
    /// `cooldown` again.
    pub fn state_at(&self, start: u64, now: u64) -> CooldownState {
        if start == 0 {
            return CooldownState::Idle;
        }
        if now < self.opens_at(start) {
            CooldownState::Cooling
        } else if now <= self.closes_at(start) {
            CooldownState::RedeemWindowOpen
        } else {
            CooldownState::Idle
        }
    }

    /// Lock-end timestamp reported for a cooldown started at `start`.
    pub fn lock_end(&self, start: u64) -> u64 {
        if start == 0 {
            0
        } else {
            self.opens_at(start)
        }
    }

    /// Cooldown start for a recipient holding `balance` who receives `incoming`
    /// more units at `now`.
    ///
    /// Idle recipients stay idle and lapsed cooldowns are cleared.
    pub fn next_cooldown_timestamp(
        &self,
        policy: CooldownPolicy,
        current: u64,
        balance: i128,
        incoming: i128,
        now: u64,
    ) -> Option<u64> {
        if self.state_at(current, now) == CooldownState::Idle {
            return Some(0);
        }

        match policy {
            CooldownPolicy::Reset => Some(now),
            CooldownPolicy::Weighted => {
                let total = balance.checked_add(incoming)?;
                if total <= 0 {
                    return Some(now);
                }
                let weighted = incoming
                    .checked_mul(i128::from(now))?
                    .checked_add(balance.checked_mul(i128::from(current))?)?
                    .checked_div(total)?;
                u64::try_from(weighted).ok()
            }
        }
    }
}
