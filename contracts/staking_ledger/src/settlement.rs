use soroban_sdk::{token, Address, Env};

use crate::ContractError;

/// Token movements the ledger depends on.
///
/// Each call is attempted with the fallible client variant so a rejected
/// transfer surfaces as `SettlementFailed` instead of trapping the host.
pub struct SettlementGateway<'a> {
    env: &'a Env,
}

impl<'a> SettlementGateway<'a> {
    pub fn new(env: &'a Env) -> Self {
        Self { env }
    }

    /// Move `amount` of `staked_token` from `from` into the ledger.
    pub fn pull(
        &self,
        staked_token: &Address,
        from: &Address,
        amount: i128,
    ) -> Result<(), ContractError> {
        let ledger = self.env.current_contract_address();
        match token::Client::new(self.env, staked_token).try_transfer(from, &ledger, &amount) {
            Ok(Ok(())) => Ok(()),
            _ => Err(ContractError::SettlementFailed),
        }
    }

    /// Return `amount` of `staked_token` held by the ledger to `to`.
    pub fn push(
        &self,
        staked_token: &Address,
        to: &Address,
        amount: i128,
    ) -> Result<(), ContractError> {
        let ledger = self.env.current_contract_address();
        match token::Client::new(self.env, staked_token).try_transfer(&ledger, to, &amount) {
            Ok(Ok(())) => Ok(()),
            _ => Err(ContractError::SettlementFailed),
        }
    }

    /// Pay `amount` of `reward_token` out of `vault` to `to`, spending the
    /// allowance the vault granted the ledger.
    pub fn pay_reward(
        &self,
        reward_token: &Address,
        vault: &Address,
        to: &Address,
        amount: i128,
    ) -> Result<(), ContractError> {
        let ledger = self.env.current_contract_address();
        match token::Client::new(self.env, reward_token).try_transfer_from(
            &ledger, vault, to, &amount,
        ) {
            Ok(Ok(())) => Ok(()),
            _ => Err(ContractError::SettlementFailed),
        }
    }
}
