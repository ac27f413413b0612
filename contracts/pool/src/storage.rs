use soroban_sdk::{contracttype, log, Address, Env};

use cpamm::ttl::bump_persistent;

use crate::error::ContractError;

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum DataKey {
    Config,
    ReserveA,
    ReserveB,
    TotalShares,
    Shares(Address),
    Locked,
}

/// Token pair bound at construction. Never changes afterwards.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Config {
    pub token_a: Address,
    pub token_b: Address,
}

pub fn get_config(env: &Env) -> Config {
    env.storage()
        .instance()
        .get(&DataKey::Config)
        .unwrap_or_else(|| panic!("Pool: Config: token pair is not set"))
}

pub fn save_config(env: &Env, config: &Config) {
    env.storage().instance().set(&DataKey::Config, config);
}

#[contracttype]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Asset {
    /// Address of the asset
    pub address: Address,
    /// The total amount of those tokens in the pool
    pub amount: i128,
}

/// Both reserves together with the outstanding share supply.
#[contracttype]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PoolResponse {
    pub asset_a: Asset,
    pub asset_b: Asset,
    pub total_shares: i128,
}

#[contracttype]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SimulateSwapResponse {
    /// What the swap would pay out, after the fee.
    pub ask_amount: i128,
    /// Shortfall against the spot price, fee included.
    pub spread_amount: i128,
    /// Price of the offer token before the swap, 18 decimals.
    pub spot_price: i128,
}

#[contracttype]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SimulateReverseSwapResponse {
    pub offer_amount: i128,
    pub spread_amount: i128,
}

#[contracttype]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LiquidityAddedEvent {
    pub provider: Address,
    pub recipient: Address,
    pub token_a: Address,
    pub token_b: Address,
    pub amount_a: i128,
    pub amount_b: i128,
    pub shares: i128,
}

#[contracttype]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LiquidityRemovedEvent {
    pub provider: Address,
    pub recipient: Address,
    pub amount_a: i128,
    pub amount_b: i128,
    pub shares: i128,
}

#[contracttype]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SwapExecutedEvent {
    pub sender: Address,
    pub token_in: Address,
    pub token_out: Address,
    pub amount_in: i128,
    pub amount_out: i128,
    pub recipient: Address,
}

pub mod utils {
    use super::*;

    pub fn save_reserves(e: &Env, reserve_a: i128, reserve_b: i128) {
        e.storage().instance().set(&DataKey::ReserveA, &reserve_a);
        e.storage().instance().set(&DataKey::ReserveB, &reserve_b);
    }

    pub fn save_total_shares(e: &Env, amount: i128) {
        e.storage().instance().set(&DataKey::TotalShares, &amount)
    }

    pub fn save_shares(e: &Env, participant: &Address, amount: i128) {
        let key = DataKey::Shares(participant.clone());
        if amount == 0 {
            e.storage().persistent().remove(&key);
        } else {
            e.storage().persistent().set(&key, &amount);
            bump_persistent(e, &key);
        }
    }

    pub fn get_reserves(e: &Env) -> (i128, i128) {
        let reserve_a = e.storage().instance().get(&DataKey::ReserveA).unwrap_or(0);
        let reserve_b = e.storage().instance().get(&DataKey::ReserveB).unwrap_or(0);
        (reserve_a, reserve_b)
    }

    pub fn get_total_shares(e: &Env) -> i128 {
        e.storage()
            .instance()
            .get(&DataKey::TotalShares)
            .unwrap_or(0)
    }

    pub fn get_shares(e: &Env, participant: &Address) -> i128 {
        let key = DataKey::Shares(participant.clone());
        match e.storage().persistent().get(&key) {
            Some(amount) => {
                bump_persistent(e, &key);
                amount
            }
            None => 0,
        }
    }

    /// Credits freshly minted shares and grows the supply by the same amount.
    pub fn mint_shares(e: &Env, to: &Address, amount: i128) -> Result<(), ContractError> {
        let balance = get_shares(e, to)
            .checked_add(amount)
            .ok_or(ContractError::ArithmeticOverflow)?;
        let total = get_total_shares(e)
            .checked_add(amount)
            .ok_or(ContractError::ArithmeticOverflow)?;

        save_shares(e, to, balance);
        save_total_shares(e, total);
        Ok(())
    }

    pub fn burn_shares(e: &Env, from: &Address, amount: i128) -> Result<(), ContractError> {
        let balance = get_shares(e, from);
        if balance < amount {
            log!(
                e,
                "Pool: Burn: not enough shares! balance: {}, requested: {}",
                balance,
                amount
            );
            return Err(ContractError::InsufficientShares);
        }

        save_shares(e, from, balance - amount);
        save_total_shares(e, get_total_shares(e) - amount);
        Ok(())
    }
}

/// Marks the pool busy for the lifetime of the value. A second mutating entry
/// while one is held fails with [`ContractError::ReentrantCall`].
pub struct ReentrancyGuard {
    env: Env,
}

impl ReentrancyGuard {
    pub fn acquire(env: &Env) -> Result<Self, ContractError> {
        if env.storage().instance().has(&DataKey::Locked) {
            log!(env, "Pool: Guard: pool is already executing a mutating call");
            return Err(ContractError::ReentrantCall);
        }
        env.storage().instance().set(&DataKey::Locked, &true);

        Ok(Self { env: env.clone() })
    }
}

impl Drop for ReentrancyGuard {
    fn drop(&mut self) {
        self.env.storage().instance().remove(&DataKey::Locked);
    }
}
