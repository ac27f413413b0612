use soroban_sdk::{
    contract, contractimpl, contractmeta, log, panic_with_error, token, Address, Env, Symbol, Vec,
};

use crate::{
    error::ContractError,
    math::{self, integer_sqrt, mul_div, to_i128, to_u256},
    storage::{
        get_config, save_config, utils, Asset, Config, LiquidityAddedEvent,
        LiquidityRemovedEvent, PoolResponse, ReentrancyGuard, SimulateReverseSwapResponse,
        SimulateSwapResponse, SwapExecutedEvent,
    },
};
use cpamm::{
    ttl::bump_instance,
    utils::is_deadline_passed,
    validate_int_parameters, validate_non_negative_parameters,
};

// Metadata that is added on to the WASM custom section
contractmeta!(key = "Description", val = "Constant product liquidity pool");

#[contract]
pub struct LiquidityPool;

pub trait LiquidityPoolTrait {
    // Pulls up to `desired_a`/`desired_b` from `sender` (who must have approved the pool as
    // spender) and credits the minted pool shares to `recipient`.
    // On a non-empty pool only the amounts matching the current reserve ratio are taken.
    // Returns the amounts actually deposited and the number of shares minted.
    fn add_liquidity(
        env: Env,
        sender: Address,
        desired_a: i128,
        desired_b: i128,
        min_a: i128,
        min_b: i128,
        recipient: Address,
        deadline: u64,
    ) -> Result<(i128, i128, i128), ContractError>;

    // Burns `share_amount` of the sender's shares and sends the proportional part of both
    // reserves to `recipient`.
    // Returns amount of both tokens withdrawn
    fn remove_liquidity(
        env: Env,
        sender: Address,
        share_amount: i128,
        min_a: i128,
        min_b: i128,
        recipient: Address,
        deadline: u64,
    ) -> Result<(i128, i128), ContractError>;

    // `path` is `[token_in, token_out]`. Sells exactly `amount_in` of `token_in` taken from
    // `sender` and sends the bought `token_out` to `recipient`.
    // Returns the amount of the token being bought.
    fn swap_exact_in(
        env: Env,
        sender: Address,
        amount_in: i128,
        min_amount_out: i128,
        path: Vec<Address>,
        recipient: Address,
        deadline: u64,
    ) -> Result<i128, ContractError>;

    // QUERIES

    // Returns the configuration structure containing the addresses
    fn query_config(env: Env) -> Config;

    fn query_reserves(env: Env) -> (i128, i128);

    fn query_share(env: Env, participant: Address) -> i128;

    fn query_total_shares(env: Env) -> i128;

    // Returns both reserves and the total amount of shares issued
    fn query_pool_info(env: Env) -> PoolResponse;

    // Simulate swap transaction
    fn simulate_swap(
        env: Env,
        offer_asset: Address,
        offer_amount: i128,
    ) -> Result<SimulateSwapResponse, ContractError>;

    // Simulate reverse swap transaction
    fn simulate_reverse_swap(
        env: Env,
        ask_asset: Address,
        ask_amount: i128,
    ) -> Result<SimulateReverseSwapResponse, ContractError>;

    fn quote_output(
        env: Env,
        amount_in: i128,
        reserve_in: i128,
        reserve_out: i128,
    ) -> Result<i128, ContractError>;

    fn quote_input(
        env: Env,
        amount_out: i128,
        reserve_in: i128,
        reserve_out: i128,
    ) -> Result<i128, ContractError>;

    fn quote_price(env: Env, reserve_in: i128, reserve_out: i128) -> Result<i128, ContractError>;
}

#[contractimpl]
impl LiquidityPool {
    pub fn __constructor(env: Env, token_a: Address, token_b: Address) {
        if token_a == token_b {
            log!(&env, "Pool: Initialize: token_a and token_b must differ");
            panic_with_error!(&env, ContractError::IdenticalTokens);
        }

        save_config(&env, &Config { token_a, token_b });
        utils::save_reserves(&env, 0, 0);
        utils::save_total_shares(&env, 0);

        bump_instance(&env);
    }
}

#[contractimpl]
impl LiquidityPoolTrait for LiquidityPool {
    fn add_liquidity(
        env: Env,
        sender: Address,
        desired_a: i128,
        desired_b: i128,
        min_a: i128,
        min_b: i128,
        recipient: Address,
        deadline: u64,
    ) -> Result<(i128, i128, i128), ContractError> {
        // sender needs to authorize the deposit
        sender.require_auth();

        validate_int_parameters!(ContractError::InvalidAmount; desired_a, desired_b);
        validate_non_negative_parameters!(ContractError::InvalidAmount; min_a, min_b);
        if min_a > desired_a || min_b > desired_b {
            log!(
                &env,
                "Pool: AddLiquidity: minimum above desired amount! min_a: {}, desired_a: {}, min_b: {}, desired_b: {}",
                min_a,
                desired_a,
                min_b,
                desired_b
            );
            return Err(ContractError::InvalidAmount);
        }
        check_deadline(&env, deadline)?;

        let _guard = ReentrancyGuard::acquire(&env)?;

        let config = get_config(&env);
        let (reserve_a, reserve_b) = utils::get_reserves(&env);
        let total_shares = utils::get_total_shares(&env);

        let (amount_a, amount_b, shares) = if total_shares == 0 {
            // In case of empty pool, just produce sqrt(X*Y) shares
            let product = to_u256(&env, desired_a)?.mul(&to_u256(&env, desired_b)?);
            let shares = to_i128(&integer_sqrt(&env, &product))?;
            (desired_a, desired_b, shares)
        } else {
            if reserve_a == 0 || reserve_b == 0 {
                log!(
                    &env,
                    "Pool: AddLiquidity: shares outstanding against an empty reserve! reserve_a: {}, reserve_b: {}",
                    reserve_a,
                    reserve_b
                );
                return Err(ContractError::InsufficientLiquidity);
            }

            let optimal_b = math::quote(&env, desired_a, reserve_a, reserve_b)?;
            let (amount_a, amount_b) = if optimal_b <= desired_b {
                (desired_a, optimal_b)
            } else {
                let optimal_a = math::quote(&env, desired_b, reserve_b, reserve_a)?;
                (optimal_a, desired_b)
            };

            let shares_a = mul_div(&env, amount_a, total_shares, reserve_a)?;
            let shares_b = mul_div(&env, amount_b, total_shares, reserve_b)?;
            (amount_a, amount_b, shares_a.min(shares_b))
        };

        if amount_a < min_a || amount_b < min_b {
            log!(
                &env,
                "Pool: AddLiquidity: minimum amount of token_a or token_b is not satisfied! min_a: {}, min_b: {}, amount_a: {}, amount_b: {}",
                min_a,
                min_b,
                amount_a,
                amount_b
            );
            return Err(ContractError::SlippageExceeded);
        }
        if shares == 0 {
            log!(
                &env,
                "Pool: AddLiquidity: deposit too small to mint a share! amount_a: {}, amount_b: {}",
                amount_a,
                amount_b
            );
            return Err(ContractError::InsufficientLiquidity);
        }

        // Move tokens from client's wallet to the contract
        pull_tokens(&env, &config.token_a, &sender, amount_a)?;
        pull_tokens(&env, &config.token_b, &sender, amount_b)?;

        utils::mint_shares(&env, &recipient, shares)?;
        refresh_reserves(&env, &config);

        env.events().publish(
            (Symbol::new(&env, "liquidity_added"), sender.clone()),
            LiquidityAddedEvent {
                provider: sender,
                recipient,
                token_a: config.token_a,
                token_b: config.token_b,
                amount_a,
                amount_b,
                shares,
            },
        );
        bump_instance(&env);

        Ok((amount_a, amount_b, shares))
    }

    fn remove_liquidity(
        env: Env,
        sender: Address,
        share_amount: i128,
        min_a: i128,
        min_b: i128,
        recipient: Address,
        deadline: u64,
    ) -> Result<(i128, i128), ContractError> {
        sender.require_auth();

        validate_int_parameters!(ContractError::InvalidAmount; share_amount);
        validate_non_negative_parameters!(ContractError::InvalidAmount; min_a, min_b);
        check_deadline(&env, deadline)?;

        let _guard = ReentrancyGuard::acquire(&env)?;

        let config = get_config(&env);
        let total_shares = utils::get_total_shares(&env);
        if total_shares == 0 {
            log!(&env, "Pool: RemoveLiquidity: no shares have been issued");
            return Err(ContractError::InsufficientLiquidity);
        }

        let owned = utils::get_shares(&env, &sender);
        if owned < share_amount {
            log!(
                &env,
                "Pool: RemoveLiquidity: not enough shares! owned: {}, share_amount: {}",
                owned,
                share_amount
            );
            return Err(ContractError::InsufficientShares);
        }

        let (reserve_a, reserve_b) = utils::get_reserves(&env);
        let return_amount_a = mul_div(&env, share_amount, reserve_a, total_shares)?;
        let return_amount_b = mul_div(&env, share_amount, reserve_b, total_shares)?;

        if return_amount_a < min_a || return_amount_b < min_b {
            log!(
                &env,
                "Pool: RemoveLiquidity: minimum amount of token_a or token_b is not satisfied! min_a: {}, min_b: {}, return_amount_a: {}, return_amount_b: {}",
                min_a,
                min_b,
                return_amount_a,
                return_amount_b
            );
            return Err(ContractError::SlippageExceeded);
        }

        // burn shares
        utils::burn_shares(&env, &sender, share_amount)?;
        push_tokens(&env, &config.token_a, &recipient, return_amount_a)?;
        push_tokens(&env, &config.token_b, &recipient, return_amount_b)?;

        refresh_reserves(&env, &config);

        env.events().publish(
            (Symbol::new(&env, "liquidity_removed"), sender.clone()),
            LiquidityRemovedEvent {
                provider: sender,
                recipient,
                amount_a: return_amount_a,
                amount_b: return_amount_b,
                shares: share_amount,
            },
        );
        bump_instance(&env);

        Ok((return_amount_a, return_amount_b))
    }

    fn swap_exact_in(
        env: Env,
        sender: Address,
        amount_in: i128,
        min_amount_out: i128,
        path: Vec<Address>,
        recipient: Address,
        deadline: u64,
    ) -> Result<i128, ContractError> {
        sender.require_auth();

        validate_int_parameters!(ContractError::InvalidAmount; amount_in);
        validate_non_negative_parameters!(ContractError::InvalidAmount; min_amount_out);
        check_deadline(&env, deadline)?;

        let config = get_config(&env);
        let (token_in, token_out) = validate_path(&env, &config, &path)?;

        let _guard = ReentrancyGuard::acquire(&env)?;

        let (reserve_in, reserve_out) = reserves_for_offer(&env, &config, &token_in)?;
        let amount_out = math::quote_output(&env, amount_in, reserve_in, reserve_out)?;

        if amount_out == 0 {
            log!(
                &env,
                "Pool: Swap: amount_in too small to buy anything! amount_in: {}",
                amount_in
            );
            return Err(ContractError::InsufficientLiquidity);
        }
        if amount_out < min_amount_out {
            log!(
                &env,
                "Pool: Swap: min_amount_out bigger than return! min_amount_out: {}, amount_out: {}",
                min_amount_out,
                amount_out
            );
            return Err(ContractError::SlippageExceeded);
        }

        // Transfer the amount being sold to the contract, then pay out
        pull_tokens(&env, &token_in, &sender, amount_in)?;
        push_tokens(&env, &token_out, &recipient, amount_out)?;

        refresh_reserves(&env, &config);

        env.events().publish(
            (Symbol::new(&env, "swap_executed"), sender.clone()),
            SwapExecutedEvent {
                sender,
                token_in,
                token_out,
                amount_in,
                amount_out,
                recipient,
            },
        );
        bump_instance(&env);

        Ok(amount_out)
    }

    // Queries

    fn query_config(env: Env) -> Config {
        get_config(&env)
    }

    fn query_reserves(env: Env) -> (i128, i128) {
        utils::get_reserves(&env)
    }

    fn query_share(env: Env, participant: Address) -> i128 {
        utils::get_shares(&env, &participant)
    }

    fn query_total_shares(env: Env) -> i128 {
        utils::get_total_shares(&env)
    }

    fn query_pool_info(env: Env) -> PoolResponse {
        let config = get_config(&env);
        let (reserve_a, reserve_b) = utils::get_reserves(&env);

        PoolResponse {
            asset_a: Asset {
                address: config.token_a,
                amount: reserve_a,
            },
            asset_b: Asset {
                address: config.token_b,
                amount: reserve_b,
            },
            total_shares: utils::get_total_shares(&env),
        }
    }

    fn simulate_swap(
        env: Env,
        offer_asset: Address,
        offer_amount: i128,
    ) -> Result<SimulateSwapResponse, ContractError> {
        let config = get_config(&env);
        let (reserve_in, reserve_out) = reserves_for_offer(&env, &config, &offer_asset)?;

        let ask_amount = math::quote_output(&env, offer_amount, reserve_in, reserve_out)?;
        let spot_price = math::quote_price(&env, reserve_in, reserve_out)?;
        let spread_amount = mul_div(&env, offer_amount, reserve_out, reserve_in)? - ask_amount;

        Ok(SimulateSwapResponse {
            ask_amount,
            spread_amount,
            spot_price,
        })
    }

    fn simulate_reverse_swap(
        env: Env,
        ask_asset: Address,
        ask_amount: i128,
    ) -> Result<SimulateReverseSwapResponse, ContractError> {
        let config = get_config(&env);
        let offer_asset = if ask_asset == config.token_a {
            config.token_b.clone()
        } else if ask_asset == config.token_b {
            config.token_a.clone()
        } else {
            log!(
                &env,
                "Pool: SimulateReverseSwap: asset not in pool! asset: {}",
                ask_asset
            );
            return Err(ContractError::InvalidPath);
        };
        let (reserve_in, reserve_out) = reserves_for_offer(&env, &config, &offer_asset)?;

        let offer_amount = math::quote_input(&env, ask_amount, reserve_in, reserve_out)?;
        let spread_amount = offer_amount - mul_div(&env, ask_amount, reserve_in, reserve_out)?;

        Ok(SimulateReverseSwapResponse {
            offer_amount,
            spread_amount,
        })
    }

    fn quote_output(
        env: Env,
        amount_in: i128,
        reserve_in: i128,
        reserve_out: i128,
    ) -> Result<i128, ContractError> {
        math::quote_output(&env, amount_in, reserve_in, reserve_out)
    }

    fn quote_input(
        env: Env,
        amount_out: i128,
        reserve_in: i128,
        reserve_out: i128,
    ) -> Result<i128, ContractError> {
        math::quote_input(&env, amount_out, reserve_in, reserve_out)
    }

    fn quote_price(env: Env, reserve_in: i128, reserve_out: i128) -> Result<i128, ContractError> {
        math::quote_price(&env, reserve_in, reserve_out)
    }
}

fn check_deadline(env: &Env, deadline: u64) -> Result<(), ContractError> {
    if is_deadline_passed(env, deadline) {
        log!(
            env,
            "Pool: Deadline: transaction submitted after deadline! timestamp: {}, deadline: {}",
            env.ledger().timestamp(),
            deadline
        );
        return Err(ContractError::DeadlineExpired);
    }
    Ok(())
}

/// A swap path names exactly the two pool tokens, in trade direction.
fn validate_path(
    env: &Env,
    config: &Config,
    path: &Vec<Address>,
) -> Result<(Address, Address), ContractError> {
    let is_pool_token = |token: &Address| *token == config.token_a || *token == config.token_b;

    match (path.len(), path.get(0), path.get(1)) {
        (2, Some(token_in), Some(token_out))
            if token_in != token_out && is_pool_token(&token_in) && is_pool_token(&token_out) =>
        {
            Ok((token_in, token_out))
        }
        _ => {
            log!(
                env,
                "Pool: Swap: path must be [token_in, token_out] of this pool! path: {}",
                path.clone()
            );
            Err(ContractError::InvalidPath)
        }
    }
}

/// Cached reserves ordered as (offered side, asked side).
fn reserves_for_offer(
    env: &Env,
    config: &Config,
    offer_asset: &Address,
) -> Result<(i128, i128), ContractError> {
    let (reserve_a, reserve_b) = utils::get_reserves(env);
    if *offer_asset == config.token_a {
        Ok((reserve_a, reserve_b))
    } else if *offer_asset == config.token_b {
        Ok((reserve_b, reserve_a))
    } else {
        log!(env, "Pool: Swap: asset not in pool! asset: {}", offer_asset.clone());
        Err(ContractError::InvalidPath)
    }
}

fn pull_tokens(
    env: &Env,
    token: &Address,
    from: &Address,
    amount: i128,
) -> Result<(), ContractError> {
    let pool = env.current_contract_address();
    match token::Client::new(env, token).try_transfer_from(&pool, from, &pool, &amount) {
        Ok(Ok(())) => Ok(()),
        _ => {
            log!(
                env,
                "Pool: Transfer: token refused transfer_from! token: {}, from: {}, amount: {}",
                token.clone(),
                from.clone(),
                amount
            );
            Err(ContractError::TransferFailed)
        }
    }
}

fn push_tokens(
    env: &Env,
    token: &Address,
    to: &Address,
    amount: i128,
) -> Result<(), ContractError> {
    if amount == 0 {
        return Ok(());
    }

    let pool = env.current_contract_address();
    match token::Client::new(env, token).try_transfer(&pool, to, &amount) {
        Ok(Ok(())) => Ok(()),
        _ => {
            log!(
                env,
                "Pool: Transfer: token refused transfer! token: {}, to: {}, amount: {}",
                token.clone(),
                to.clone(),
                amount
            );
            Err(ContractError::TransferFailed)
        }
    }
}

/// Re-reads the pool's real token balances into the cached reserves.
fn refresh_reserves(env: &Env, config: &Config) {
    let pool = env.current_contract_address();
    let balance_a = token::Client::new(env, &config.token_a).balance(&pool);
    let balance_b = token::Client::new(env, &config.token_b).balance(&pool);
    utils::save_reserves(env, balance_a, balance_b);
}
