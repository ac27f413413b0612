use soroban_sdk::{log, Env, U256};

use decimal::Decimal256;

use crate::error::ContractError;

/// 0.3% fee, applied to the input side of every swap.
const FEE_NUMERATOR: u128 = 997;
const FEE_DENOMINATOR: u128 = 1_000;

pub fn to_u256(env: &Env, value: i128) -> Result<U256, ContractError> {
    u128::try_from(value)
        .map(|value| U256::from_u128(env, value))
        .map_err(|_| ContractError::InvalidAmount)
}

pub fn to_i128(value: &U256) -> Result<i128, ContractError> {
    value
        .to_u128()
        .and_then(|value| i128::try_from(value).ok())
        .ok_or(ContractError::ArithmeticOverflow)
}

/// `a * b / denominator` rounded down, with a 256-bit intermediate product.
/// Every denominator in the pool is a reserve or the share supply, so a zero
/// denominator means there is no liquidity to price against.
pub fn mul_div(env: &Env, a: i128, b: i128, denominator: i128) -> Result<i128, ContractError> {
    if denominator <= 0 {
        return Err(ContractError::InsufficientLiquidity);
    }
    let product = to_u256(env, a)?.mul(&to_u256(env, b)?);
    to_i128(&product.div(&to_u256(env, denominator)?))
}

pub fn quote_output(
    env: &Env,
    amount_in: i128,
    reserve_in: i128,
    reserve_out: i128,
) -> Result<i128, ContractError> {
    if amount_in <= 0 {
        log!(
            env,
            "Pool: QuoteOutput: amount_in must be positive! amount_in: {}",
            amount_in
        );
        return Err(ContractError::InvalidAmount);
    }
    if reserve_in <= 0 || reserve_out <= 0 {
        log!(
            env,
            "Pool: QuoteOutput: pool has no liquidity! reserve_in: {}, reserve_out: {}",
            reserve_in,
            reserve_out
        );
        return Err(ContractError::InsufficientLiquidity);
    }

    let amount_in_with_fee = to_u256(env, amount_in)?.mul(&U256::from_u128(env, FEE_NUMERATOR));
    let numerator = amount_in_with_fee.mul(&to_u256(env, reserve_out)?);
    let denominator = to_u256(env, reserve_in)?
        .mul(&U256::from_u128(env, FEE_DENOMINATOR))
        .add(&amount_in_with_fee);

    to_i128(&numerator.div(&denominator))
}

/// Least input that makes [`quote_output`] return at least `amount_out`.
pub fn quote_input(
    env: &Env,
    amount_out: i128,
    reserve_in: i128,
    reserve_out: i128,
) -> Result<i128, ContractError> {
    if amount_out <= 0 {
        log!(
            env,
            "Pool: QuoteInput: amount_out must be positive! amount_out: {}",
            amount_out
        );
        return Err(ContractError::InvalidAmount);
    }
    if reserve_in <= 0 || reserve_out <= 0 || amount_out >= reserve_out {
        log!(
            env,
            "Pool: QuoteInput: not enough liquidity! amount_out: {}, reserve_in: {}, reserve_out: {}",
            amount_out,
            reserve_in,
            reserve_out
        );
        return Err(ContractError::InsufficientLiquidity);
    }

    let numerator = to_u256(env, reserve_in)?
        .mul(&to_u256(env, amount_out)?)
        .mul(&U256::from_u128(env, FEE_DENOMINATOR));
    let denominator =
        to_u256(env, reserve_out - amount_out)?.mul(&U256::from_u128(env, FEE_NUMERATOR));

    // ceil(numerator / denominator)
    let one = U256::from_u128(env, 1);
    let amount_in = numerator.add(&denominator).sub(&one).div(&denominator);
    to_i128(&amount_in)
}

/// Units of the out token per unit of the in token, scaled by 10^18.
pub fn quote_price(env: &Env, reserve_in: i128, reserve_out: i128) -> Result<i128, ContractError> {
    if reserve_in <= 0 || reserve_out < 0 {
        log!(
            env,
            "Pool: QuotePrice: no price without liquidity! reserve_in: {}, reserve_out: {}",
            reserve_in,
            reserve_out
        );
        return Err(ContractError::InsufficientLiquidity);
    }

    let price = Decimal256::checked_from_ratio(
        env,
        to_u256(env, reserve_out)?,
        to_u256(env, reserve_in)?,
    )
    .map_err(|_| ContractError::InsufficientLiquidity)?;

    price.to_i128().ok_or(ContractError::ArithmeticOverflow)
}

/// Amount of the other token that keeps the current reserve ratio.
pub fn quote(
    env: &Env,
    amount_a: i128,
    reserve_a: i128,
    reserve_b: i128,
) -> Result<i128, ContractError> {
    mul_div(env, amount_a, reserve_b, reserve_a)
}

/// Largest `r` with `r * r <= value`, by Babylonian iteration.
pub fn integer_sqrt(env: &Env, value: &U256) -> U256 {
    let zero = U256::from_u128(env, 0);
    let one = U256::from_u128(env, 1);
    let two = U256::from_u128(env, 2);

    if *value == zero {
        return zero;
    }
    if *value <= U256::from_u128(env, 3) {
        return one;
    }

    let mut root = value.clone();
    let mut next = value.div(&two).add(&one);
    while next < root {
        root = next.clone();
        next = value.div(&next).add(&next).div(&two);
    }
    root
}
