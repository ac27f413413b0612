// A lot of this code is taken from the cosmwasm-std crate, which is licensed under the Apache
// License 2.0 - https://github.com/CosmWasm/cosmwasm.

use soroban_sdk::{Env, U256};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    DivideByZero,
}

/// Unsigned fixed-point number with 18 decimal places, stored as atomics in a `U256`.
///
/// A ratio of 3 to 2 is held as `1_500_000_000_000_000_000` atomics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decimal256(U256);

impl Decimal256 {
    const DECIMAL_FRACTIONAL: u128 = 1_000_000_000_000_000_000u128; // 1*10**18

    fn decimal_fractional(env: &Env) -> U256 {
        U256::from_u128(env, Self::DECIMAL_FRACTIONAL)
    }

    /// Atomics as `u128`, `None` when the value does not fit.
    fn atomics(&self) -> Option<u128> {
        self.0.to_u128()
    }

    /// Atomics as `i128`, `None` when the value does not fit.
    pub fn to_i128(&self) -> Option<i128> {
        self.atomics().and_then(|value| i128::try_from(value).ok())
    }

    /// `numerator / denominator` rounded down to 18 decimal places.
    pub fn checked_from_ratio(
        env: &Env,
        numerator: U256,
        denominator: U256,
    ) -> Result<Self, Error> {
        if denominator == U256::from_u128(env, 0) {
            return Err(Error::DivideByZero);
        }

        let ratio = numerator
            .mul(&Self::decimal_fractional(env))
            .div(&denominator);

        Ok(Decimal256(ratio))
    }
}
