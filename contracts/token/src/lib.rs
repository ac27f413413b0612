#![no_std]

mod admin;
mod allowance;
mod balance;
mod contract;
mod error;
mod metadata;
mod storage_types;
#[cfg(test)]
mod test;

pub use crate::contract::{Token, TokenClient};
pub use crate::error::TokenError;
