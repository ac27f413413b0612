#![no_std]
mod contract;
mod error;
mod math;
mod storage;

pub use contract::{LiquidityPool, LiquidityPoolClient};
pub use error::ContractError;
pub use storage::{
    Asset, Config, LiquidityAddedEvent, LiquidityRemovedEvent, PoolResponse,
    SimulateReverseSwapResponse, SimulateSwapResponse, SwapExecutedEvent,
};
