use soroban_sdk::contracterror;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum ContractError {
    DeadlineExpired = 1,
    InvalidAmount = 2,
    SlippageExceeded = 3,
    InsufficientLiquidity = 4,
    InsufficientShares = 5,
    TransferFailed = 6,
    InvalidPath = 7,
    IdenticalTokens = 8,
    ReentrantCall = 9,
    ArithmeticOverflow = 10,
}
