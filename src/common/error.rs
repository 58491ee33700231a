/// Failures of ledger and account operations. These are shown to the user as-is.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum BankError {
    #[error("Amount must be greater than zero.")]
    InvalidAmount,
    #[error("Insufficient balance or invalid amount.")]
    InsufficientFundsOrInvalidAmount,
    #[error("Account number already exists.")]
    DuplicateAccount,
    // Covers both an unknown account number and a wrong pin.
    #[error("Invalid account number or PIN.")]
    AuthenticationFailed,
    #[error("PIN must be a 4-digit number.")]
    InvalidPinFormat,
}

/// Failures reading or writing the accounts file.
#[derive(thiserror::Error, Debug)]
pub enum StoreError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("unsupported accounts file format: {0}")]
    UnsupportedFormat(String),
    #[error("corrupt accounts file: {0}")]
    Corrupt(String),
}

#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Bank(#[from] BankError),
    #[error("{0}")]
    InvalidInput(String),
    #[error("console io error: {0}")]
    Io(#[from] std::io::Error),
}
