use crate::common::{error::BankError, money::Money};

const PIN_LEN: usize = 4;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    account_number: String,
    /// Display only.
    holder_name: String,
    /// Stored and compared in plain text.
    pin: String,
    /// Never negative.
    balance: Money,
}

impl Account {
    /// Opens an account with a zero balance. The pin is expected to have
    /// passed [`validate_pin`] already.
    pub fn new(
        account_number: impl Into<String>,
        holder_name: impl Into<String>,
        pin: impl Into<String>,
    ) -> Self {
        Self {
            account_number: account_number.into(),
            holder_name: holder_name.into(),
            pin: pin.into(),
            balance: Money::zero(),
        }
    }

    /// Rebuilds a stored account. Callers must reject negative balances.
    pub(crate) fn restore(
        account_number: String,
        holder_name: String,
        pin: String,
        balance: Money,
    ) -> Self {
        debug_assert!(balance >= Money::zero());
        Self {
            account_number,
            holder_name,
            pin,
            balance,
        }
    }

    pub fn account_number(&self) -> &str {
        &self.account_number
    }

    pub fn holder_name(&self) -> &str {
        &self.holder_name
    }

    pub fn balance(&self) -> Money {
        self.balance
    }

    pub(crate) fn pin(&self) -> &str {
        &self.pin
    }

    pub fn verify_pin(&self, input: &str) -> bool {
        self.pin == input
    }

    pub fn deposit(&mut self, amount: Money) -> Result<(), BankError> {
        if !amount.is_positive() {
            return Err(BankError::InvalidAmount);
        }
        self.balance = self
            .balance
            .checked_add(amount)
            .ok_or(BankError::InvalidAmount)?;
        Ok(())
    }

    pub fn withdraw(&mut self, amount: Money) -> Result<(), BankError> {
        if !amount.is_positive() || amount > self.balance {
            return Err(BankError::InsufficientFundsOrInvalidAmount);
        }
        self.balance = self
            .balance
            .checked_sub(amount)
            .ok_or(BankError::InsufficientFundsOrInvalidAmount)?;
        Ok(())
    }
}

/// Checks that a pin is exactly four ASCII digits.
pub fn validate_pin(pin: &str) -> Result<(), BankError> {
    if pin.len() == PIN_LEN && pin.bytes().all(|b| b.is_ascii_digit()) {
        Ok(())
    } else {
        Err(BankError::InvalidPinFormat)
    }
}
