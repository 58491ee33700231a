use std::collections::HashMap;

use log::{debug, error, info};

use crate::{
    common::error::BankError,
    domain::account::Account,
    io::store::FileStore,
};

/// All accounts, keyed by account number, backed by a [`FileStore`].
///
/// Every change to membership goes through the ledger and is written out
/// right away. Balance changes are made on the `&mut Account` returned by
/// [`Ledger::authenticate`]; the caller then calls [`Ledger::persist`].
#[derive(Debug)]
pub struct Ledger {
    accounts: HashMap<String, Account>,
    store: FileStore,
}

impl Ledger {
    /// Opens the ledger and loads whatever the store holds.
    pub fn open(store: FileStore) -> Self {
        let mut ledger = Self {
            accounts: HashMap::new(),
            store,
        };
        ledger.load();
        ledger
    }

    pub fn accounts(&self) -> &HashMap<String, Account> {
        &self.accounts
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    pub fn contains(&self, account_number: &str) -> bool {
        self.accounts.contains_key(account_number)
    }

    pub fn create_account(
        &mut self,
        holder_name: &str,
        account_number: &str,
        pin: &str,
    ) -> Result<(), BankError> {
        if self.accounts.contains_key(account_number) {
            return Err(BankError::DuplicateAccount);
        }
        self.accounts.insert(
            account_number.to_string(),
            Account::new(account_number, holder_name, pin),
        );
        info!("created account {account_number}");
        self.persist();
        Ok(())
    }

    /// Returns the account if the pin matches. Unknown numbers and wrong pins
    /// fail the same way.
    pub fn authenticate(
        &mut self,
        account_number: &str,
        pin: &str,
    ) -> Result<&mut Account, BankError> {
        match self.accounts.get_mut(account_number) {
            Some(acc) if acc.verify_pin(pin) => Ok(acc),
            _ => {
                debug!("authentication failed");
                Err(BankError::AuthenticationFailed)
            }
        }
    }

    pub fn delete_account(&mut self, account_number: &str, pin: &str) -> Result<(), BankError> {
        self.authenticate(account_number, pin)?;
        self.accounts.remove(account_number);
        info!("deleted account {account_number}");
        self.persist();
        Ok(())
    }

    /// Writes the full ledger out. A failed write is logged; the in-memory
    /// state is kept as is.
    pub fn persist(&self) {
        match self.store.save(&self.accounts) {
            Ok(()) => debug!(
                "saved {} accounts to {}",
                self.accounts.len(),
                self.store.path().display()
            ),
            Err(e) => error!(
                "error saving accounts to {}: {e}",
                self.store.path().display()
            ),
        }
    }

    /// Replaces the in-memory accounts with the stored ones. If the store
    /// cannot be read the ledger starts out empty.
    pub fn load(&mut self) {
        self.accounts = match self.store.load() {
            Ok(accounts) => {
                info!(
                    "loaded {} accounts from {}",
                    accounts.len(),
                    self.store.path().display()
                );
                accounts
            }
            Err(e) => {
                error!(
                    "error loading accounts from {}: {e}",
                    self.store.path().display()
                );
                HashMap::new()
            }
        };
    }
}
