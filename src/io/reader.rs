use std::{collections::HashMap, io::BufRead, str::FromStr};

use crate::{
    common::{error::StoreError, money::Money},
    domain::account::Account,
    io::writer::{FORMAT_MARKER, FORMAT_VERSION},
};

#[derive(serde::Deserialize)]
/// Internal CSV row representation matching the stored headers.
struct AccountRow {
    account_number: String,
    holder_name: String,
    pin: String,
    balance: String,
}

/// Reads accounts written by [`write_accounts`](crate::io::writer::write_accounts).
///
/// The first line must be the format marker with a known version. Every row
/// must carry a non-negative balance and a unique account number; anything
/// else is reported as corrupt rather than partially loaded.
///
/// # Examples
///
/// ```
/// use bank_ledger::io::reader::read_accounts;
///
/// let data = "# bank_ledger accounts v1\n\
/// account_number,holder_name,pin,balance\n\
/// 1001,Alice,1234,70.00\n";
/// let accounts = read_accounts(data.as_bytes()).unwrap();
///
/// assert_eq!(accounts["1001"].holder_name(), "Alice");
/// assert_eq!(accounts["1001"].balance().as_cents(), 7000);
/// ```
pub fn read_accounts<R: BufRead>(mut rdr: R) -> Result<HashMap<String, Account>, StoreError> {
    let mut first = String::new();
    rdr.read_line(&mut first)?;
    let version = first
        .trim_end()
        .strip_prefix(FORMAT_MARKER)
        .ok_or_else(|| StoreError::UnsupportedFormat("missing format line".into()))?;
    if version != FORMAT_VERSION {
        return Err(StoreError::UnsupportedFormat(format!(
            "unknown version {version}"
        )));
    }

    let mut csv_rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::Headers)
        .from_reader(rdr);

    let mut accounts = HashMap::new();
    for row in csv_rdr.deserialize::<AccountRow>() {
        let row = row?;
        let balance = Money::from_str(&row.balance).map_err(|e| {
            StoreError::Corrupt(format!(
                "bad balance {:?} for account {}: {e}",
                row.balance, row.account_number
            ))
        })?;
        if balance < Money::zero() {
            return Err(StoreError::Corrupt(format!(
                "negative balance for account {}",
                row.account_number
            )));
        }
        if accounts.contains_key(&row.account_number) {
            return Err(StoreError::Corrupt(format!(
                "duplicate account {}",
                row.account_number
            )));
        }
        let account = Account::restore(row.account_number.clone(), row.holder_name, row.pin, balance);
        accounts.insert(row.account_number, account);
    }

    Ok(accounts)
}
