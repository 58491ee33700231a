use std::{collections::HashMap, io::Write};

use crate::{common::error::StoreError, domain::account::Account};

/// First line of every accounts file. The trailing token is the format version.
pub const FORMAT_MARKER: &str = "# bank_ledger accounts ";
pub const FORMAT_VERSION: &str = "v1";

#[derive(serde::Serialize)]
/// One stored account.
///
/// Headers written (in this order): `account_number,holder_name,pin,balance`.
/// The balance is written with 2 decimal places.
struct AccountRow<'a> {
    account_number: &'a str,
    holder_name: &'a str,
    pin: &'a str,
    balance: String,
}

/// Writes every account to `writer` in the versioned CSV layout.
///
/// The output starts with the format line, then a header row. For
/// deterministic output, accounts are sorted by account number.
///
/// # Errors
///
/// Returns a `StoreError` if writing the format line or any row fails.
///
/// # Examples
///
/// ```
/// use std::collections::HashMap;
/// use bank_ledger::domain::account::Account;
/// use bank_ledger::io::writer::write_accounts;
///
/// let mut accounts = HashMap::new();
/// accounts.insert("2".to_string(), Account::new("2", "Bob", "2222"));
/// accounts.insert("1".to_string(), Account::new("1", "Alice", "1111"));
///
/// let mut out = Vec::new();
/// write_accounts(&mut out, &accounts).unwrap();
///
/// let s = String::from_utf8(out).unwrap();
/// assert!(s.starts_with("# bank_ledger accounts v1\naccount_number,holder_name,pin,balance\n"));
/// assert!(s.ends_with("1,Alice,1111,0.00\n2,Bob,2222,0.00\n"));
/// ```
pub fn write_accounts<W: Write>(
    mut writer: W,
    accounts: &HashMap<String, Account>,
) -> Result<(), StoreError> {
    writeln!(writer, "{FORMAT_MARKER}{FORMAT_VERSION}")?;

    let mut wtr = csv::WriterBuilder::new()
        .has_headers(true)
        .from_writer(writer);

    let mut numbers: Vec<&String> = accounts.keys().collect();
    numbers.sort_unstable();

    for number in numbers {
        let acc = &accounts[number];
        wtr.serialize(AccountRow {
            account_number: acc.account_number(),
            holder_name: acc.holder_name(),
            pin: acc.pin(),
            balance: acc.balance().to_string_2dp(),
        })?;
    }

    wtr.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::money::Money;

    // Helper: writes accounts to a Vec<u8> and returns UTF-8 string.
    fn write_to_string(accounts: &HashMap<String, Account>) -> String {
        let mut out = Vec::new();
        write_accounts(&mut out, accounts).unwrap();
        String::from_utf8(out).unwrap()
    }

    fn insert(accounts: &mut HashMap<String, Account>, acc: Account) {
        accounts.insert(acc.account_number().to_string(), acc);
    }

    #[test]
    fn writes_marker_header_and_rows_sorted_by_account_number() {
        let mut accounts = HashMap::new();
        let mut rich = Account::new("2002", "Bob", "0007");
        rich.deposit(Money::from_cents(123_456)).unwrap();
        insert(&mut accounts, rich);
        insert(&mut accounts, Account::new("1001", "Alice", "1234"));

        let s = write_to_string(&accounts);
        let lines: Vec<&str> = s.lines().collect();

        assert_eq!(lines.len(), 4, "expected marker + header + 2 rows");
        assert_eq!(lines[0], "# bank_ledger accounts v1");
        assert_eq!(lines[1], "account_number,holder_name,pin,balance");
        assert_eq!(lines[2], "1001,Alice,1234,0.00");
        assert_eq!(lines[3], "2002,Bob,0007,1234.56");
    }

    #[test]
    fn quotes_holder_names_with_separators() {
        let mut accounts = HashMap::new();
        insert(&mut accounts, Account::new("7", "Doe, \"JD\" Jr", "9999"));

        let s = write_to_string(&accounts);
        let row = s.lines().nth(2).unwrap();
        assert_eq!(row, "7,\"Doe, \"\"JD\"\" Jr\",9999,0.00");
    }

    #[test]
    fn empty_ledger_still_writes_marker() {
        let s = write_to_string(&HashMap::new());
        assert!(s.starts_with("# bank_ledger accounts v1\n"));
    }
}
