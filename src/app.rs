use std::{
    io::{BufRead, Write},
    str::FromStr,
};

use crate::{
    common::{config::Config, error::AppError, money::Money},
    domain::{account::validate_pin, ledger::Ledger},
    io::store::FileStore,
};

const MENU: &str = "\n=== Bank Management System ===\n\
1. Create Account\n\
2. Deposit Money\n\
3. Withdraw Money\n\
4. Check Balance\n\
5. Delete Account\n\
6. Exit\n\
Choose an option: ";

/// Opens the ledger named by `config` and runs the menu on stdin/stdout.
pub fn run(config: &Config) -> Result<(), AppError> {
    let mut ledger = Ledger::open(FileStore::new(&config.data_file));

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    let mut session = Session::new(stdin.lock(), stdout.lock());
    session.run(&mut ledger)
}

/// The interactive menu, reading from `input` and writing to `output`.
pub struct Session<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Session<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn into_output(self) -> W {
        self.output
    }

    /// Loops until the user exits or input ends. Bad input and failed
    /// operations are reported and the loop carries on; only console I/O
    /// errors end it early.
    pub fn run(&mut self, ledger: &mut Ledger) -> Result<(), AppError> {
        loop {
            let Some(choice) = self.prompt(MENU)? else {
                writeln!(self.output, "Exiting the system...")?;
                return Ok(());
            };

            let result = match choice.trim() {
                "1" => self.create_account(ledger),
                "2" => self.deposit(ledger),
                "3" => self.withdraw(ledger),
                "4" => self.check_balance(ledger),
                "5" => self.delete_account(ledger),
                "6" => {
                    writeln!(self.output, "Exiting the system...")?;
                    return Ok(());
                }
                _ => {
                    writeln!(self.output, "Invalid option. Try again.")?;
                    Ok(())
                }
            };

            match result {
                Ok(()) => {}
                Err(AppError::Io(e)) => return Err(AppError::Io(e)),
                Err(e) => writeln!(self.output, "Error: {e}")?,
            }
        }
    }

    fn create_account(&mut self, ledger: &mut Ledger) -> Result<(), AppError> {
        let name = self.prompt_required("Enter account holder name: ")?;
        let number = self.prompt_required("Enter account number: ")?;
        let pin = self.prompt_required("Set a 4-digit PIN: ")?;
        if let Err(e) = validate_pin(&pin) {
            writeln!(self.output, "{e}")?;
            return Ok(());
        }

        ledger.create_account(&name, &number, &pin)?;
        writeln!(self.output, "Account created successfully!")?;
        Ok(())
    }

    fn deposit(&mut self, ledger: &mut Ledger) -> Result<(), AppError> {
        let (number, pin) = self.prompt_credentials()?;
        let account = ledger.authenticate(&number, &pin)?;
        let amount = self.prompt_amount("Enter amount to deposit: ")?;
        account.deposit(amount)?;
        let balance = account.balance();
        ledger.persist();
        writeln!(self.output, "Deposit successful. New balance: ${balance}")?;
        Ok(())
    }

    fn withdraw(&mut self, ledger: &mut Ledger) -> Result<(), AppError> {
        let (number, pin) = self.prompt_credentials()?;
        let account = ledger.authenticate(&number, &pin)?;
        let amount = self.prompt_amount("Enter amount to withdraw: ")?;
        account.withdraw(amount)?;
        let balance = account.balance();
        ledger.persist();
        writeln!(
            self.output,
            "Withdrawal successful. Remaining balance: ${balance}"
        )?;
        Ok(())
    }

    fn check_balance(&mut self, ledger: &mut Ledger) -> Result<(), AppError> {
        let (number, pin) = self.prompt_credentials()?;
        let account = ledger.authenticate(&number, &pin)?;
        writeln!(self.output, "Your current balance: ${}", account.balance())?;
        Ok(())
    }

    fn delete_account(&mut self, ledger: &mut Ledger) -> Result<(), AppError> {
        let (number, pin) = self.prompt_credentials()?;
        ledger.delete_account(&number, &pin)?;
        writeln!(self.output, "Account deleted successfully.")?;
        Ok(())
    }

    fn prompt_credentials(&mut self) -> Result<(String, String), AppError> {
        let number = self.prompt_required("Enter account number: ")?;
        let pin = self.prompt_required("Enter PIN: ")?;
        Ok((number, pin))
    }

    fn prompt_amount(&mut self, message: &str) -> Result<Money, AppError> {
        let raw = self.prompt_required(message)?;
        Money::from_str(&raw).map_err(|_| AppError::InvalidInput(format!("Invalid amount: {raw}")))
    }

    /// Like [`Self::prompt`], but treats end of input as bad input.
    fn prompt_required(&mut self, message: &str) -> Result<String, AppError> {
        self.prompt(message)?
            .ok_or_else(|| AppError::InvalidInput("unexpected end of input".into()))
    }

    /// Prints `message` and reads one line without its line ending.
    /// Returns `None` at end of input.
    fn prompt(&mut self, message: &str) -> Result<Option<String>, AppError> {
        write!(self.output, "{message}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let trimmed = line.trim_end_matches(['\r', '\n']);
        Ok(Some(trimmed.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    fn run_script(ledger: &mut Ledger, script: &str) -> String {
        let mut session = Session::new(Cursor::new(script.as_bytes().to_vec()), Vec::new());
        session.run(ledger).unwrap();
        String::from_utf8(session.into_output()).unwrap()
    }

    fn ledger_in(dir: &std::path::Path) -> Ledger {
        Ledger::open(FileStore::new(dir.join("accounts.dat")))
    }

    #[test]
    fn exits_on_option_six() {
        let dir = tempfile::tempdir().unwrap();
        let out = run_script(&mut ledger_in(dir.path()), "6\n");
        assert!(out.contains("=== Bank Management System ==="));
        assert!(out.ends_with("Exiting the system...\n"));
    }

    #[test]
    fn exits_on_end_of_input() {
        let dir = tempfile::tempdir().unwrap();
        let out = run_script(&mut ledger_in(dir.path()), "");
        assert!(out.ends_with("Exiting the system...\n"));
    }

    #[test]
    fn unknown_and_non_numeric_choices_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let out = run_script(&mut ledger_in(dir.path()), "9\nabc\n6\n");
        assert_eq!(out.matches("Invalid option. Try again.").count(), 2);
    }

    #[test]
    fn bad_pin_format_is_reported_and_nothing_created() {
        let dir = tempfile::tempdir().unwrap();
        let mut ledger = ledger_in(dir.path());
        let out = run_script(&mut ledger, "1\nAlice\n1001\n12a4\n6\n");

        assert!(out.contains("Set a 4-digit PIN: PIN must be a 4-digit number.\n"));
        assert!(!out.contains("Error: PIN"));
        assert!(ledger.is_empty());
    }

    #[test]
    fn unparsable_amount_is_reported_and_balance_unchanged() {
        let dir = tempfile::tempdir().unwrap();
        let mut ledger = ledger_in(dir.path());
        ledger.create_account("Alice", "1001", "1234").unwrap();

        let out = run_script(&mut ledger, "2\n1001\n1234\nten\n6\n");

        assert!(out.contains("Error: Invalid amount: ten"));
        assert_eq!(
            ledger.authenticate("1001", "1234").unwrap().balance(),
            Money::zero()
        );
    }

    #[test]
    fn sub_cent_amounts_are_rejected_not_rounded() {
        let dir = tempfile::tempdir().unwrap();
        let mut ledger = ledger_in(dir.path());
        ledger.create_account("Alice", "1001", "1234").unwrap();

        let out = run_script(
            &mut ledger,
            "2\n1001\n1234\n0.006\n2\n1001\n1234\n0.004\n2\n1001\n1234\n0.005\n6\n",
        );

        assert!(out.contains("Error: Invalid amount: 0.006"));
        assert!(out.contains("Error: Invalid amount: 0.004"));
        assert!(out.contains("Error: Invalid amount: 0.005"));
        assert!(!out.contains("Deposit successful"));
        assert_eq!(
            ledger.authenticate("1001", "1234").unwrap().balance(),
            Money::zero()
        );
    }

    #[test]
    fn wrong_pin_stops_before_amount_prompt() {
        let dir = tempfile::tempdir().unwrap();
        let mut ledger = ledger_in(dir.path());
        ledger.create_account("Alice", "1001", "1234").unwrap();

        let out = run_script(&mut ledger, "2\n1001\n0000\n6\n");

        assert!(out.contains("Error: Invalid account number or PIN."));
        assert!(!out.contains("Enter amount to deposit"));
    }

    #[test]
    fn check_balance_shows_two_decimals() {
        let dir = tempfile::tempdir().unwrap();
        let mut ledger = ledger_in(dir.path());
        ledger.create_account("Alice", "1001", "1234").unwrap();

        let out = run_script(&mut ledger, "2\n1001\n1234\n12.5\n4\n1001\n1234\n6\n");

        assert!(out.contains("Deposit successful. New balance: $12.50"));
        assert!(out.contains("Your current balance: $12.50"));
    }
}
