use std::path::PathBuf;

use clap::Parser;

pub const DEFAULT_DATA_FILE: &str = "accounts.dat";

/// Console bank account manager
#[derive(Debug, Clone, Parser)]
#[command(version)]
pub struct Config {
    /// Path of the file the accounts are stored in
    #[arg(long, env = "BANK_DATA_FILE", default_value = DEFAULT_DATA_FILE)]
    pub data_file: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_file: PathBuf::from(DEFAULT_DATA_FILE),
        }
    }
}
