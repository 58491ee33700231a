use clap::Parser;

use bank_ledger::{app, common::config::Config};

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let config = Config::parse();

    if let Err(e) = app::run(&config) {
        eprintln!("{e}");
        std::process::exit(1);
    }
}
