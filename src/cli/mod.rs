use clap::{Parser, Subcommand};

use checkout_discounts::config::LoggingConfig;

mod db;
mod discounts;
mod output;
mod policies;

#[derive(Debug, Parser)]
#[command(
    name = "checkout-discounts",
    about = "Storefront discount policy tooling",
    long_about = None
)]
pub(crate) struct Cli {
    #[command(flatten)]
    logging: LoggingConfig,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    Db(db::DbCommand),
    Policies(policies::PoliciesCommand),
    Discounts(discounts::DiscountsCommand),
}

impl Cli {
    pub(crate) fn logging(&self) -> &LoggingConfig {
        &self.logging
    }

    pub(crate) async fn run(self) -> Result<(), String> {
        match self.command {
            Commands::Db(command) => db::run(command).await,
            Commands::Policies(command) => policies::run(command).await,
            Commands::Discounts(command) => discounts::run(command).await,
        }
    }
}
