//! Checkout Discounts CLI

use std::process;

use clap::Parser;

use checkout_discounts::{config, observability};

use crate::cli::Cli;

mod cli;

#[tokio::main]
pub async fn main() {
    config::load_dotenv();

    let cli = Cli::parse();

    if let Err(error) = observability::init(cli.logging()) {
        #[expect(
            clippy::print_stderr,
            reason = "logging failed to initialise, must use eprintln"
        )]
        {
            eprintln!("{error}");
        }

        process::exit(1);
    }

    if let Err(error) = cli.run().await {
        #[expect(clippy::print_stderr, reason = "command errors are reported on stderr")]
        {
            eprintln!("{error}");
        }

        process::exit(1);
    }
}
