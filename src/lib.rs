pub mod cli;
pub mod core;

use crate::cli::convert::QuoteRequest;
use crate::cli::recipient::RecipientInput;
use crate::core::config::AppConfig;
use crate::core::resolver::{AccountNameResolver, MockAccountDirectory};
use anyhow::Result;
use std::sync::Arc;
use tracing::{debug, info};

#[derive(Debug, Clone)]
pub enum AppCommand {
    Currencies,
    Rate {
        from: String,
        to: String,
    },
    Convert {
        amount: String,
        from: String,
        to: String,
    },
    Quote {
        request: QuoteRequest,
        json: bool,
    },
    Send {
        amount: String,
        currency: String,
    },
    Recipient(RecipientInput),
}

pub async fn run_command(command: AppCommand, config_path: Option<&str>) -> Result<()> {
    info!("fxramp starting...");

    let config = match config_path {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load()?,
    };
    debug!("Loaded config: {config:#?}");

    let engine = Arc::new(config.engine()?);

    match command {
        AppCommand::Currencies => cli::convert::run_currencies(&engine),
        AppCommand::Rate { from, to } => cli::convert::run_rate(&engine, &from, &to),
        AppCommand::Convert { amount, from, to } => {
            cli::convert::run_convert(&engine, &amount, &from, &to)
        }
        AppCommand::Quote { request, json } => {
            cli::convert::run_quote(engine, &request, config.default_mode, json)
        }
        AppCommand::Send { amount, currency } => cli::send::run(&amount, &currency),
        AppCommand::Recipient(input) => {
            let resolver = AccountNameResolver::new(
                MockAccountDirectory::new(&config.accounts),
                config.lookup_delay(),
            );
            cli::recipient::run(&input, &resolver).await
        }
    }
}
