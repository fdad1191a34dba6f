use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use fxramp::cli::convert::QuoteRequest;
use fxramp::cli::recipient::RecipientInput;
use fxramp::core::Mode;
use fxramp::core::log::init_logging;

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to optional configuration file
    #[arg(short, long, global = true)]
    config_path: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

impl From<Commands> for fxramp::AppCommand {
    fn from(cmd: Commands) -> fxramp::AppCommand {
        match cmd {
            Commands::Currencies => fxramp::AppCommand::Currencies,
            Commands::Rate { from, to } => fxramp::AppCommand::Rate { from, to },
            Commands::Convert { amount, from, to } => {
                fxramp::AppCommand::Convert { amount, from, to }
            }
            Commands::Quote {
                mode,
                from,
                to,
                pay,
                receive,
                json,
            } => fxramp::AppCommand::Quote {
                request: QuoteRequest {
                    mode,
                    from,
                    to,
                    pay,
                    receive,
                },
                json,
            },
            Commands::Send { amount, currency } => fxramp::AppCommand::Send { amount, currency },
            Commands::Recipient {
                bank,
                account,
                phone,
                email,
            } => fxramp::AppCommand::Recipient(RecipientInput {
                bank,
                account_number: account,
                phone,
                email,
            }),
            Commands::Setup => unreachable!("Setup command should be handled separately"),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Create default configuration
    Setup,
    /// List supported currencies and their rates to the anchor
    Currencies,
    /// Show the exchange rate between two currencies
    Rate { from: String, to: String },
    /// Convert an amount between two currencies
    Convert {
        amount: String,
        from: String,
        to: String,
    },
    /// Fill the converter form and show both amounts
    Quote {
        /// crypto-to-cash, cash-to-crypto or crypto-loan
        #[arg(short, long)]
        mode: Option<Mode>,
        /// Currency paid with
        #[arg(long)]
        from: Option<String>,
        /// Currency received
        #[arg(long)]
        to: Option<String>,
        /// Amount typed into the pay field
        #[arg(long, conflicts_with = "receive")]
        pay: Option<String>,
        /// Amount typed into the receive field
        #[arg(long)]
        receive: Option<String>,
        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show the send confirmation breakdown
    Send {
        amount: String,
        #[arg(long, default_value = "eth")]
        currency: String,
    },
    /// Enter and validate recipient bank details
    Recipient {
        #[arg(long)]
        bank: String,
        #[arg(long)]
        account: String,
        #[arg(long)]
        phone: String,
        #[arg(long)]
        email: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let result = match cli.command {
        Some(Commands::Setup) => fxramp::cli::setup::setup(),
        Some(cmd) => fxramp::run_command(cmd.into(), cli.config_path.as_deref()).await,
        None => {
            Cli::command().print_help()?;
            Ok(())
        }
    };

    if let Err(e) = &result {
        tracing::error!(error = %e, "Application failed");
    }
    result
}
