use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::config::ConfigOverrides;
use crate::models::{PayoutProvider, PayoutRequest, TransactionStatus, TransactionType, TransactionsParams};

#[derive(Parser)]
#[command(name = "wallet")]
#[command(about = "Wallet balances, history and payouts from the command line", long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub connection: ConnectionArgs,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Args, Debug, Clone)]
pub struct ConnectionArgs {
    #[arg(long, global = true, help = "Path to the configuration file", default_value = "data/config.toml")]
    pub config: PathBuf,
    #[arg(short = 'u', long, global = true, help = "Override the base URL of the wallet API")]
    pub base_url: Option<String>,
    #[arg(
        long,
        global = true,
        value_parser = clap::value_parser!(u64).range(1..),
        help = "Override the request deadline in milliseconds"
    )]
    pub timeout_ms: Option<u64>,
    #[arg(long, global = true, help = "Override the path of the credentials file")]
    pub credentials_file: Option<PathBuf>,
}

impl ConnectionArgs {
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            base_url: self.base_url.clone(),
            timeout_ms: self.timeout_ms,
            credentials_path: self.credentials_file.clone(),
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Sign in and store the session tokens
    Login {
        #[arg(short, long, help = "Account email")]
        email: String,
        #[arg(short, long, help = "Account password")]
        password: String,
    },
    /// Forget the stored session
    Logout,
    /// Show whether a session is stored
    Status,
    /// Show the balance of every wallet
    Balances,
    /// List transactions
    Transactions(TransactionFilterArgs),
    /// Request a payout from a wallet
    Payout(PayoutArgs),
}

#[derive(Args, Debug, Clone, Default)]
pub struct TransactionFilterArgs {
    #[arg(long, help = "Page number, starting at 1")]
    pub page: Option<u32>,
    #[arg(long, help = "Items per page")]
    pub per_page: Option<u32>,
    #[arg(short, long, help = "Only transactions of this wallet")]
    pub wallet_id: Option<u64>,
    #[arg(short = 't', long = "type", help = "top-up or withdrawal")]
    pub kind: Option<TransactionType>,
    #[arg(short, long, help = "pending, completed or failed")]
    pub status: Option<TransactionStatus>,
    #[arg(long, help = "Earliest date (YYYY-MM-DD)")]
    pub date_from: Option<String>,
    #[arg(long, help = "Latest date (YYYY-MM-DD)")]
    pub date_to: Option<String>,
    #[arg(long, help = "Free text search")]
    pub search: Option<String>,
    #[arg(long, help = "Keep fetching until the last page")]
    pub all: bool,
}

impl From<&TransactionFilterArgs> for TransactionsParams {
    fn from(args: &TransactionFilterArgs) -> Self {
        TransactionsParams {
            page: args.page,
            per_page: args.per_page,
            wallet_id: args.wallet_id,
            kind: args.kind,
            status: args.status,
            date_from: args.date_from.clone(),
            date_to: args.date_to.clone(),
            search: args.search.clone(),
        }
    }
}

#[derive(Args, Debug, Clone)]
pub struct PayoutArgs {
    #[arg(short, long, help = "Wallet to pay out from")]
    pub wallet_id: u64,
    #[arg(short, long, help = "bank or card")]
    pub provider: PayoutProvider,
    #[arg(short, long, help = "Amount to pay out")]
    pub amount: f64,
    #[arg(short, long, help = "Currency of the amount")]
    pub currency_id: u32,
    #[arg(short, long, help = "Destination bank, required by the bank provider")]
    pub bank_id: Option<u64>,
}

impl From<&PayoutArgs> for PayoutRequest {
    fn from(args: &PayoutArgs) -> Self {
        PayoutRequest {
            wallet_id: args.wallet_id,
            provider: args.provider,
            amount: args.amount,
            currency_id: args.currency_id,
            bank_id: args.bank_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_transaction_filters_parse() {
        let cli = Cli::parse_from([
            "wallet",
            "transactions",
            "--type",
            "top-up",
            "--status",
            "completed",
            "--per-page",
            "15",
            "--base-url",
            "http://10.0.2.2:3000",
        ]);

        assert_eq!(cli.connection.base_url.as_deref(), Some("http://10.0.2.2:3000"));
        let Commands::Transactions(args) = cli.command else {
            panic!("expected transactions command");
        };
        let params = TransactionsParams::from(&args);
        assert_eq!(params.kind, Some(TransactionType::TopUp));
        assert_eq!(params.status, Some(TransactionStatus::Completed));
        assert_eq!(params.per_page, Some(15));
        assert_eq!(params.page, None);
    }

    #[test]
    fn test_payout_rejects_unknown_provider() {
        let result = Cli::try_parse_from([
            "wallet", "payout", "-w", "1", "-p", "crypto", "-a", "10", "-c", "1",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_zero_timeout_flag_is_rejected() {
        assert!(Cli::try_parse_from(["wallet", "balances", "--timeout-ms", "0"]).is_err());

        let cli = Cli::parse_from(["wallet", "balances", "--timeout-ms", "2500"]);
        assert_eq!(cli.connection.timeout_ms, Some(2500));
    }
}
