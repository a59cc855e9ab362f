use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use log::{error, info};
use url::Url;

use wallet_client::cli::{Cli, Commands, PayoutArgs, TransactionFilterArgs};
use wallet_client::config::{AppConfig, load_configuration};
use wallet_client::credentials::FileSecureStore;
use wallet_client::http::ApiClient;
use wallet_client::log::init_logging;
use wallet_client::models::{LoginRequest, PayoutRequest, TransactionsParams, currency};
use wallet_client::presentation::{error_message, format_amount, format_date_with_time, status_text};
use wallet_client::services::retry::{default_policy, with_retry};
use wallet_client::services::{AuthService, PayoutsService, TransactionsService, WalletService, next_page};

#[tokio::main]
async fn main() -> ExitCode {
    if let Err(e) = init_logging() {
        eprintln!("Logging disabled: {e:#}");
    }
    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error:% = format!("{e:#}"); "Command failed");
            eprintln!("{}", error_message(&e));
            ExitCode::FAILURE
        },
    }
}

async fn run(cli: Cli) -> Result<(), anyhow::Error> {
    let mut config = load_configuration(&cli.connection.config)?;
    config.apply_overrides(&cli.connection.overrides());
    config.validate()?;

    let client = Arc::new(build_client(&config)?);
    info!(base_url:% = client.base_url(), timeout_ms = config.api.timeout_ms; "Wallet client ready");

    match cli.command {
        Commands::Login { email, password } => {
            let auth = AuthService::new(client);
            let response = auth.login(&LoginRequest { email, password }).await?;
            println!("Logged in. Session valid until {}", response.auth.access_token_expire);
            if response.tfa.enabled {
                println!(
                    "Two-factor authentication is enabled ({})",
                    response.tfa.kind.as_deref().unwrap_or("unknown method")
                );
            }
        },
        Commands::Logout => {
            AuthService::new(client).logout().await;
            println!("Logged out");
        },
        Commands::Status => {
            if AuthService::new(client).is_authenticated().await {
                println!("Signed in");
            } else {
                println!("Not signed in");
            }
        },
        Commands::Balances => show_balances(client, &config).await?,
        Commands::Transactions(args) => show_transactions(client, &config, &args).await?,
        Commands::Payout(args) => request_payout(client, &args).await?,
    }

    Ok(())
}

fn build_client(config: &AppConfig) -> Result<ApiClient, anyhow::Error> {
    let base_url = Url::parse(&config.api.base_url)
        .with_context(|| format!("Invalid base URL '{}'", config.api.base_url))?;
    let store = Arc::new(FileSecureStore::new(&config.credentials.path));

    Ok(ApiClient::with_timeout(base_url, store, config.api.timeout())?)
}

async fn show_balances(client: Arc<ApiClient>, config: &AppConfig) -> Result<(), anyhow::Error> {
    let service = WalletService::new(client);
    let policy = default_policy(config.retry.max_retries);
    let response = with_retry(&policy, || service.get_balances()).await?;

    if response.data.is_empty() {
        println!("No wallets");
        return Ok(());
    }

    for wallet in response.data {
        let code = currency(wallet.currency_id).map_or("???", |c| c.code);
        println!(
            "#{:<6} {:<4} available {:>14}  current {:>14}  reserved {:>14}  ref {}",
            wallet.id,
            code,
            wallet.available_balance,
            wallet.current_balance,
            wallet.reserved_balance,
            wallet.reference_number
        );
    }
    Ok(())
}

async fn show_transactions(
    client: Arc<ApiClient>,
    config: &AppConfig,
    args: &TransactionFilterArgs,
) -> Result<(), anyhow::Error> {
    let service = TransactionsService::new(client);
    let policy = default_policy(config.retry.max_retries);
    let mut params = TransactionsParams::from(args);

    loop {
        let response = with_retry(&policy, || service.get_transactions(Some(&params))).await?;

        for tx in &response.data.items {
            println!(
                "{}  {:>16}  {:<9}  {}",
                format_date_with_time(&tx.created_at),
                format_amount(tx.amount, tx.currency_id, tx.kind),
                status_text(tx.status),
                tx.reason
            );
        }
        println!(
            "Page {}/{} ({} transactions)",
            response.data.current_page, response.data.last_page, response.data.total
        );

        match next_page(&params, &response) {
            Some(next) if args.all => params = next,
            _ => break,
        }
    }
    Ok(())
}

async fn request_payout(client: Arc<ApiClient>, args: &PayoutArgs) -> Result<(), anyhow::Error> {
    let service = PayoutsService::new(client);
    let response = service.create_payout(&PayoutRequest::from(args)).await?;

    let code = currency(response.data.currency_id).map_or("???", |c| c.code);
    println!(
        "Payout #{} {} for {:.2} {} via {}",
        response.data.id, response.data.status, response.data.amount, code, response.data.provider
    );
    Ok(())
}
