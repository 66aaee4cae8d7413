//! Claimbot - multi-account task automation for the Param Gaming platform.
//!
//! Invoked with no arguments it discovers accounts from the environment and
//! runs the full clear + claim batch; subcommands expose the same run with
//! explicit options plus an inspection view of the discovered accounts.

use clap::{Parser, Subcommand};
use colored::Colorize;

use claimbot::accounts;
use claimbot::api::ApiClient;
use claimbot::batch;

#[derive(Parser)]
#[command(name = "claimbot")]
#[command(version = "0.1.0")]
#[command(about = "Clears pending tasks and claims rewards across configured accounts", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Process every configured account (the default when no command is given)
    Run {
        /// Override the API base URL
        #[arg(long, env = "CLAIMBOT_BASE_URL", value_name = "URL")]
        base_url: Option<String>,
    },

    /// Show accounts discovered from the environment
    Accounts {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env file is fine; the environment may be set directly.
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    // Initialize tracing
    let filter = if cli.verbose {
        "claimbot=debug,info"
    } else {
        "claimbot=info,warn"
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    match cli.command {
        Some(Commands::Run { base_url }) => run_batch(base_url).await,
        Some(Commands::Accounts { json }) => show_accounts(json),
        None => run_batch(std::env::var("CLAIMBOT_BASE_URL").ok()).await,
    }
}

/// Discover accounts and drive the whole batch.
///
/// Exits 0 even when individual accounts or tasks failed; per-unit failures
/// are reported in the console and the summary, never as an exit status.
async fn run_batch(base_url: Option<String>) -> anyhow::Result<()> {
    let credentials = accounts::discover();
    if credentials.is_empty() {
        println!(
            "{}",
            "No accounts configured. Set ACCOUNT_1_EMAIL and ACCOUNT_1_PASSWORD.".yellow()
        );
        return Ok(());
    }

    let mut client = ApiClient::new();
    if let Some(base_url) = base_url {
        client = client.with_base_url(&base_url);
    }

    let outcomes = batch::process_accounts(&client, &credentials).await;
    batch::print_summary(&outcomes);

    Ok(())
}

fn show_accounts(json: bool) -> anyhow::Result<()> {
    let credentials = accounts::discover();

    if json {
        let entries: Vec<serde_json::Value> = credentials
            .iter()
            .enumerate()
            .map(|(index, credential)| {
                serde_json::json!({
                    "slot": index + 1,
                    "email": credential.masked_email(),
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    if credentials.is_empty() {
        println!("{}", "No accounts configured.".yellow());
    } else {
        println!(
            "{}",
            format!("{} account(s) configured:", credentials.len()).bold()
        );
        for (index, credential) in credentials.iter().enumerate() {
            println!("  {}. {}", index + 1, credential.masked_email());
        }
    }

    Ok(())
}
