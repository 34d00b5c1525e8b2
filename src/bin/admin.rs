//! CLI administration tool for linkly.
//!
//! Provides commands for managing accounts and API tokens without requiring
//! HTTP API access.
//!
//! # Usage
//!
//! ```bash
//! # Create an account
//! cargo run --bin admin -- account create --email shop@example.com --plan free
//!
//! # Create a new API token for an account
//! cargo run --bin admin -- token create --account-id 1
//!
//! # List all tokens
//! cargo run --bin admin -- token list
//!
//! # Revoke a token
//! cargo run --bin admin -- token revoke "Production API"
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! - `DATABASE_URL` (required): PostgreSQL connection string
//! - `TOKEN_SIGNING_SECRET` (required for token commands): HMAC key matching
//!   the server's
//!
//! # Security
//!
//! Only the HMAC-SHA256 hash of a token is stored; the raw value is printed
//! once at creation and cannot be retrieved later.

use linkly::domain::quota::PlanTier;
use linkly::domain::repositories::{AccountRepository, TokenRepository};
use linkly::infrastructure::persistence::{PgAccountRepository, PgTokenRepository};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::{Confirm, Input};
use hmac::{Hmac, Mac};
use rand::Rng;
use rand::distr::Alphanumeric;
use sha2::Sha256;
use sqlx::PgPool;
use std::sync::Arc;

/// CLI tool for managing linkly.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Top-level command groups.
#[derive(Subcommand)]
enum Commands {
    /// Manage accounts
    Account {
        #[command(subcommand)]
        action: AccountAction,
    },

    /// Manage API tokens
    Token {
        #[command(subcommand)]
        action: TokenAction,
    },

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

/// Account management subcommands.
#[derive(Subcommand)]
enum AccountAction {
    /// Create a new account
    Create {
        /// Account email address
        #[arg(short, long)]
        email: Option<String>,

        /// Plan tier: "free" or "paid"
        #[arg(short, long, default_value = "free")]
        plan: String,
    },
}

/// Token management subcommands.
#[derive(Subcommand)]
enum TokenAction {
    /// Create a new API token
    Create {
        /// Account the token authenticates as
        #[arg(short, long)]
        account_id: i64,

        /// Token name (e.g., "Production API", "Mobile App")
        #[arg(short, long)]
        name: Option<String>,

        /// Custom token value (optional, auto-generated if not provided)
        #[arg(short, long)]
        token: Option<String>,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// List all tokens
    List,

    /// Revoke a token
    Revoke {
        /// Token name or hash to revoke
        name_or_hash: String,
    },
}

/// Database operation subcommands.
#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;

    let pool = PgPool::connect(&database_url)
        .await
        .context("Failed to connect to database")?;

    match cli.command {
        Commands::Account { action } => handle_account_action(action, &pool).await?,
        Commands::Token { action } => handle_token_action(action, &pool).await?,
        Commands::Db { action } => handle_db_action(action, &pool).await?,
    }

    Ok(())
}

/// Dispatches account management commands.
async fn handle_account_action(action: AccountAction, pool: &PgPool) -> Result<()> {
    let repo = Arc::new(PgAccountRepository::new(Arc::new(pool.clone())));

    match action {
        AccountAction::Create { email, plan } => {
            create_account(repo, email, plan).await?;
        }
    }

    Ok(())
}

/// Creates an account with the given plan tier.
async fn create_account(
    repo: Arc<PgAccountRepository>,
    email: Option<String>,
    plan: String,
) -> Result<()> {
    println!("{}", "👤 Create Account".bright_blue().bold());
    println!();

    let email = match email {
        Some(e) => e,
        None => Input::new().with_prompt("Email").interact_text()?,
    };

    let plan: PlanTier = plan
        .parse()
        .map_err(|e| anyhow::anyhow!("Invalid plan: {e}"))?;

    let account = repo
        .create(&email, plan)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to create account: {:?}", e))?;

    println!(
        "{} Account {} created ({} plan, id {})",
        "✅".green(),
        account.email.cyan(),
        account.plan.as_str().bright_yellow(),
        account.id.to_string().bright_white().bold()
    );

    Ok(())
}

/// Dispatches token management commands.
async fn handle_token_action(action: TokenAction, pool: &PgPool) -> Result<()> {
    let repo = Arc::new(PgTokenRepository::new(Arc::new(pool.clone())));

    match action {
        TokenAction::Create {
            account_id,
            name,
            token,
            yes,
        } => {
            create_token(repo, account_id, name, token, yes).await?;
        }
        TokenAction::List => {
            list_tokens(repo).await?;
        }
        TokenAction::Revoke { name_or_hash } => {
            revoke_token(repo, name_or_hash).await?;
        }
    }

    Ok(())
}

/// Creates a new API token with interactive prompts.
///
/// # Flow
///
/// 1. Prompt for token name (or use provided)
/// 2. Generate random token or use provided value
/// 3. Display token details with warning
/// 4. Confirm creation (unless `--yes` flag)
/// 5. Hash token with HMAC-SHA256 and store
/// 6. Display usage instructions
async fn create_token(
    repo: Arc<PgTokenRepository>,
    account_id: i64,
    name: Option<String>,
    token: Option<String>,
    skip_confirm: bool,
) -> Result<()> {
    println!("{}", "🔑 Create API Token".bright_blue().bold());
    println!();

    let token_name = match name {
        Some(n) => n,
        None => Input::new()
            .with_prompt("Token name")
            .with_initial_text("Production API")
            .interact_text()?,
    };

    let token_value = match token {
        Some(t) => {
            println!("{}", "⚠️  Using provided token value".yellow());
            t
        }
        None => {
            let generated = generate_token();
            println!("{}", "✨ Generated new token".green());
            generated
        }
    };

    println!();
    println!("{}", "Token details:".bright_white().bold());
    println!("  Account: {}", account_id.to_string().cyan());
    println!("  Name:    {}", token_name.cyan());
    println!("  Token:   {}", token_value.bright_yellow().bold());
    println!();
    println!(
        "{}",
        "⚠️  IMPORTANT: Save this token now! You won't be able to see it again."
            .red()
            .bold()
    );
    println!();

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt("Create this token?")
            .default(true)
            .interact()?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    let token_hash = hash_token(&token_value)?;

    repo.create_token(account_id, &token_name, &token_hash)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to create token: {:?}", e))?;

    println!();
    println!("{}", "✅ Token created successfully!".green().bold());
    println!();
    println!("{}", "Add this to your requests:".bright_white());
    println!(
        "  {}: Bearer {}",
        "Authorization".bright_cyan(),
        token_value.bright_yellow()
    );
    println!();
    println!("{}", "Example:".bright_white());
    println!(
        "  curl -H \"Authorization: Bearer {}\" http://localhost:3000/api/domains/all",
        token_value.bright_yellow()
    );
    println!();

    Ok(())
}

/// Lists all API tokens with status indicators.
async fn list_tokens(repo: Arc<PgTokenRepository>) -> Result<()> {
    let tokens = repo
        .list_tokens()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to list tokens: {:?}", e))?;

    if tokens.is_empty() {
        println!("{}", "No tokens found".yellow());
        return Ok(());
    }

    println!("{}", "API Tokens:".bright_white().bold());
    println!();

    for token in tokens {
        let status = if token.revoked_at.is_some() {
            "revoked".red()
        } else {
            "active".green()
        };

        println!(
            "  [{}] {} (account {}) — created {} — {}",
            token.id,
            token.name.cyan(),
            token.account_id,
            token.created_at.format("%Y-%m-%d"),
            status
        );
    }

    Ok(())
}

/// Revokes a token by name or hash.
async fn revoke_token(repo: Arc<PgTokenRepository>, name_or_hash: String) -> Result<()> {
    let revoked = repo
        .revoke_token(&name_or_hash)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to revoke token: {:?}", e))?;

    if revoked == 0 {
        println!("{}", "No matching active token found".yellow());
    } else {
        println!("{} {} token(s) revoked", "✅".green(), revoked);
    }

    Ok(())
}

/// Dispatches database commands.
async fn handle_db_action(action: DbAction, pool: &PgPool) -> Result<()> {
    match action {
        DbAction::Check => {
            sqlx::query_scalar::<_, i32>("SELECT 1")
                .fetch_one(pool)
                .await
                .context("Database check failed")?;
            println!("{}", "✅ Database connection OK".green().bold());
        }
    }

    Ok(())
}

/// Generates a random 48-character alphanumeric token.
fn generate_token() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(48)
        .map(char::from)
        .collect()
}

/// Hashes a raw token with HMAC-SHA256 keyed by `TOKEN_SIGNING_SECRET`.
///
/// Must match the hashing in the server's auth service, or issued tokens
/// will not authenticate.
fn hash_token(token: &str) -> Result<String> {
    let secret =
        std::env::var("TOKEN_SIGNING_SECRET").context("TOKEN_SIGNING_SECRET must be set")?;

    let mut mac = Hmac::<Sha256>::new_from_slice(secret.as_bytes())
        .expect("HMAC accepts any key length");
    mac.update(token.as_bytes());

    Ok(hex::encode(mac.finalize().into_bytes()))
}
