//! Armarinho CLI - database migrations and back-office management.
//!
//! # Usage
//!
//! ```bash
//! # Run database migrations
//! pos-cli migrate
//!
//! # Create default users, sample products and customers on an empty database
//! pos-cli seed --admin-password '...' --operator-password '...'
//!
//! # Create a user
//! pos-cli user create --login caixa2 --name "Caixa 2" --role operator --password '...'
//! ```
//!
//! # Commands
//!
//! - `migrate` - Run database migrations
//! - `seed` - Seed an empty database
//! - `user create` - Create a back-office user

#![cfg_attr(not(test), forbid(unsafe_code))]

use armarinho_core::Role;
use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "pos-cli")]
#[command(author, version, about = "Armarinho back-office CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run database migrations
    Migrate,
    /// Create default users and sample data if no users exist
    Seed {
        /// Password for the `admin` user
        #[arg(long, env = "SEED_ADMIN_PASSWORD", hide_env_values = true)]
        admin_password: String,

        /// Password for the `operador` user
        #[arg(long, env = "SEED_OPERATOR_PASSWORD", hide_env_values = true)]
        operator_password: String,
    },
    /// Manage back-office users
    User {
        #[command(subcommand)]
        action: UserAction,
    },
}

#[derive(Subcommand)]
enum UserAction {
    /// Create a new user
    Create {
        /// Login name
        #[arg(short, long)]
        login: String,

        /// Display name
        #[arg(short, long)]
        name: String,

        /// Role (`admin` or `operator`)
        #[arg(short, long, default_value = "operator")]
        role: Role,

        /// Initial password
        #[arg(short, long, env = "POS_USER_PASSWORD", hide_env_values = true)]
        password: String,
    },
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result: Result<(), commands::CliError> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), commands::CliError> {
    match cli.command {
        Commands::Migrate => commands::migrate::run().await?,
        Commands::Seed {
            admin_password,
            operator_password,
        } => commands::seed::run(&admin_password, &operator_password).await?,
        Commands::User { action } => match action {
            UserAction::Create {
                login,
                name,
                role,
                password,
            } => {
                commands::user::create(&login, &name, role, &password).await?;
            }
        },
    }
    Ok(())
}
