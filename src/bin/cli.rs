use std::process;

use clap::{Parser, Subcommand};
use dialoguer::{Input, Password};
use dotenvy::dotenv;
use flashdeck::cli::{create_user, purge_credentials, revoke_credentials};
use flashdeck_auth::Role;
use flashdeck_config::DatabaseConfig;
use flashdeck_db::{PgStore, init_db_pool};

#[derive(Parser)]
#[command(name = "flashdeck-cli")]
#[command(about = "Flashdeck CLI - Administrative tools for Flashdeck", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a user account with any role
    CreateUser {
        /// Email address (prompted if not provided)
        #[arg(short = 'e', long)]
        email: Option<String>,

        /// Password (will be prompted securely if not provided)
        #[arg(short = 'p', long)]
        password: Option<String>,

        /// One of user, moderator, admin
        #[arg(short = 'r', long, default_value = "user")]
        role: Role,

        #[arg(short = 'u', long)]
        username: Option<String>,
    },
    /// Delete expired refresh credentials
    PurgeCredentials,
    /// Delete all refresh credentials of a user
    RevokeCredentials {
        #[arg(short = 'e', long)]
        email: String,
    },
}

fn fail(message: impl std::fmt::Display) -> ! {
    eprintln!("\n❌ {message}");
    process::exit(1);
}

#[tokio::main]
async fn main() {
    dotenv().ok();
    let cli = Cli::parse();

    let db_config = DatabaseConfig::from_env().unwrap_or_else(|_| fail("DATABASE_URL must be set"));
    let pool = init_db_pool(&db_config)
        .await
        .unwrap_or_else(|e| fail(format!("Failed to connect to database: {e}")));
    let store = PgStore::new(pool);

    match cli.command {
        Commands::CreateUser {
            email,
            password,
            role,
            username,
        } => {
            let email = email.unwrap_or_else(|| {
                Input::new()
                    .with_prompt("Email address")
                    .interact_text()
                    .unwrap_or_else(|e| fail(format!("Failed to read email: {e}")))
            });
            let password = password.unwrap_or_else(|| {
                Password::new()
                    .with_prompt("Password")
                    .with_confirmation("Confirm password", "Passwords don't match")
                    .interact()
                    .unwrap_or_else(|e| fail(format!("Failed to read password: {e}")))
            });

            match create_user(&store, &email, &password, role, username).await {
                Ok(user) => {
                    println!("\n✅ User created successfully!");
                    println!("   Id: {}", user.id);
                    println!("   Email: {}", user.email);
                    println!("   Role: {}", user.role);
                }
                Err(e) => fail(format!("Error creating user: {}", e.error)),
            }
        }
        Commands::PurgeCredentials => match purge_credentials(&store).await {
            Ok(count) => println!("✅ Purged {count} expired refresh credential(s)"),
            Err(e) => fail(format!("Error purging credentials: {}", e.error)),
        },
        Commands::RevokeCredentials { email } => {
            match revoke_credentials(&store, &store, &email).await {
                Ok(count) => println!("✅ Revoked {count} refresh credential(s) for {email}"),
                Err(e) => fail(format!("Error revoking credentials: {}", e.error)),
            }
        }
    }
}
