//! OTP Signup CLI - Database migrations and operator tools.
//!
//! # Usage
//!
//! ```bash
//! # Create the Customer table in the `webhook` schema
//! otp-signup migrate
//!
//! # Send a test notification with a freshly generated OTP
//! otp-signup send-otp --email ann@example.com
//!
//! # Send a test notification with a fixed OTP
//! otp-signup send-otp --email ann@example.com --otp 123456
//! ```
//!
//! # Commands
//!
//! - `migrate` - Run database migrations
//! - `send-otp` - POST one `{email, otp}` request to the notification service

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "otp-signup")]
#[command(author, version, about = "OTP Signup operator tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run database migrations
    Migrate,
    /// Send one OTP notification through the notification service
    SendOtp {
        /// Recipient email address
        #[arg(short, long)]
        email: String,

        /// Six-digit code to send (generated when omitted)
        #[arg(short, long)]
        otp: Option<String>,
    },
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Migrate => commands::migrate::run().await?,
        Commands::SendOtp { email, otp } => {
            commands::send_otp::run(&email, otp.as_deref()).await?;
        }
    }
    Ok(())
}
