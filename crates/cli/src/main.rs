//! AuthProof CLI — the main entry point.
//!
//! Commands:
//! - `chat`     — Interactive chat or single-message mode
//! - `tools`    — List the registered tools
//! - `history`  — List stored conversations

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(
    name = "authproof",
    about = "AuthProof — conversational device authorization testing",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Chat with the test assistant
    Chat {
        /// Send a single message instead of entering interactive mode
        #[arg(short, long)]
        message: Option<String>,
    },

    /// List the registered tools and their parameters
    Tools,

    /// List stored conversations
    History,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .with_target(false)
        .init();

    match cli.command {
        Commands::Chat { message } => commands::chat::run(message).await?,
        Commands::Tools => commands::tools::run()?,
        Commands::History => commands::history::run().await?,
    }

    Ok(())
}
