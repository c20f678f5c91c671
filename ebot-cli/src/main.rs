//! ebot CLI: run the chat-history export bot. Config from env (.env supported);
//! the token can be overridden on the command line.

use anyhow::Result;
use clap::{Parser, Subcommand};
use ebot_discord::{run_bot, DiscordConfig};

#[derive(Parser)]
#[command(name = "ebot")]
#[command(about = "Chat-history export bot", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the bot (config from env; --token overrides DISCORD_TOKEN).
    Run {
        #[arg(short, long)]
        token: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run { token } => {
            let mut config = DiscordConfig::from_env()?;
            if let Some(token) = token {
                config.bot_token = token;
            }
            run_bot(config).await
        }
    }
}
