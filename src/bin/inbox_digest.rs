use std::sync::Arc;

use anyhow::{Result, anyhow};
use clap::{Parser, Subcommand};

use inbox_digest::auth::token_store;
use inbox_digest::config::load_config;
use inbox_digest::digest::gemini::GeminiGenerator;
use inbox_digest::digest::summarizer::Summarizer;
use inbox_digest::feed::client::InboxClient;
use inbox_digest::mail::fetcher::InboxFetcher;
use inbox_digest::mail::gmail::GmailProvider;
use inbox_digest::server::{AppState, serve};
use inbox_digest::terminal::run_tui;

#[derive(Parser)]
#[command(name = "inbox_digest")]
#[command(about = "Paginated inbox with AI digests (server + TUI)", long_about = None)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the HTTP server (GET /mails, POST /summarize-emails)
    Serve {
        /// Address to bind, overrides `listen_addr` from the config
        #[arg(long)]
        listen: Option<String>,
    },

    /// Browse the inbox in the terminal through a running server
    Tui {
        /// Access token forwarded to the mail provider
        #[arg(long)]
        token: Option<String>,

        /// Server base URL, overrides `server_url` from the config
        #[arg(long)]
        server: Option<String>,
    },

    /// Store the generative API key in keyring
    SetApiKey,
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    match cli.cmd {
        Command::SetApiKey => {
            eprintln!("Paste API key (end with Ctrl-D):");
            let mut key = String::new();
            std::io::Read::read_to_string(&mut std::io::stdin(), &mut key)?;
            token_store::save_api_key(key.trim())?;
            println!("Saved generative API key");
            Ok(())
        }

        Command::Serve { listen } => {
            let cfg = load_config().map_err(|e| anyhow!("Configuration error: {e}"))?;
            let api_key = token_store::resolve_api_key()?;

            let provider = Arc::new(GmailProvider::new(cfg.gmail_api_base()));
            let fetcher = InboxFetcher::with_page_size(provider, cfg.page_size());
            let generator = Arc::new(GeminiGenerator::new(
                cfg.generative_api_base(),
                cfg.model(),
                api_key,
            ));
            let summarizer = Summarizer::with_style(generator, cfg.prompt_style());

            let addr = listen.unwrap_or_else(|| cfg.listen_addr());
            serve(&addr, AppState::new(fetcher, summarizer)).await
        }

        Command::Tui { token, server } => {
            let cfg = load_config().map_err(|e| anyhow!("Configuration error: {e}"))?;
            let token = token_store::resolve_access_token(token).ok_or_else(|| {
                anyhow!(
                    "no access token: pass --token or set {}",
                    token_store::ACCESS_TOKEN_ENV
                )
            })?;
            let server = server.unwrap_or_else(|| cfg.server_url());
            let client = InboxClient::new(&server, Some(token))?;
            run_tui(client).await
        }
    }
}
