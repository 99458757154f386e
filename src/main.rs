//! http-basics
//!
//! ```text
//!   client ──▶ remote users API (GET / POST / PUT / DELETE examples)
//!
//!   serve:
//!     TCP accept ──▶ request parser ──▶ route table ──▶ users handlers
//!          ▲                                                 │
//!          └──── close ◀── response writer ◀── UserStore ◀───┘
//! ```
//!
//! Without a subcommand the client examples run first, then the server.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use http_basics::config::{load_config, AppConfig};
use http_basics::lifecycle::signals::spawn_signal_handler;
use http_basics::net::Listener;
use http_basics::observability::init_logging;
use http_basics::{banner, ExampleClient, HttpServer, Shutdown};

#[derive(Parser)]
#[command(name = "http-basics", version)]
#[command(about = "HTTP client examples and a minimal users server", long_about = None)]
struct Cli {
    /// Path to a TOML configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log level or tracing filter directive (overrides the config file)
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the four client examples against the remote API
    Client,
    /// Run the users server until interrupted
    Serve {
        /// Port to listen on (overrides the config file)
        #[arg(short, long)]
        port: Option<u16>,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => AppConfig::default(),
    };
    if let Some(Commands::Serve { port: Some(port) }) = &cli.command {
        config.server.port = *port;
    }

    let level = cli
        .log_level
        .clone()
        .unwrap_or_else(|| config.observability.log_level.clone());
    init_logging(&level);

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        bind_address = %config.server.bind_address(),
        base_url = %config.client.base_url,
        "http-basics starting"
    );

    match cli.command {
        Some(Commands::Client) => run_client(&config).await?,
        Some(Commands::Serve { .. }) => run_server(&config).await?,
        None => {
            run_client(&config).await?;
            run_server(&config).await?;
        }
    }

    Ok(())
}

async fn run_client(config: &AppConfig) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", banner());
    println!("HTTP EXAMPLES IN RUST");
    println!("{}", banner());
    println!("\nPART 1: Making HTTP Requests (Acting as a Client)");

    let client = ExampleClient::new(&config.client)?;
    let results = client.run_all().await;

    let failed = results.iter().filter(|(_, r)| r.is_err()).count();
    tracing::info!(total = results.len(), failed, "Client examples finished");
    Ok(())
}

async fn run_server(config: &AppConfig) -> Result<(), Box<dyn std::error::Error>> {
    println!("\n{}", banner());
    println!("PART 2: Building a Simple HTTP Server");
    println!("{}", banner());

    let listener = Listener::bind(&config.server).await?;

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    spawn_signal_handler(shutdown.clone());

    let store = HttpServer::new(config).run(listener, server_shutdown).await?;
    tracing::info!(users = store.len(), next_id = store.next_id(), "Shutdown complete");
    Ok(())
}
