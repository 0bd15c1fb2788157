use std::net::IpAddr;

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use todo_lists::api;
use todo_lists::session::{SessionConfig, SessionStore};

const DEFAULT_PORT: u16 = 4567;

#[derive(Parser)]
#[command(name = "todos")]
#[command(about = "Session-backed to-do list manager")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value_t = DEFAULT_PORT)]
        port: u16,

        /// Address to bind to
        #[arg(long, default_value = "127.0.0.1")]
        host: IpAddr,
    },
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG").unwrap_or_else(|_| "todo_lists=debug,tower_http=debug".into()),
    );

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

async fn serve(host: IpAddr, port: u16) -> anyhow::Result<()> {
    let config = SessionConfig::from_env();
    tracing::info!(
        "Sessions expire after {}s idle (cookie '{}')",
        config.ttl.num_seconds(),
        config.cookie_name
    );

    let app = api::create_router(SessionStore::new(config));

    let listener = tokio::net::TcpListener::bind((host, port)).await?;
    tracing::info!("Todo server listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app).await?;
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing();

    match cli.command {
        Some(Commands::Serve { port, host }) => serve(host, port).await,
        None => serve(IpAddr::from([127, 0, 0, 1]), DEFAULT_PORT).await,
    }
}
