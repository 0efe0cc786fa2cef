use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "fragdoc", version, about = "Client für den Dokumenten-RAG-Dienst")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Sign in against the configured identity provider
    Login,
    /// Upload a document (or audio recording) with an access level
    Upload(commands::upload::UploadArgs),
    /// Ask a natural-language question against the indexed documents
    Ask(commands::ask::AskArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Login => commands::login::run().await,
        Commands::Upload(args) => commands::upload::run(args).await,
        Commands::Ask(args) => commands::ask::run(args).await,
    }
}
