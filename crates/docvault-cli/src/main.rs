//! Docvault CLI: command-line viewer for the Docvault API.
//!
//! Set DOCVAULT_API_URL to point at the server (default http://localhost:8000).

use anyhow::Context;
use clap::{Parser, Subcommand};
use docvault_cli::{check_path, default_output_path, init_tracing, ApiClient};
use serde::Serialize;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "docvault", about = "Docvault document viewer")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List stored object keys
    List {
        /// Only the PDF and Markdown namespaces
        #[arg(long)]
        namespaced: bool,
    },
    /// Extract a PDF and store it with its Markdown text
    Ingest {
        /// Path to the PDF
        file: PathBuf,
    },
    /// Store a file as-is at the bucket root
    Upload {
        /// Path to the file to upload
        file: PathBuf,
    },
    /// Download a stored object
    Download {
        /// Object key, e.g. documents/pdf/report_20240102_030405.pdf
        key: String,
        /// Destination path (defaults to the key's file name)
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
}

fn print_json(value: &impl Serialize) -> anyhow::Result<()> {
    let out = serde_json::to_string_pretty(value).context("Serialize response")?;
    println!("{}", out);
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();
    dotenvy::dotenv().ok();

    let client = ApiClient::from_env().context("Failed to create API client")?;
    let cli = Cli::parse();

    match cli.command {
        Commands::List { namespaced } => {
            let listing = if namespaced {
                client.list_namespaced().await?
            } else {
                client.list().await?
            };
            print_json(&listing)?;
        }
        Commands::Ingest { file } => {
            let record = client.ingest(&file).await?;
            print_json(&record)?;
        }
        Commands::Upload { file } => {
            let response = client.upload(&file).await?;
            print_json(&response)?;
        }
        Commands::Download { key, output } => {
            let output = match output {
                Some(path) => path,
                None => default_output_path(&key)
                    .ok_or_else(|| anyhow::anyhow!("Cannot derive a file name from {}", key))?,
            };
            check_path(&output)?;

            let data = client.download(&key).await?;
            tokio::fs::write(&output, &data)
                .await
                .with_context(|| format!("Failed to write {}", output.display()))?;
            tracing::info!(key = %key, path = %output.display(), size_bytes = data.len(), "Downloaded");
        }
    }

    Ok(())
}
