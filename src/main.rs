//! Command-line surface for the respondex pipeline.
//!
//! Every operation is an explicit subcommand; nothing runs as a side
//! effect of process startup.

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use respondex::config::Settings;
use respondex::providers::BedrockProvider;
use respondex::stores::MongoResponseStore;
use respondex::sync::EmbedOutcome;
use respondex::types::RespondexError;
use respondex::{query, sync};

#[derive(Parser)]
#[command(name = "respondex", version, about = "Embedding sync and similarity search over stored responses")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Embed every stored response that does not have an embedding yet.
    Sync,
    /// Run a scoped similarity query and print a summary of the hits.
    Query {
        /// Line-item identifier restricting the search scope.
        #[arg(long = "line-item")]
        line_item_id: String,
        /// Free-text prompt to search with.
        prompt: String,
    },
    /// Declare the vector-search index on the response collection.
    CreateIndex,
    /// Embed a single document by identifier.
    EmbedOne {
        /// Document identifier.
        #[arg(long)]
        id: String,
    },
}

fn init_tracing() {
    let fmt_layer = fmt::layer()
        .with_target(false)
        .with_file(false)
        .with_line_number(false)
        .with_span_events(FmtSpan::NONE);

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("warn,respondex=info"))
        .unwrap();

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .init();
}

async fn run(cli: Cli) -> Result<(), RespondexError> {
    let settings = Settings::from_env()?;
    let store = MongoResponseStore::open(
        &settings.mongo_uri,
        &settings.database,
        &settings.collection,
        settings.vector_index.clone(),
    )
    .await?;

    match cli.command {
        Command::Sync => {
            let bedrock = BedrockProvider::connect(&settings).await;
            let report = sync::sync_embeddings(&store, &bedrock).await?;
            println!(
                "scanned {} documents: {} updated, {} failed",
                report.scanned, report.updated, report.failed
            );
        }
        Command::Query {
            line_item_id,
            prompt,
        } => {
            let bedrock = BedrockProvider::connect(&settings).await;
            let summary =
                query::query_and_summarize(&store, &bedrock, &bedrock, &line_item_id, &prompt)
                    .await?;
            println!("{summary}");
        }
        Command::CreateIndex => {
            store.create_vector_index().await?;
            println!("vector index '{}' declared", store.index_name());
        }
        Command::EmbedOne { id } => {
            let bedrock = BedrockProvider::connect(&settings).await;
            match sync::embed_one(&store, &bedrock, &id).await? {
                EmbedOutcome::Updated => println!("document {id} updated"),
                EmbedOutcome::AlreadyEmbedded => {
                    println!("document {id} already has an embedding")
                }
                EmbedOutcome::MissingResponse => {
                    println!("document {id} has no response text to embed")
                }
            }
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}
