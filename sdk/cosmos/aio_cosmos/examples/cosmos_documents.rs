// Copyright (c) Microsoft Corporation. All rights reserved.
// Licensed under the MIT License.

use std::error::Error;

use aio_cosmos::{
    CosmosClient, CosmosClientOptions, ItemOptions, PartitionKey, QueryOptions,
    QueryPartitionStrategy,
};
use clap::{Parser, Subcommand};
use futures::TryStreamExt;
use tracing_subscriber::EnvFilter;

/// A small command line tool for working with Cosmos DB documents.
#[derive(Parser)]
struct ProgramArgs {
    /// The Cosmos DB endpoint to connect to.
    #[arg(long, env = "AZURE_COSMOS_ENDPOINT")]
    endpoint: String,

    /// The account key to sign requests with.
    #[arg(long, env = "AZURE_COSMOS_KEY", hide_env_values = true)]
    key: String,

    /// Log request headers and response statuses.
    #[arg(long)]
    diagnostics: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List the databases in the account.
    Databases,

    /// Create a document from a JSON string.
    Create {
        database: String,
        container: String,
        /// The partition key value of the document.
        partition_key: String,
        /// The document, as JSON.
        document: String,
        #[arg(long)]
        upsert: bool,
    },

    /// Read a single document.
    Get {
        database: String,
        container: String,
        partition_key: String,
        id: String,
    },

    /// Run a query and print each page.
    Query {
        database: String,
        container: String,
        query: String,
        /// Restrict the query to one partition. Without it the query runs across partitions.
        #[arg(long, short)]
        partition_key: Option<String>,
    },

    /// Write a number of generated documents in one batch.
    Seed {
        database: String,
        container: String,
        #[arg(long, default_value_t = 10)]
        count: usize,
    },
}

#[tokio::main]
pub async fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = ProgramArgs::parse();
    let options = CosmosClientOptions::builder()
        .with_diagnostics(args.diagnostics)
        .build();
    let client = CosmosClient::connect(&args.endpoint, &args.key, Some(options)).await?;

    match args.command {
        Command::Databases => {
            let response = client.list_databases().await?;
            println!("{:#}", response.data);
        }
        Command::Create {
            database,
            container,
            partition_key,
            document,
            upsert,
        } => {
            let document: serde_json::Value = serde_json::from_str(&document)?;
            let response = client
                .database_client(&database)
                .container_client(&container)
                .create_document(
                    &document,
                    partition_key,
                    Some(ItemOptions {
                        upsert,
                        ..Default::default()
                    }),
                )
                .await?;
            println!("Created document (session {:?})", response.session_token);
            println!("{:#}", response.data);
        }
        Command::Get {
            database,
            container,
            partition_key,
            id,
        } => {
            let response = client
                .database_client(&database)
                .container_client(&container)
                .get_document(&id, partition_key, None)
                .await?;
            println!("{:#}", response.data);
        }
        Command::Query {
            database,
            container,
            query,
            partition_key,
        } => {
            let partition_strategy = match partition_key {
                Some(pk) => QueryPartitionStrategy::SinglePartition(PartitionKey::from(pk)),
                None => QueryPartitionStrategy::CrossPartition,
            };
            let container_client = client
                .database_client(&database)
                .container_client(&container);
            let mut pages = container_client.query_documents(
                query,
                Some(QueryOptions {
                    partition_strategy,
                    ..Default::default()
                }),
            );
            while let Some(page) = pages.try_next().await? {
                println!("Results Page");
                println!("  Items:");
                for item in page.data.as_array().into_iter().flatten() {
                    println!("    * {:#}", item);
                }
            }
        }
        Command::Seed {
            database,
            container,
            count,
        } => {
            let documents = (0..count).map(|i| {
                let id = uuid::Uuid::new_v4().to_string();
                let account = format!("Account-{}", i % 3);
                let document = serde_json::json!({
                    "id": id,
                    "account": account,
                    "sequence": i,
                });
                (document, PartitionKey::from(account))
            });
            let results = client
                .database_client(&database)
                .container_client(&container)
                .create_documents(documents, None)
                .await?;
            let failed = results.iter().filter(|r| r.is_err()).count();
            println!("Wrote {} documents, {} failed", results.len() - failed, failed);
            for err in results.iter().filter_map(|r| r.as_ref().err()) {
                println!("  * {err}");
            }
        }
    }

    Ok(())
}
