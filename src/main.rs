// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::debug;
use zonepatch::{
    client::ZoneClient,
    codec::{RecordData, TypedRecord},
    config::ClientConfig,
    constants::{ENV_API_HOST, ENV_API_KEY, ENV_API_TIMEOUT},
    record_set::{ImportId, RecordSet},
    types::{Pagination, RecordType},
};

/// Inspect and edit DNS zones through the zone API.
#[derive(Parser, Debug)]
#[command(name = "zonectl", version, about)]
struct Cli {
    /// API base URL [env: ZONEPATCH_API_HOST]
    #[arg(long, global = true)]
    host: Option<String>,

    /// API key [env: ZONEPATCH_API_KEY]
    #[arg(long, global = true)]
    api_key: Option<String>,

    /// HTTP timeout in seconds [env: ZONEPATCH_API_TIMEOUT]
    #[arg(long, global = true)]
    timeout: Option<u64>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List zones
    Zones {
        #[arg(long)]
        offset: Option<u64>,
        #[arg(long)]
        limit: Option<u64>,
    },

    /// Show a zone with all its records
    Get { zone: String },

    /// Show the records of one type at a name
    Records {
        zone: String,
        name: String,
        record_type: RecordType,
        /// Fail when no records exist instead of printing an empty list
        #[arg(long)]
        require: bool,
    },

    /// Replace the records of one type at a name
    Set {
        zone: String,
        name: String,
        record_type: RecordType,
        /// Record data in presentation format, e.g. "10 mail.example.com."
        #[arg(required = true)]
        data: Vec<String>,
        #[arg(long)]
        ttl: Option<u32>,
        #[arg(long)]
        comments: Option<String>,
        /// Move the records from this name, clearing it in the same update
        #[arg(long)]
        previous_name: Option<String>,
    },

    /// Delete the records of one type at a name
    Delete {
        zone: String,
        name: String,
        record_type: RecordType,
    },

    /// Validate a `zone/name` import ID
    ImportId { id: String },
}

fn main() -> Result<()> {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .thread_name("zonectl")
        .enable_all()
        .build()?;

    runtime.block_on(async_main())
}

async fn async_main() -> Result<()> {
    // Respects RUST_LOG (default: info) and RUST_LOG_FORMAT (json|text)
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let log_format = std::env::var("RUST_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

    // Logs go to stderr so stdout stays valid JSON
    match log_format.to_lowercase().as_str() {
        "json" => {
            tracing_subscriber::fmt()
                .with_env_filter(env_filter)
                .with_file(true)
                .with_line_number(true)
                .with_thread_names(true)
                .with_target(false)
                .with_writer(std::io::stderr)
                .json()
                .init();
        }
        _ => {
            tracing_subscriber::fmt()
                .with_env_filter(env_filter)
                .with_file(true)
                .with_line_number(true)
                .with_thread_names(true)
                .with_target(false)
                .with_writer(std::io::stderr)
                .with_ansi(true)
                .compact()
                .init();
        }
    }

    let cli = Cli::parse();
    debug!(command = ?cli.command, "Logging initialized");

    if let Command::ImportId { id } = &cli.command {
        let id = ImportId::parse(id)?;
        return print_json(&serde_json::json!({"zone": id.zone, "name": id.name}));
    }

    let config = load_config(&cli)?;
    let client = ZoneClient::new(config).context("failed to create zone API client")?;
    debug!(host = %client.base_url(), "Zone API client ready");

    match cli.command {
        Command::Zones { offset, limit } => {
            let page = Pagination {
                offset,
                limit,
                total: None,
            };
            let zones = client.list_zones(&page).await?;
            print_json(&zones)
        }
        Command::Get { zone } => {
            let response = client.get_zone(&zone).await?;
            print_json(&response.data)
        }
        Command::Records {
            zone,
            name,
            record_type,
            require,
        } => {
            let set = RecordSet::new(client, record_type);
            let records = if require {
                set.lookup(&zone, &name).await?
            } else {
                set.read(&zone, &name).await?
            };
            print_json(&records)
        }
        Command::Set {
            zone,
            name,
            record_type,
            data,
            ttl,
            comments,
            previous_name,
        } => {
            let records = data
                .iter()
                .map(|value| {
                    let data = if record_type.is_compound() {
                        RecordData::decode(record_type, value)
                            .with_context(|| format!("invalid {record_type} record data '{value}'"))?
                    } else {
                        RecordData::simple(record_type, value.as_str())
                            .with_context(|| format!("{record_type} takes compound record data"))?
                    };
                    Ok(TypedRecord {
                        data,
                        ttl,
                        comments: comments.clone(),
                    })
                })
                .collect::<Result<Vec<_>>>()?;

            let set = RecordSet::new(client, record_type);
            set.apply(&zone, &name, previous_name.as_deref(), &records)
                .await?;
            print_json(&set.read(&zone, &name).await?)
        }
        Command::Delete {
            zone,
            name,
            record_type,
        } => {
            RecordSet::new(client, record_type)
                .delete(&zone, &name)
                .await?;
            print_json(&serde_json::json!({"deleted": {"zone": zone, "name": name, "type": record_type}}))
        }
        Command::ImportId { .. } => Ok(()),
    }
}

/// Merge command-line flags over the environment.
fn load_config(cli: &Cli) -> Result<ClientConfig> {
    let overrides = [
        (ENV_API_HOST, cli.host.clone()),
        (ENV_API_KEY, cli.api_key.clone()),
        (ENV_API_TIMEOUT, cli.timeout.map(|t| t.to_string())),
    ];

    ClientConfig::from_lookup(|key| {
        overrides
            .iter()
            .find(|(name, _)| *name == key)
            .and_then(|(_, value)| value.clone())
            .or_else(|| std::env::var(key).ok())
    })
    .context("failed to load zone API configuration")
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
