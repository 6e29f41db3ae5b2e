//! Ontoscope CLI
//!
//! Command-line surface over the record viewer core:
//! - `ontoscope show <object-type> <id>` fetches and renders one record
//! - `ontoscope delete <object-type> <id>` confirms, then navigates away
//!   (and invokes deletion persistence once a deployment provides it)
//!
//! The schema and query services are reached over HTTP; point the CLI at a
//! deployment with `--endpoint` or `ONTOSCOPE_ENDPOINT`.

use anyhow::{anyhow, bail, Result};
use async_trait::async_trait;
use clap::{Parser, Subcommand};
use colored::Colorize;
use ontoscope_client::http::{HttpQueryService, HttpSchemaService};
use ontoscope_client::{ConfirmPrompt, Navigator, RecordViewer, ViewRequest, ViewState};
use std::io::{self, Write};
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "ontoscope")]
#[command(author, version, about = "Ontoscope: generic ontology record viewer")]
struct Cli {
    /// Base URL of the ontology service. Falls back to `ONTOSCOPE_ENDPOINT`,
    /// then to http://localhost:8080.
    #[arg(long, global = true)]
    endpoint: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch a single record by object type and id and render its properties.
    Show {
        object_type: String,
        id: String,
        /// Print the materialized instance as JSON instead of a property list.
        #[arg(long)]
        json: bool,
    },
    /// Delete a single record (asks for confirmation first).
    Delete {
        object_type: String,
        id: String,
        /// Skip the confirmation prompt.
        #[arg(long)]
        yes: bool,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    let rt = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(|e| anyhow!("failed to initialize tokio runtime: {e}"))?;

    let endpoint = cli
        .endpoint
        .or_else(|| std::env::var("ONTOSCOPE_ENDPOINT").ok())
        .unwrap_or_else(|| "http://localhost:8080".to_string());

    let client = reqwest::Client::new();
    let viewer = RecordViewer::new(
        Arc::new(HttpSchemaService::new(client.clone(), &endpoint)),
        Arc::new(HttpQueryService::new(client, &endpoint)),
    );

    match cli.command {
        Commands::Show {
            object_type,
            id,
            json,
        } => rt.block_on(cmd_show(&viewer, ViewRequest::new(object_type, id), json)),
        Commands::Delete {
            object_type,
            id,
            yes,
        } => rt.block_on(cmd_delete(&viewer, ViewRequest::new(object_type, id), yes)),
    }
}

async fn cmd_show(viewer: &RecordViewer, request: ViewRequest, json: bool) -> Result<()> {
    viewer.navigate(request.clone()).await;

    let (object_type, instance) = match viewer.state() {
        ViewState::Found {
            object_type,
            instance,
            ..
        } => (object_type, instance),
        _ => bail!(
            "record not found: {} '{}'",
            request.object_type,
            request.id
        ),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&instance)?);
        return Ok(());
    }

    println!("{}", object_type.name.bold());
    println!("{} {}", "id:".dimmed(), instance.id);
    println!();
    for property in &object_type.properties {
        let rendered = instance.render(&property.name);
        if rendered.contains('\n') {
            // Structured values go on their own indented block.
            println!("{}", format!("{}:", property.name).blue());
            for line in rendered.lines() {
                println!("  {line}");
            }
        } else {
            println!("{} {rendered}", format!("{}:", property.name).blue());
        }
    }
    Ok(())
}

async fn cmd_delete(viewer: &RecordViewer, request: ViewRequest, yes: bool) -> Result<()> {
    viewer.navigate(request.clone()).await;

    // The viewer itself refuses to delete anything it has not found.
    let navigator = PrintingNavigator;
    let deleted = if yes {
        viewer.delete(&AlwaysConfirm, &navigator).await
    } else {
        viewer.delete(&StdinConfirm, &navigator).await
    };

    match deleted {
        Ok(true) => {
            eprintln!(
                "{} deletion persistence is not deployed everywhere yet; verify server state",
                "note:".yellow().bold()
            );
            Ok(())
        }
        Ok(false) if matches!(viewer.state(), ViewState::Found { .. }) => {
            eprintln!("{}", "aborted".dimmed());
            Ok(())
        }
        Ok(false) => bail!(
            "record not found: {} '{}'",
            request.object_type,
            request.id
        ),
        Err(e) => Err(anyhow!("failed to delete record: {e}")),
    }
}

/// y/N confirmation on stdin.
struct StdinConfirm;

#[async_trait]
impl ConfirmPrompt for StdinConfirm {
    async fn confirm(&self, message: &str) -> bool {
        eprint!("{message} [y/N] ");
        let _ = io::stderr().flush();
        let mut line = String::new();
        if io::stdin().read_line(&mut line).is_err() {
            return false;
        }
        matches!(line.trim().to_ascii_lowercase().as_str(), "y" | "yes")
    }
}

struct AlwaysConfirm;

#[async_trait]
impl ConfirmPrompt for AlwaysConfirm {
    async fn confirm(&self, _message: &str) -> bool {
        true
    }
}

/// There is no page to route to from a terminal; print the collection route
/// the web surface would navigate to.
struct PrintingNavigator;

#[async_trait]
impl Navigator for PrintingNavigator {
    async fn go_to_collection(&self, object_type: &str) {
        println!("→ /instances/{object_type}");
    }
}
