use clap::{Parser, Subcommand};
use itertools::Itertools;
use promptflow::prelude::*;
use std::time::Instant;

/// Inspect a saved PromptFlow workflow library
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to the workflow library JSON file
    #[arg(short, long, default_value = "workflows.json")]
    library: String,

    /// Optional engine configuration JSON file
    #[arg(short, long)]
    config: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List saved workflows with their node and connection counts
    List,
    /// Print the execution order of a workflow
    Order {
        /// Workflow name
        name: String,
    },
    /// Re-validate a workflow and compare its stored execution order
    Check {
        /// Workflow name
        name: String,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => EngineConfig::from_file(path)
            .unwrap_or_else(|e| exit_with_error(&format!("Failed to load config: {}", e))),
        None => EngineConfig::default(),
    };

    let library = WorkflowLibrary::from_file(&cli.library).unwrap_or_else(|e| {
        exit_with_error(&format!(
            "Failed to load workflow library '{}': {}",
            cli.library, e
        ))
    });

    match cli.command {
        Command::List => list(&library),
        Command::Order { name } => order(&library, &config, &name),
        Command::Check { name } => check(&library, &config, &name),
    }
}

fn list(library: &WorkflowLibrary) {
    if library.is_empty() {
        println!("No saved workflows.");
        return;
    }
    println!("{} saved workflow(s):", library.len());
    for record in library.workflows() {
        println!(
            "  {:<32} {:>4} nodes {:>4} connections  (updated {})",
            record.name,
            record.nodes.len(),
            record.connections.len(),
            record.updated_at.format("%Y-%m-%d %H:%M")
        );
    }
}

fn order(library: &WorkflowLibrary, config: &EngineConfig, name: &str) {
    let record = require(library, name);

    let start = Instant::now();
    let mut editor = WorkflowEditor::new(config.clone());
    editor.load(record);
    let order = editor.run();
    let duration = start.elapsed();

    println!("Execution order for '{}':", record.name);
    for (step, id) in order.iter().enumerate() {
        let title = editor
            .store()
            .node(id)
            .map_or("<unknown>", |n| n.title.as_str());
        println!("  {:>3}. {} ({})", step + 1, title, id);
    }
    println!("\nResolved {} node(s) in {:?}", order.len(), duration);
}

fn check(library: &WorkflowLibrary, config: &EngineConfig, name: &str) {
    let record = require(library, name);

    let resolver = PositionResolver::new(config.collapsed_anchor_offset);
    let store = GraphStore::restore(record, resolver);
    let dropped = record
        .connections
        .iter()
        .filter(|c| store.connection(&c.id).is_none())
        .collect_vec();
    let current = store.execution_order();
    let stale = current != record.execution_order;

    println!("Workflow '{}':", record.name);
    println!("  Nodes:        {}", store.len());
    println!(
        "  Connections:  {} valid, {} invalid",
        store.connections().len(),
        dropped.len()
    );
    for connection in &dropped {
        println!(
            "    - {} ({} -> {})",
            connection.id, connection.source_node_id, connection.target_node_id
        );
    }
    if stale {
        println!("  Execution order is STALE");
        println!("    stored:  {}", record.execution_order.iter().join(", "));
        println!("    current: {}", current.iter().join(", "));
    } else {
        println!("  Execution order is up to date");
    }

    if stale || !dropped.is_empty() {
        std::process::exit(2);
    }
}

fn require<'a>(library: &'a WorkflowLibrary, name: &str) -> &'a WorkflowRecord {
    library
        .require(name)
        .unwrap_or_else(|e| exit_with_error(&e.to_string()))
}

fn exit_with_error(message: &str) -> ! {
    eprintln!("\nError: {}", message);
    std::process::exit(1);
}
