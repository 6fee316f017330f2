// lightning-flashcards - study server for flashcards
//
// This is the main entry point. Parses CLI args and dispatches to handlers.

use anyhow::{Context, Result};
use lightning_flashcards_lib::{config, server, Config, Database};
use std::env;

#[tokio::main]
async fn main() -> Result<()> {
    let args: Vec<String> = env::args().collect();

    // No command means serve
    let command = args.get(1).map(String::as_str).unwrap_or("serve");

    match command {
        "serve" => handle_serve().await,
        "status" => handle_status().await,
        "version" | "-v" | "--version" => {
            println!("lightning-flashcards v{}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        "help" | "-h" | "--help" => {
            print_usage();
            Ok(())
        }
        _ => {
            eprintln!("Unknown command: {}", command);
            print_usage();
            Ok(())
        }
    }
}

async fn handle_serve() -> Result<()> {
    server::init_tracing(config::log_json_requested());

    let config = Config::load().context("failed to load configuration")?;

    server::start_server(config)
        .await
        .context("server stopped with an error")?;

    Ok(())
}

async fn handle_status() -> Result<()> {
    let config = Config::load().context("failed to load configuration")?;
    let db = Database::new(&config.db_path)
        .await
        .with_context(|| format!("failed to open {}", config.db_path.display()))?;
    let stats = db.stats().await?;

    println!("\nlightning-flashcards Status");
    println!("{}", "=".repeat(60));
    println!("\nDatabase: {}", db.path().display());
    println!("\nDatabase Statistics:");
    println!("  Flashcards:    {}", stats.total_flashcards);
    println!("  Categories:    {}", stats.total_categories);
    println!("  Progress rows: {}", stats.total_progress_rows);
    println!("  Users:         {}", stats.total_users);
    println!(
        "  Pool:          {} open, {} idle",
        stats.pool_size, stats.idle_connections
    );
    println!("\nServer address: {}", config.address());
    println!("{}", "=".repeat(60));

    db.close().await;

    Ok(())
}

fn print_usage() {
    println!(
        r#"lightning-flashcards v{} - Flip, answer, repeat

USAGE:
    lightning-flashcards [COMMAND]

COMMANDS:
    serve       Run the HTTP server (default)
    status      Show database statistics
    version     Show version
    help        Show this help

ENVIRONMENT:
    FLASHCARDS_HOST            Bind address (default: 0.0.0.0)
    FLASHCARDS_PORT            Bind port (default: 8787)
    FLASHCARDS_DB              SQLite file (default: ~/.lightning-flashcards/flashcards.db)
    FLASHCARDS_EXPOSE_ERRORS   Put error details in 500 responses (default: false)
    FLASHCARDS_LOG_JSON        Log as JSON lines (default: false)
    RUST_LOG                   Log filter (default: info)
"#,
        env!("CARGO_PKG_VERSION")
    );
}
