//! Demo: Strategy Archetype Browser
//!
//! Showcases: signed requests, typed responses, error handling by kind
//!
//! Reads `ARCHETYPE_API_KEY` and `ARCHETYPE_API_SECRET` from the environment,
//! plus optional `ARCHETYPE_BASE_URL` (default http://localhost:3000) and
//! `ARCHETYPE_TIMEOUT_SECS` (default 30).
//!
//! Run: cargo run --bin fetch_archetypes -- A052

use archetype_auth::Credentials;
use archetype_rest::{ArchetypeClient, ArchetypeError, ClientConfig};
use colored::*;
use rust_decimal::Decimal;

const DEFAULT_BASE_URL: &str = "http://localhost:3000";
const DEFAULT_STRATEGY: &str = "A052";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .init();

    let strategy = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_STRATEGY.to_string());
    let base_url =
        std::env::var("ARCHETYPE_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
    let timeout_secs = match std::env::var("ARCHETYPE_TIMEOUT_SECS") {
        Ok(value) => value.parse()?,
        Err(_) => archetype_rest::client::DEFAULT_TIMEOUT_SECS,
    };

    println!("{}", "═".repeat(60).cyan());
    println!("{}", "  STRATEGY ARCHETYPE BROWSER".cyan().bold());
    println!("{}", format!("  {}", base_url).cyan());
    println!("{}", "═".repeat(60).cyan());
    println!();

    let config = ClientConfig::new(base_url, Credentials::from_env()?).with_timeout(timeout_secs);
    let client = ArchetypeClient::with_config(config)?;

    if let Err(e) = browse(&client, &strategy).await {
        eprintln!("{} {}", "✗".red(), e);
        match e {
            ArchetypeError::Auth { .. } => {
                eprintln!("  Check ARCHETYPE_API_KEY and ARCHETYPE_API_SECRET")
            }
            ArchetypeError::Api { .. } => {}
            ArchetypeError::Transport { .. } => eprintln!("  Is the API reachable at the base URL?"),
        }
        std::process::exit(1);
    }

    Ok(())
}

async fn browse(client: &ArchetypeClient, strategy: &str) -> Result<(), ArchetypeError> {
    println!("Fetching archetype IDs for strategy {}...", strategy.yellow());
    let archetypes = client.get_strategy_archetypes(strategy).await?;
    println!("{} Found {} archetypes:", "✓".green(), archetypes.len());
    for id in archetypes.iter() {
        println!("  - {}", id);
    }

    let Some(first) = archetypes.iter().next() else {
        return Ok(());
    };

    println!();
    println!("Fetching archetype {}...", first.yellow());
    let archetype = client.get_archetype(first).await?;

    println!("  {:<16} {:>12}", "SYMBOL".white().bold(), "ALLOCATION".white().bold());
    println!("  {}", "─".repeat(29));
    for (symbol, allocation) in &archetype.portfolio {
        match allocation.checked_mul(Decimal::ONE_HUNDRED) {
            Some(pct) => println!("  {:<16} {:>11.2}%", symbol.cyan(), pct),
            None => println!("  {:<16} {:>12}", symbol.cyan(), allocation),
        }
    }
    println!("  {}", "─".repeat(29));
    match archetype
        .total_allocation()
        .and_then(|total| total.checked_mul(Decimal::ONE_HUNDRED))
    {
        Some(pct) => println!("  {:<16} {:>11.2}%", "TOTAL".white().bold(), pct),
        None => println!("  {:<16} {:>12}", "TOTAL".white().bold(), "overflow".red()),
    }

    Ok(())
}
