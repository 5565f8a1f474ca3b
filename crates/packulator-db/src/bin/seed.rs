//! # Seed Data Generator
//!
//! Registers the default pack catalog for development.
//!
//! ## Usage
//! ```bash
//! # Register {250, 500, 1000, 2000, 5000} in ./packulator.db
//! cargo run -p packulator-db --bin seed
//!
//! # Specify database path
//! cargo run -p packulator-db --bin seed -- --db ./data/packulator.db
//!
//! # Register a different catalog
//! cargo run -p packulator-db --bin seed -- --sizes 23,31,53
//! ```
//!
//! Running it twice is harmless: registration returns the existing catalog.

use std::env;

use anyhow::{bail, Context};
use packulator_core::validation::validate_pack_sizes;
use packulator_db::{Database, DbConfig};

/// The catalog most deployments start from.
const DEFAULT_SIZES: &[i64] = &[250, 500, 1000, 2000, 5000];

/// Parsed command line.
#[derive(Debug, PartialEq, Eq)]
struct SeedArgs {
    db_path: String,
    raw_sizes: Vec<i64>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args: Vec<String> = env::args().skip(1).collect();

    let Some(SeedArgs { db_path, raw_sizes }) = parse_args(&args)? else {
        print_help();
        return Ok(());
    };

    let sizes = validate_pack_sizes(&raw_sizes).context("invalid pack sizes")?;

    println!("🌱 Packulator Seed");
    println!("==================");
    println!("Database: {}", db_path);
    println!("Sizes:    {:?}", sizes);
    println!();

    let db = Database::new(DbConfig::new(&db_path))
        .await
        .with_context(|| format!("opening {db_path}"))?;

    println!("✓ Connected to database");
    println!("✓ Migrations applied");

    let registration = db.catalogs().register(sizes).await?;

    if registration.created {
        println!("✓ Registered catalog {}", registration.catalog.id);
    } else {
        println!("⚠ Catalog already registered as {}", registration.catalog.id);
    }
    println!("  version_hash:  {}", registration.catalog.version_hash);
    println!("  profile_count: {}", registration.profile_count);

    let active = db.catalogs().count().await?;
    println!();
    println!("✓ Seed complete! {} active catalog(s)", active);

    db.close().await;
    Ok(())
}

/// Parses the arguments after the program name. `None` means help was asked for.
fn parse_args(args: &[String]) -> anyhow::Result<Option<SeedArgs>> {
    let mut parsed = SeedArgs {
        db_path: String::from("./packulator.db"),
        raw_sizes: DEFAULT_SIZES.to_vec(),
    };

    let mut args = args.iter();
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--db" | "-d" => {
                let Some(path) = args.next() else {
                    bail!("{arg} requires a path");
                };
                parsed.db_path = path.clone();
            }
            "--sizes" | "-s" => {
                let Some(list) = args.next() else {
                    bail!("{arg} requires a comma-separated list");
                };
                parsed.raw_sizes = parse_sizes(list)?;
            }
            "--help" | "-h" => return Ok(None),
            other => bail!("unknown argument: {other}"),
        }
    }

    Ok(Some(parsed))
}

fn print_help() {
    println!("Packulator Seed");
    println!();
    println!("Usage: seed [OPTIONS]");
    println!();
    println!("Options:");
    println!("  -d, --db <PATH>       Database file path (default: ./packulator.db)");
    println!("  -s, --sizes <LIST>    Comma-separated pack sizes (default: 250,500,1000,2000,5000)");
    println!("  -h, --help            Show this help message");
}

fn parse_sizes(list: &str) -> anyhow::Result<Vec<i64>> {
    list.split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(|part| {
            part.parse::<i64>()
                .with_context(|| format!("not a pack size: {part:?}"))
        })
        .collect()
}
