use anyhow::{bail, Context, Result};
use std::env;
use std::path::PathBuf;

use swift_registry::{count_swift_codes, import_dataset, open_database, Config};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "swift_registry=info".into()),
        )
        .init();

    let args: Vec<String> = env::args().collect();
    let config = Config::from_env();

    match args.get(1).map(String::as_str) {
        Some("import") => run_import(&config, args.get(2), args.get(3)),
        Some("count") => run_count(&config, args.get(2)),
        _ => {
            print_usage();
            bail!("unknown or missing command");
        }
    }
}

fn print_usage() {
    eprintln!("swift-registry {}", swift_registry::VERSION);
    eprintln!();
    eprintln!("Usage:");
    eprintln!("  swift-registry import [dataset.xlsx|dataset.csv] [database.db]");
    eprintln!("  swift-registry count [database.db]");
    eprintln!();
    eprintln!("Defaults come from SWIFT_DATA_FILE / SWIFT_DATABASE_PATH.");
}

fn run_import(config: &Config, data_arg: Option<&String>, db_arg: Option<&String>) -> Result<()> {
    let data_path = data_arg.map(PathBuf::from).unwrap_or_else(|| config.data_file.clone());
    let db_path = db_arg
        .map(PathBuf::from)
        .unwrap_or_else(|| config.database_path.clone());

    println!("📂 Importing {}", data_path.display());
    let conn = open_database(&db_path)
        .with_context(|| format!("Failed to open database {}", db_path.display()))?;

    let report = import_dataset(&conn, &data_path)
        .with_context(|| format!("Failed to import {}", data_path.display()))?;
    let total = count_swift_codes(&conn)?;

    println!("✓ Rows read:          {}", report.rows);
    println!("✓ Inserted:           {}", report.inserted);
    println!("✓ Skipped duplicates: {}", report.duplicates);
    println!("✓ Skipped invalid:    {}", report.invalid);
    println!("✓ Database contains {} SWIFT codes", total);

    Ok(())
}

fn run_count(config: &Config, db_arg: Option<&String>) -> Result<()> {
    let db_path = db_arg
        .map(PathBuf::from)
        .unwrap_or_else(|| config.database_path.clone());

    if !db_path.exists() {
        bail!("Database not found at {}", db_path.display());
    }

    let conn = open_database(&db_path)
        .with_context(|| format!("Failed to open database {}", db_path.display()))?;
    println!("{}", count_swift_codes(&conn)?);

    Ok(())
}
