//! # Seed Data Generator
//!
//! Fills the database with sample departments and sellers for development.
//!
//! ## Usage
//! ```bash
//! # 20 sellers (default), connection from ./db.toml or in-memory
//! cargo run -p salesdesk-db --features seed --bin seed
//!
//! # Custom amount and config file
//! cargo run -p salesdesk-db --features seed --bin seed -- --sellers 200 --config ./data/db.toml
//! ```
//!
//! ## Generated Data
//! - One department per entry in `DEPARTMENTS`
//! - Sellers spread round-robin across those departments, each with:
//!   - Name from `FIRST_NAMES` plus a sequence number
//!   - Email: `{first}.{n}@salesdesk.test`
//!   - Birth date between 1960 and 2001
//!   - Base salary: 1500.00 - 4999.00
//!
//! Everything goes through `DepartmentService` / `SellerService`, the same
//! path a front end uses.

use std::env;
use std::path::Path;
use std::sync::Arc;

use chrono::NaiveDate;
use salesdesk_core::validation::{validate_department, validate_seller};
use salesdesk_core::{Department, Money, Seller};
use salesdesk_db::config::DEFAULT_CONFIG_FILE;
use salesdesk_db::{
    schema, ConnectionProvider, DaoFactory, DepartmentService, FileConfig, SellerService,
};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

const DEPARTMENTS: &[&str] = &["Computers", "Electronics", "Fashion", "Books"];

const FIRST_NAMES: &[&str] = &[
    "Bob", "Maria", "Alex", "Martha", "Donald", "Alex", "Ann", "Carl", "Lucy", "Peter",
];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args: Vec<String> = env::args().collect();

    let mut sellers_count: usize = 20;
    let mut config_path: Option<String> = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--sellers" | "-n" => {
                if i + 1 < args.len() {
                    sellers_count = args[i + 1].parse().unwrap_or(20);
                    i += 1;
                }
            }
            "--config" | "-c" => {
                if i + 1 < args.len() {
                    config_path = Some(args[i + 1].clone());
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("SalesDesk Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -n, --sellers <N>     Number of sellers to generate (default: 20)");
                println!("  -c, --config <PATH>   Connection config file (default: ./db.toml)");
                println!("  -h, --help            Show this help message");
                return Ok(());
            }
            other => warn!(argument = other, "Ignoring unknown argument"),
        }
        i += 1;
    }

    let factory = DaoFactory::new(Arc::new(open_provider(config_path)));
    schema::install(factory.provider()).await?;

    let departments = DepartmentService::from_factory(&factory);
    let sellers = SellerService::from_factory(&factory);

    // Departments
    let mut saved = Vec::with_capacity(DEPARTMENTS.len());
    for name in DEPARTMENTS {
        let mut department = Department::new(*name);
        validate_department(&department)?;
        departments.save_or_update(&mut department).await?;
        saved.push(Arc::new(department));
    }
    info!(count = saved.len(), "Departments inserted");

    // Sellers
    let start = std::time::Instant::now();
    let mut generated = 0;
    for n in 0..sellers_count {
        let department = saved[n % saved.len()].clone();
        let mut seller = generate_seller(n, department);

        if let Err(errors) = validate_seller(&seller) {
            for error in errors.iter() {
                warn!(seller = %seller.name, field = error.field(), %error, "Invalid field");
            }
            warn!(seller = %seller.name, "Skipping invalid seller");
            continue;
        }
        sellers.save_or_update(&mut seller).await?;
        generated += 1;
    }
    info!(count = generated, elapsed = ?start.elapsed(), "Sellers inserted");

    // Per-department summary
    for department in &saved {
        let members = sellers.find_all_by_department(department).await?;
        let payroll: Money = members.iter().map(|s| s.base_salary).sum();
        let summary = serde_json::json!({
            "department": department.name,
            "sellers": members.len(),
            "payroll": payroll.to_string(),
        });
        info!("{}", serde_json::to_string(&summary)?);
    }

    factory.provider().close_connection().await?;
    info!("Seed complete");

    Ok(())
}

/// Uses `path` when given, then `./db.toml` if present, else an in-memory database.
fn open_provider(path: Option<String>) -> ConnectionProvider {
    match path {
        Some(path) => file_provider(FileConfig::new(path)),
        None if Path::new(DEFAULT_CONFIG_FILE).exists() => file_provider(FileConfig::default()),
        None => {
            warn!("No config file found, seeding an in-memory database");
            ConnectionProvider::in_memory()
        }
    }
}

fn file_provider(config: FileConfig) -> ConnectionProvider {
    info!(config = %config.path().display(), "Using config file");
    ConnectionProvider::new(config)
}

/// Generates one seller from its sequence number.
fn generate_seller(n: usize, department: Arc<Department>) -> Seller {
    let first = FIRST_NAMES[n % FIRST_NAMES.len()];
    let name = format!("{} {}", first, n + 1);
    let email = format!("{}.{}@salesdesk.test", first.to_lowercase(), n + 1);

    let year = 1960 + (n * 7 % 42) as i32;
    let month = 1 + (n % 12) as u32;
    let day = 1 + (n * 3 % 28) as u32;
    let birth_date = NaiveDate::from_ymd_opt(year, month, day).unwrap_or(NaiveDate::MIN);

    // 1500.00 - 4999.00
    let base_salary = Money::from_major_minor(1500 + (n * 137 % 3500) as i64, 0);

    Seller::new(name, email, birth_date, base_salary, department)
}
