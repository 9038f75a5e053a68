mod console;

use anyhow::Context;
use brandstore_config::{load as load_config, AppConfig};
use brandstore_runtime::{telemetry, ShopServices};
use clap::{Parser, Subcommand};
use tracing::info;

#[derive(Parser)]
#[command(name = "brandstore")]
#[command(about = "Brand Store shop counter (console by default)")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the interactive console (default)
    Console,
    /// Print system statistics of a freshly seeded ledger
    Stats,
    /// List the seeded product catalogue
    Products,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    telemetry::init_tracing().context("failed to initialise tracing")?;
    let config = load_config().context("failed to load configuration")?;

    match cli.command.unwrap_or(Commands::Console) {
        Commands::Console => run_console(&config).await,
        Commands::Stats => print_stats(&config).await,
        Commands::Products => print_products(&config).await,
    }
}

fn seeded_services(config: &AppConfig) -> anyhow::Result<ShopServices> {
    let mut config = config.clone();
    config.ledger.seed_demo_data = true;
    config.ledger.latency_ms = 0;
    ShopServices::initialise(&config).context("failed to initialise shop services")
}

async fn print_stats(config: &AppConfig) -> anyhow::Result<()> {
    let services = seeded_services(config)?;
    let stats = services.ledger.system_stats().await;

    println!("=== {} ===", config.store.name);
    println!("{:<22} {}", "Total balance", stats.total_balance);
    println!("{:<22} {}", "Users", stats.total_users);
    println!("{:<22} {}", "Transactions", stats.total_transactions);
    println!("{:<22} {}", "Pending orders", stats.pending_orders);
    println!("{:<22} {}", "Pending users", stats.pending_users);
    Ok(())
}

async fn print_products(config: &AppConfig) -> anyhow::Result<()> {
    let services = seeded_services(config)?;
    let products = services.ledger.get_products().await;

    println!(
        "{:<28} {:<30} {:>10} {:>10} {:>6} {:<12}",
        "ID", "Name", "Wholesale", "Retail", "Qty", "Category"
    );
    println!("{}", "-".repeat(100));
    for product in products {
        println!(
            "{:<28} {:<30} {:>10} {:>10} {:>6} {:<12}",
            product.id,
            product.name,
            product.wholesale_price,
            product.retail_price,
            product.quantity,
            product.category
        );
    }
    Ok(())
}

async fn run_console(config: &AppConfig) -> anyhow::Result<()> {
    info!("starting interactive console");

    let services =
        ShopServices::initialise(config).context("failed to initialise shop services")?;

    let mut console = console::Console::new(services).await;
    tokio::select! {
        result = console.run() => result,
        _ = brandstore_runtime::shutdown_signal() => {
            println!();
            println!("Goodbye!");
            Ok(())
        }
    }
}
