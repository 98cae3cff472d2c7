use clap::{Parser, Subcommand};
use meal_sms::config::{CatalogConfig, Config};
use meal_sms::constants::DEFAULT_PORT;
use meal_sms::logging;
use meal_sms::notifier::{ConsoleNotifier, Notifier, TwilioNotifier};
use meal_sms::server;
use meal_sms::storage::Storage;
use meal_sms::tasks;
use std::sync::Arc;
use tracing::error;

#[cfg(not(feature = "db"))]
use meal_sms::storage::InMemoryStorage;

#[derive(Parser)]
#[command(name = "meal_sms")]
#[command(about = "Meal catalog and weekly shopping-list SMS service")]
#[command(version = "0.1.0")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP API for adding and listing meals
    Serve {
        /// Port to bind
        #[arg(long, default_value_t = DEFAULT_PORT)]
        port: u16,
    },
    /// Select this week's meals and text the shopping list
    Notify {
        /// Number of meals to draw (overrides MEAL_COUNT)
        #[arg(long)]
        count: Option<usize>,
        /// Print the shopping list instead of sending it
        #[arg(long)]
        dry_run: bool,
    },
}

#[cfg(feature = "db")]
async fn build_storage(
    meal_table: &str,
) -> Result<Arc<dyn Storage>, Box<dyn std::error::Error>> {
    let storage = meal_sms::db::LibsqlStorage::from_env(meal_table).await?;
    storage.run_migrations().await?;
    Ok(Arc::new(storage))
}

#[cfg(not(feature = "db"))]
async fn build_storage(
    _meal_table: &str,
) -> Result<Arc<dyn Storage>, Box<dyn std::error::Error>> {
    println!("⚠️  Built without the db feature, using in-memory storage");
    Ok(Arc::new(InMemoryStorage::new()))
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();
    logging::init_logging();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { port } => {
            let catalog = CatalogConfig::from_env()?;
            let storage = build_storage(&catalog.meal_table).await?;
            server::start_server(storage, port).await?;
        }
        Commands::Notify { count, dry_run } => {
            println!("🍽  Drawing this week's meals...");

            let (storage, notifier, to, meal_count) = if dry_run {
                let catalog = CatalogConfig::from_env()?;
                let storage = build_storage(&catalog.meal_table).await?;
                let notifier: Arc<dyn Notifier> = Arc::new(ConsoleNotifier);
                (storage, notifier, "dry-run".to_string(), catalog.meal_count)
            } else {
                let config = Config::from_env()?;
                let storage = build_storage(&config.catalog.meal_table).await?;
                let notifier: Arc<dyn Notifier> = Arc::new(TwilioNotifier::new(&config.delivery));
                (
                    storage,
                    notifier,
                    config.delivery.customer_phone,
                    config.catalog.meal_count,
                )
            };
            let meal_count = count.unwrap_or(meal_count);

            match tasks::notify_run(storage, notifier, &to, meal_count).await {
                Ok(result) => {
                    println!("✅ Shopping list delivered");
                    println!("   Meals in catalog: {}", result.meals_in_catalog);
                    println!("   Meals selected:   {}", result.meals_selected);
                    println!("   List lines:       {}", result.lines);
                    println!("   Recipient:        {}", result.recipient);
                }
                Err(e) => {
                    error!("Notify run failed: {}", e);
                    println!("❌ Notify run failed: {e}");
                    std::process::exit(1);
                }
            }
        }
    }
    Ok(())
}
