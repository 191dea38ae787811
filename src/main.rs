//! Wiring & DI. Entry point: bootstrap adapters, inject into use cases, run UI.
//! No business logic here.

use dotenv::dotenv;
use equilibrio::adapters::persistence::{
    InMemoryCategoryRepository, InMemoryTransactionRepository, SqliteRepo,
    seed_default_categories,
};
use equilibrio::adapters::ui::tui::{TuiInputPort, UseCases};
use equilibrio::adapters::uid::UuidGenerator;
use equilibrio::ports::{CategoryRepository, InputPort, TransactionRepository, UidGenerator};
use equilibrio::shared::config::{AppConfig, StorageBackend};
use equilibrio::usecases::{
    CreateCategory, CreateTransaction, GetAllCategories, GetAllTransactions, GetBalance,
    GetFilteredTransactions,
};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let env_loaded = dotenv();
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    match &env_loaded {
        Ok(path) => info!(path = %path.display(), "loaded .env"),
        Err(_) => info!(cwd = %cwd.display(), "no .env found (check CWD)"),
    }

    equilibrio::adapters::ui::init_ui();

    let cfg = AppConfig::load().unwrap_or_else(|e| {
        warn!(error = %e, "config not loaded, using defaults");
        AppConfig::default()
    });
    let backend = cfg
        .storage_or_default()
        .map_err(|e| anyhow::anyhow!("{}", e))?;

    // --- Storage ---
    let (transactions, categories): (Arc<dyn TransactionRepository>, Arc<dyn CategoryRepository>) =
        match backend {
            StorageBackend::Sqlite => {
                let data_path = cfg.data_dir_or_default();
                let sqlite_repo = Arc::new(
                    SqliteRepo::connect(&data_path)
                        .await
                        .map_err(|e| anyhow::anyhow!("SQLite connect failed: {}", e))?,
                );
                info!(path = %sqlite_repo.db_path().display(), "using SQLite storage");
                (
                    Arc::clone(&sqlite_repo) as Arc<dyn TransactionRepository>,
                    sqlite_repo as Arc<dyn CategoryRepository>,
                )
            }
            StorageBackend::Memory => {
                warn!("using in-memory storage; data is lost on exit");
                (
                    Arc::new(InMemoryTransactionRepository::new()),
                    Arc::new(InMemoryCategoryRepository::new()),
                )
            }
        };

    if cfg.seed_default_categories_or_default() {
        seed_default_categories(categories.as_ref())
            .await
            .map_err(|e| anyhow::anyhow!("{}", e))?;
    }

    // --- Use cases ---
    let uids: Arc<dyn UidGenerator> = Arc::new(UuidGenerator::new());
    let use_cases = Arc::new(UseCases {
        create_transaction: CreateTransaction::new(Arc::clone(&transactions), Arc::clone(&uids)),
        get_all_transactions: GetAllTransactions::new(Arc::clone(&transactions)),
        get_filtered_transactions: GetFilteredTransactions::new(Arc::clone(&transactions)),
        create_category: CreateCategory::new(Arc::clone(&categories), Arc::clone(&uids)),
        get_all_categories: GetAllCategories::new(Arc::clone(&categories)),
        get_balance: GetBalance::new(Arc::clone(&transactions)),
    });

    let input_port: Arc<dyn InputPort> =
        Arc::new(TuiInputPort::new(use_cases, cfg.page_size_or_default()));

    input_port
        .run()
        .await
        .map_err(|e| anyhow::anyhow!("{}", e))?;

    info!("bye");
    Ok(())
}
