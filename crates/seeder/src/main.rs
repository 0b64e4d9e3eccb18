//! Seeder entry point.

use doc_store::CouchDbStore;
use fixtures::{FixtureGenerator, WordLists};
use seeder::{Config, Seeder, summary_lines};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() {
    // 1. Initialize tracing
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env();
    tracing::info!(
        url = %config.couchdb_url,
        database = %config.database,
        customers = config.customer_count,
        "starting seeding run"
    );

    // 2. Load word lists before any database mutation
    let words = match WordLists::load(&config.fixtures_dir) {
        Ok(words) => words,
        Err(error) => {
            tracing::error!(%error, "failed to load word lists");
            std::process::exit(1);
        }
    };

    // 3. Build the store client and the pipeline
    let store = CouchDbStore::new(config.couchdb_url.clone(), config.database.clone());
    let mut seeder = Seeder::new(store, FixtureGenerator::new(words))
        .views_dir(&config.views_dir)
        .customer_count(config.customer_count);

    // 4. Run and report
    match seeder.run().await {
        Ok(summary) => {
            println!();
            for line in summary_lines(&summary) {
                println!("{line}");
            }
            println!();
            println!("Done!");
        }
        Err(error) => {
            tracing::error!(%error, "seeding run aborted");
            std::process::exit(1);
        }
    }
}
