mod alerts;
mod scrape;
mod watch;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "snkrhub")]
#[command(about = "Sneaker listing tracker: scrape, normalize, watch prices")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Scrape one or more articles, trying brands in the given order.
    Scrape {
        /// Article ids to scrape, e.g. `DX1234`.
        #[arg(required = true)]
        articles: Vec<String>,
        /// Ordered, comma-separated brand fallback list.
        #[arg(long, value_delimiter = ',', default_value = "Adidas,Nike")]
        brands: Vec<String>,
    },
    /// Register (or re-price) a price-drop alert for a tracked article.
    Alert {
        article: String,
        chat_id: String,
        desired_price: String,
    },
    /// Report every alert whose threshold is currently met.
    CheckPrices,
    /// Print the recorded price history for an article.
    History { article: String },
    /// List every tracked shoe, most recently updated first.
    List,
    /// Run the recurring snapshot and price-check jobs until interrupted.
    Watch,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = snkrhub_core::load_app_config_from_env()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.log_level.clone())),
        )
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Scrape { articles, brands } => scrape::run(&config, articles, brands).await,
        Commands::Alert {
            article,
            chat_id,
            desired_price,
        } => alerts::add(&config, &article, &chat_id, &desired_price).await,
        Commands::CheckPrices => alerts::check_prices(&config).await,
        Commands::History { article } => alerts::history(&config, &article).await,
        Commands::List => alerts::list(&config).await,
        Commands::Watch => watch::run(&config).await,
    }
}
