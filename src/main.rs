use std::str::FromStr;
use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use tracing::level_filters::LevelFilter;
use tracing::{error, info};

use nft_portfolio::utils::helper::{format_address, truncate_string};
use nft_portfolio::{
    Address, AggregationPipeline, HttpDocumentFetcher, JsonRpcContractReader,
    MarketplacePriceProvider, PipelineConfig, Portfolio, PortfolioView, SortDirection, SortKey,
};

fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_level(true)
        .with_target(false)
        .with_max_level(LevelFilter::INFO)
        .init();

    dotenvy::dotenv().ok();

    tokio::runtime::Runtime::new()?.block_on(async {
        let config = PipelineConfig::from_env();

        let contract_str = std::env::var("CONTRACT_ADDRESS").unwrap_or_else(|_| {
            // Bored Ape Yacht Club, for demo purposes
            "0xbc4ca0eda7647a8ab7c2061c2e118a18a936f13d".to_string()
        });
        let wallet_str = std::env::var("WALLET_ADDRESS")
            .unwrap_or_else(|_| "0x0000000000000000000000000000000000000001".to_string());

        info!("Initializing portfolio aggregation...");
        info!("RPC URL: {}", config.rpc_url);
        info!("Gateway: {}", config.gateway_base);
        info!("Contract: {}", contract_str);
        info!("Wallet: {}", wallet_str);
        if config.marketplace_api_key.is_none() {
            info!("No MARKETPLACE_API_KEY set; price lookups may be rate-limited");
        }

        let contract = Address::from_str(&contract_str)?;
        let wallet = Address::from_str(&wallet_str)?;

        let reader = Arc::new(JsonRpcContractReader::new(
            config.rpc_url.clone(),
            config.request_timeout,
        )?);
        let fetcher = Arc::new(HttpDocumentFetcher::new(config.request_timeout)?);
        let prices = Arc::new(MarketplacePriceProvider::new(
            config.marketplace_url.clone(),
            config.marketplace_api_key.clone(),
            config.request_timeout,
        )?);

        let pipeline = AggregationPipeline::new(reader, fetcher, prices, config);
        let cancel = CancellationToken::new();

        let portfolio = match pipeline.run(&contract, &wallet, &cancel).await {
            Ok(portfolio) => portfolio,
            Err(e) => {
                error!("Aggregation failed: {:#}", e);
                return Err(e);
            }
        };

        render_portfolio(&portfolio);
        Ok(())
    })
}

fn render_portfolio(portfolio: &Portfolio) {
    info!("{}", "=".repeat(80));
    info!("PORTFOLIO");
    info!("{}", "=".repeat(80));
    info!(
        "Collection: {} ({})",
        portfolio.collection.name, portfolio.collection.symbol
    );
    info!("Contract: {}", format_address(&portfolio.collection.contract));
    info!(
        "Fetched: {}",
        portfolio.fetched_at.format("%Y-%m-%d %H:%M:%S UTC")
    );
    info!("");

    if portfolio.is_empty() {
        if portfolio.failures.is_empty() {
            info!("Wallet owns no tokens in this collection");
        } else {
            // Distinguish "owns nothing" from "enrichment failed for everything"
            info!(
                "No entries enriched; {} item(s) failed",
                portfolio.failure_count()
            );
        }
    }

    let view =
        PortfolioView::new(portfolio).sort_by(SortKey::TokenId, SortDirection::Ascending);

    for (i, entry) in view.entries().iter().enumerate() {
        info!("{}. {} (token {})", i + 1, entry.name, entry.token_id);
        if !entry.description.is_empty() {
            info!("   {}", truncate_string(&entry.description, 72));
        }
        if !entry.image_url.is_empty() {
            info!("   Image: {}", entry.image_url);
        }
        if let Some(attrs) = &entry.attributes {
            info!("   Traits: {}", attrs.len());
        }
        match &entry.price {
            Some(price) => info!("   Price: {}", price.formatted()),
            None => info!("   Price: Not listed"),
        }
        info!("");
    }

    info!("{}", "-".repeat(80));
    info!("Total entries: {}", portfolio.entry_count());
    if !portfolio.failures.is_empty() {
        info!("Skipped/degraded items: {}", portfolio.failure_count());
        for failure in &portfolio.failures {
            match failure.token_id {
                Some(token_id) => {
                    info!("  [{}] token {}: {}", failure.stage, token_id, failure.cause)
                }
                None => info!("  [{}] {}", failure.stage, failure.cause),
            }
        }
    }
    info!("{}", "=".repeat(80));
}
