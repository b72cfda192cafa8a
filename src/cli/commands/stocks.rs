//! List known stocks.

use anyhow::Result;
use stockstudy_config::AppConfig;
use stockstudy_data::StockCatalog;

use crate::cli::StocksArgs;

pub async fn run(args: StocksArgs, config: &AppConfig) -> Result<()> {
    let catalog = StockCatalog::with_fallback(config.catalog.stocks.clone());

    let stocks = catalog.search(&args.query, args.limit);
    if stocks.is_empty() {
        println!("No stocks match {:?}", args.query);
        return Ok(());
    }

    println!("{:<10} {:<6} Name", "Symbol", "Exch");
    println!("{}", "-".repeat(32));
    for stock in stocks {
        println!(
            "{:<10} {:<6} {}",
            stock.symbol,
            stock.exchange.as_deref().unwrap_or("-"),
            stock.name
        );
    }

    Ok(())
}
