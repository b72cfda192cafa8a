//! Analyze command implementation.

use anyhow::{Context, Result};
use stockstudy_api::{AppState, StockQuery, StockResponse};
use stockstudy_config::{AppConfig, DataSourceKind};
use stockstudy_core::types::EnrichedBar;
use tracing::info;

use crate::cli::{AnalyzeArgs, OutputFormat};

pub async fn run(args: AnalyzeArgs, mut config: AppConfig) -> Result<()> {
    if let Some(dir) = &args.data {
        if !dir.is_dir() {
            anyhow::bail!(
                "Data path '{}' is not a directory. Provide a directory of <symbol>.csv files (e.g. --data ./data)",
                dir.display()
            );
        }
        config.data.source = DataSourceKind::Csv;
        config.data.csv_dir = Some(dir.clone());
    }
    // One-shot runs gain nothing from caching
    config.cache.enabled = false;

    let state = AppState::from_config(&config).context("Failed to initialize data source")?;
    let query = StockQuery {
        dividing_date: Some(args.dividing_date),
        historical_days: args.historical_days,
        future_days: args.future_days,
    };
    let request = state.resolve(&args.symbol, query)?;

    info!(
        symbol = %request.symbol,
        dividing_date = %request.dividing_date,
        source = state.source_name(),
        "Running analysis"
    );
    let response = state
        .study(&request)
        .await
        .with_context(|| format!("Analysis of {} failed", request.symbol))?;

    // Output results
    match args.output {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&response)?),
        OutputFormat::Text => println!("{}", summary(&response)),
    }

    // Save if requested
    if let Some(save_path) = &args.save {
        let json = serde_json::to_string_pretty(&response)?;
        std::fs::write(save_path, json)
            .with_context(|| format!("Failed to write {}", save_path.display()))?;
        info!("Results saved to {:?}", save_path);
    }

    Ok(())
}

fn summary(response: &StockResponse) -> String {
    let mut out = format!(
        "{} {} | dividing date {}\n",
        response.symbol, response.name, response.dividing_date
    );
    out.push_str(&section("Historical", &response.historical_data));
    out.push_str(&section("Future", &response.future_data));
    out
}

fn section(title: &str, bars: &[EnrichedBar]) -> String {
    let mut out = format!("\n{} ({} bars)\n", title, bars.len());
    let (Some(first), Some(last)) = (bars.first(), bars.last()) else {
        out.push_str("  no bars\n");
        return out;
    };

    out.push_str(&format!(
        "  {} .. {}  close {:.2} -> {:.2}\n",
        first.bar.date, last.bar.date, first.bar.close, last.bar.close
    ));

    let ind = &last.indicators;
    out.push_str(&format!(
        "  last: K {}  D {}  J {}  DIFF {}  DEA {}  MACD {}\n",
        fmt_opt(ind.k),
        fmt_opt(ind.d),
        fmt_opt(ind.j),
        fmt_opt(ind.diff),
        fmt_opt(ind.dea),
        fmt_opt(ind.macd)
    ));
    out.push_str(&format!(
        "  MA5 {}  MA10 {}  MA20 {}  MA60 {}\n",
        fmt_opt(ind.ma5),
        fmt_opt(ind.ma10),
        fmt_opt(ind.ma20),
        fmt_opt(ind.ma60)
    ));

    let count = |flag: fn(&EnrichedBar) -> bool| bars.iter().filter(|b| flag(b)).count();
    out.push_str(&format!(
        "  signals: golden {}  death {}  zero-up {}  zero-down {}\n",
        count(|b| b.indicators.golden_cross),
        count(|b| b.indicators.death_cross),
        count(|b| b.indicators.zero_cross_up),
        count(|b| b.indicators.zero_cross_down)
    ));

    out
}

fn fmt_opt(value: Option<f64>) -> String {
    value.map_or_else(|| "-".to_string(), |v| format!("{:.2}", v))
}
