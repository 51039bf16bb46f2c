//! List indicators command.

use anyhow::Result;
use ta_core::traits::SeriesIndicator;
use ta_engine::IndicatorSuite;

fn describe<I: SeriesIndicator>(indicator: &I) {
    let fields: Vec<&str> = indicator
        .required_fields()
        .iter()
        .map(|f| f.as_str())
        .collect();
    println!(
        "  {:<12} {:>4} bars   {}",
        indicator.name(),
        indicator.min_bars(),
        fields.join(", ")
    );
}

pub async fn run() -> Result<()> {
    let suite = IndicatorSuite::default();

    println!("Indicators");
    println!("═══════════════════════════════════════════════════════════");
    println!("  {:<12} {:>9}   Columns", "Name", "Needs");
    println!("  ───────────────────────────────────────────────────────");
    describe(&suite.sma50);
    describe(&suite.macd);
    describe(&suite.rsi14);
    describe(&suite.atr);
    describe(&suite.bollinger);
    describe(&suite.vol_avg20);
    println!();
    println!("An indicator with too little history or a missing column is reported");
    println!("as null; the others are still computed.");

    Ok(())
}
