use tickplot_core::{parse_metrics, Symbol, YahooSource};

use crate::cli::QuoteArgs;
use crate::error::CliError;
use crate::format;

pub async fn run(args: &QuoteArgs, source: &YahooSource) -> Result<(), CliError> {
    let symbol = Symbol::parse(&args.symbol)?;
    let metrics = parse_metrics(&source.fetch_quote_json(&symbol).await);
    println!("{}", format::price(&metrics, args.markdown));
    Ok(())
}
