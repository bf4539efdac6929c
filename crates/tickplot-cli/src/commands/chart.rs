use tickplot_core::{ChartRequest, ChartService, Symbol};

use crate::cli::ChartArgs;
use crate::error::CliError;

pub async fn run(args: &ChartArgs, service: &ChartService) -> Result<(), CliError> {
    let symbol = Symbol::parse(&args.symbol)?;

    let outcome = service
        .render_chart(ChartRequest {
            symbol,
            period: args.period.clone(),
            kind: args.kind.into(),
            mode: args.mode.into(),
        })
        .await?;

    for note in &outcome.notes {
        println!("{note}");
    }
    println!("{}", outcome.artifact.display());
    Ok(())
}
