mod chart;
mod metrics;
mod price;

use std::sync::Arc;

use tickplot_core::http_client::ReqwestClient;
use tickplot_core::source::YahooSource;
use tickplot_core::ChartService;
use tickplot_render::PlottersRenderer;

use crate::cli::{Cli, Command};
use crate::error::CliError;

pub async fn run(cli: &Cli) -> Result<(), CliError> {
    match &cli.command {
        Command::Chart(args) => {
            let service = ChartService::new(
                yahoo_source(),
                Arc::new(PlottersRenderer::default()),
                args.out_dir.clone().into(),
            );
            chart::run(args, &service).await
        }
        Command::Price(args) => price::run(args, &yahoo_source()).await,
        Command::Metrics(args) => metrics::run(args, &yahoo_source()).await,
    }
}

fn yahoo_source() -> YahooSource {
    YahooSource::new(Arc::new(ReqwestClient::new()))
}
