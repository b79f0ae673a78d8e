use clap::Parser;
use segmentation_dashboard::helpers::tracing;
use segmentation_dashboard::opts::{Command, Opts};
use segmentation_dashboard::prelude::*;
use segmentation_dashboard::{predict, web};

#[tokio::main]
async fn main() -> Result {
    let opts = Opts::parse();
    let _sentry_guard = tracing::init(opts.sentry_dsn, opts.traces_sample_rate)?;
    info!(version = env!("CARGO_PKG_VERSION"), "starting up…");

    let result = match opts.subcommand {
        Command::Web(opts) => web::run(opts).await,
        Command::Predict(opts) => predict::run(opts).await,
    };
    if let Err(error) = &result {
        error!("fatal error: {:#}", error);
    }
    result
}
