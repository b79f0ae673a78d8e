//! Server-rendered web front driving the headless page controllers.

use poem::listener::TcpListener;
use poem::middleware::{CatchPanic, Tracing};
use poem::{get, post, Endpoint, EndpointExt, Route, Server};

use crate::catalog::Catalog;
use crate::client::{PredictionClient, SharedService};
use crate::opts::WebOpts;
use crate::prelude::*;
use crate::web::middleware::{ErrorMiddleware, SentryMiddleware};

mod middleware;
mod partials;
mod views;

/// Paths under the prefix answer errors with JSON.
pub const API_PREFIX: &str = "/api/";

pub async fn run(opts: WebOpts) -> Result {
    let catalog = Arc::new(Catalog::load(opts.service.catalog.as_ref()).await?);
    let service: SharedService = Arc::new(PredictionClient::from_opts(&opts.service)?);
    let app = create_app(service, catalog);

    info!(host = %opts.host, port = opts.port, endpoint = opts.service.endpoint.as_str(), "listening…");
    Server::new(TcpListener::bind((opts.host, opts.port)))
        .run_with_graceful_shutdown(
            app,
            async {
                if let Err(error) = tokio::signal::ctrl_c().await {
                    error!("failed to listen for the shutdown signal: {:#}", error);
                }
            },
            Some(StdDuration::from_secs(10)),
        )
        .await?;
    info!("the server has stopped");
    Ok(())
}

pub fn create_app(service: SharedService, catalog: Arc<Catalog>) -> impl Endpoint {
    Route::new()
        .at("/", get(views::index::get))
        .at("/predict", get(views::predict::get).post(views::predict::post))
        .at("/api/predict", post(views::api::post_predict))
        .at("/health", get(views::api::get_health))
        .data(service)
        .data(catalog)
        .with(Tracing)
        .with(CatchPanic::new())
        .with(ErrorMiddleware)
        .with(SentryMiddleware)
}
