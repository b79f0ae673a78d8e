//! CLI options.

use std::net::IpAddr;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::prelude::*;

#[derive(Parser)]
#[command(author, version, about)]
pub struct Opts {
    /// Sentry DSN
    #[arg(long, env = "SEGMENTATION_DASHBOARD_SENTRY_DSN")]
    pub sentry_dsn: Option<String>,

    /// Performance monitoring sample rate for Sentry
    #[arg(long, default_value = "0", env = "SEGMENTATION_DASHBOARD_TRACES_SAMPLE_RATE")]
    pub traces_sample_rate: f32,

    #[command(subcommand)]
    pub subcommand: Command,
}

#[derive(Subcommand)]
pub enum Command {
    Web(WebOpts),
    Predict(PredictOpts),
}

/// Runs the web front-end
#[derive(Args)]
pub struct WebOpts {
    #[command(flatten)]
    pub service: ServiceOpts,

    /// Web application bind host
    #[arg(long, default_value = "::", env = "SEGMENTATION_DASHBOARD_HOST")]
    pub host: IpAddr,

    /// Web application bind port
    #[arg(short, long, default_value = "8081", env = "SEGMENTATION_DASHBOARD_PORT")]
    pub port: u16,
}

/// Submits a single prediction form and prints the outcome
#[derive(Args)]
pub struct PredictOpts {
    #[command(flatten)]
    pub service: ServiceOpts,

    /// Example profile to pre-fill the form with (e.g. `premium`)
    #[arg(short, long)]
    pub example: Option<String>,

    /// Overrides a form field, may be repeated
    #[arg(short, long = "field", value_name = "NAME=VALUE", value_parser = parse_field)]
    pub fields: Vec<(String, String)>,
}

/// Prediction service connection options.
#[derive(Args, Clone)]
pub struct ServiceOpts {
    /// Remote prediction endpoint
    #[arg(
        long,
        default_value = "http://127.0.0.1:5000/api/predict",
        env = "SEGMENTATION_DASHBOARD_ENDPOINT"
    )]
    pub endpoint: String,

    /// Prediction request timeout, unlimited when omitted
    #[arg(long, value_parser = humantime::parse_duration, env = "SEGMENTATION_DASHBOARD_TIMEOUT")]
    pub timeout: Option<StdDuration>,

    /// Catalog JSON file or http(s) URL, the bundled catalog is used when omitted
    #[arg(long, env = "SEGMENTATION_DASHBOARD_CATALOG")]
    pub catalog: Option<CatalogSource>,
}

#[derive(Clone, Debug, PartialEq)]
pub enum CatalogSource {
    Path(PathBuf),
    Url(String),
}

impl std::str::FromStr for CatalogSource {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self> {
        if value.is_empty() {
            bail!("the catalog source must not be empty");
        }
        if value.starts_with("http://") || value.starts_with("https://") {
            Ok(Self::Url(value.to_string()))
        } else {
            Ok(Self::Path(PathBuf::from(value)))
        }
    }
}

fn parse_field(value: &str) -> Result<(String, String)> {
    let (name, value) = value
        .split_once('=')
        .ok_or_else(|| anyhow!("`{}` is not a `NAME=VALUE` pair", value))?;
    if name.is_empty() {
        bail!("the field name must not be empty");
    }
    Ok((name.to_string(), value.to_string()))
}
