//! Static presentation data: marketing recommendations, example profiles,
//! form fields and index counters.
//!
//! Kept as plain JSON so that deployments and tests can substitute their own.

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::client::fetch_json;
use crate::opts::CatalogSource;
use crate::prelude::*;

const BUNDLED: &str = include_str!("catalog/default.json");

#[derive(Deserialize, Debug, Clone)]
pub struct Catalog {
    /// Matched in order, the first fragment contained in the segment name wins.
    pub recommendations: Vec<Recommendation>,

    pub default_recommendation: String,

    pub fields: Vec<Field>,

    #[serde(default)]
    pub examples: Vec<ExampleProfile>,

    #[serde(default)]
    pub counters: Vec<Counter>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct Recommendation {
    pub key: String,
    pub text: String,
}

/// Prediction form input.
#[derive(Deserialize, Debug, Clone)]
pub struct Field {
    pub name: String,
    pub label: String,
}

#[derive(Deserialize, Debug, Clone)]
pub struct ExampleProfile {
    pub key: String,
    pub title: String,
    pub values: BTreeMap<String, f64>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct Counter {
    pub id: String,
    pub label: String,
    pub target: i64,
}

impl Catalog {
    pub fn bundled() -> Result<Self> {
        serde_json::from_str(BUNDLED).context("the bundled catalog is malformed")
    }

    #[instrument(skip_all, fields(source = ?source))]
    pub async fn load(source: Option<&CatalogSource>) -> Result<Self> {
        let catalog = match source {
            None => Self::bundled()?,
            Some(CatalogSource::Path(path)) => {
                let contents = tokio::fs::read_to_string(path)
                    .await
                    .with_context(|| format!("failed to read `{}`", path.display()))?;
                serde_json::from_str(&contents)
                    .with_context(|| format!("`{}` is not a valid catalog", path.display()))?
            }
            Some(CatalogSource::Url(url)) => {
                let client = reqwest::Client::new();
                fetch_json(client.get(url))
                    .await
                    .with_context(|| format!("failed to fetch the catalog from `{}`", url))?
            }
        };
        info!(
            n_recommendations = catalog.recommendations.len(),
            n_examples = catalog.examples.len(),
            n_fields = catalog.fields.len(),
            "catalog loaded",
        );
        Ok(catalog)
    }

    /// Looks up the marketing recommendation for the segment.
    #[must_use]
    pub fn recommend(&self, cluster_name: &str) -> &str {
        self.recommendations
            .iter()
            .find(|recommendation| cluster_name.contains(&recommendation.key))
            .map_or(&self.default_recommendation, |recommendation| &recommendation.text)
    }

    #[must_use]
    pub fn example(&self, key: &str) -> Option<&ExampleProfile> {
        self.examples.iter().find(|example| example.key == key)
    }
}
