//! Command-line front: fills the headless form, submits it once and prints
//! the outcome.

use crate::catalog::Catalog;
use crate::client::{PredictionClient, SharedService};
use crate::form::{build_document, serialize, FormController, Outcome};
use crate::globals::fill_example;
use crate::helpers::format::{format_currency, format_number};
use crate::helpers::tracing::format_elapsed;
use crate::models::PredictionResult;
use crate::opts::PredictOpts;
use crate::prelude::*;

pub async fn run(opts: PredictOpts) -> Result {
    let start_instant = Instant::now();
    let catalog = Arc::new(Catalog::load(opts.service.catalog.as_ref()).await?);
    let service: SharedService = Arc::new(PredictionClient::from_opts(&opts.service)?);

    let (mut document, form) = build_document(
        "/predict",
        catalog.fields.iter().map(|field| (field.name.as_str(), "")),
    );
    if let Some(example) = &opts.example {
        fill_example(&mut document, &catalog, example)?;
    }
    for (name, value) in &opts.fields {
        let input = document
            .get_element_by_id(name)
            .and_then(|input| document.get_mut(input))
            .ok_or_else(|| anyhow!("the form has no `{}` field", name))?;
        input.value = value.clone();
    }

    let controller = FormController::new(service, Arc::clone(&catalog));
    let outcome = controller.predict(&serialize(&document, form)).await;
    info!(elapsed = format_elapsed(start_instant).as_str(), "finished");

    match outcome {
        Outcome::Success(result) => {
            println!("{}", summarize(&result, catalog.recommend(&result.cluster_name)));
            Ok(())
        }
        Outcome::Failure(error) => Err(error).context("Error en la predicción"),
    }
}

fn summarize(result: &PredictionResult, recommendation: &str) -> String {
    let info = &result.segment_info;
    format!(
        "Segmento: {}\n\
         Tamaño del segmento: {} clientes ({} %)\n\
         Edad promedio: {} años\n\
         Ingreso promedio: {}\n\
         Gasto promedio: {} puntos\n\
         Recomendación: {}",
        result.cluster_name,
        format_number(info.size as f64),
        format_number(round_to_tenths(info.percentage)),
        format_number(round_to_tenths(info.avg_age)),
        format_currency(info.avg_income * 1000.0),
        format_number(round_to_tenths(info.avg_spending)),
        recommendation,
    )
}

fn round_to_tenths(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SegmentInfo;

    #[test]
    fn summarize_ok() {
        let result = PredictionResult {
            cluster_number: None,
            cluster_name: "Clientes Jóvenes".to_string(),
            segment_info: SegmentInfo {
                size: 12500,
                percentage: 62.5,
                avg_age: 24.94,
                avg_income: 40.5,
                avg_spending: 60.25,
            },
        };
        let summary = summarize(&result, "Campañas en redes sociales");
        assert_eq!(
            summary,
            "Segmento: Clientes Jóvenes\n\
             Tamaño del segmento: 12.500 clientes (62,5 %)\n\
             Edad promedio: 24,9 años\n\
             Ingreso promedio: 40.500,00\u{a0}US$\n\
             Gasto promedio: 60,3 puntos\n\
             Recomendación: Campañas en redes sociales",
        );
    }

    #[test]
    fn round_to_tenths_ok() {
        assert_eq!(round_to_tenths(44.96), 45.0);
        assert_eq!(round_to_tenths(3.0), 3.0);
    }
}
