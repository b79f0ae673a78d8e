use std::collections::BTreeMap;

use maud::{html, Markup, PreEscaped};
use poem::handler;
use poem::http::StatusCode;
use poem::web::{Data, Form, Html, Query};
use serde::Deserialize;

use crate::catalog::Catalog;
use crate::client::SharedService;
use crate::form::{build_document, FormController, FORM_ID, RESULTS_SELECTOR, SUBMIT_LABEL};
use crate::globals::fill_example;
use crate::page::{Event, Page};
use crate::prelude::*;
use crate::web::partials::ReadyPage;

const PATH: &str = "/predict";

#[derive(Deserialize)]
pub struct Params {
    example: Option<String>,
}

/// Renders the empty form, pre-filled from an example profile when asked.
#[handler]
#[instrument(level = "info", skip_all)]
pub async fn get(
    Query(params): Query<Params>,
    Data(catalog): Data<&Arc<Catalog>>,
) -> poem::Result<Html<String>> {
    let (mut document, _) = build_document(
        PATH,
        catalog.fields.iter().map(|field| (field.name.as_str(), "")),
    );
    if let Some(example) = &params.example {
        fill_example(&mut document, catalog, example)
            .map_err(|error| poem::Error::from_string(format!("{:#}", error), StatusCode::BAD_REQUEST))?;
    }
    let values = catalog
        .fields
        .iter()
        .filter_map(|field| {
            let input = document.get(document.get_element_by_id(&field.name)?)?;
            Some((field.name.as_str(), input.value.as_str()))
        })
        .collect();
    render(catalog, render_form(catalog, &values)).await
}

/// Submits the posted form through the headless page and shows what the
/// controller put into the results card.
#[handler]
#[instrument(level = "info", skip_all)]
pub async fn post(
    Form(fields): Form<Vec<(String, String)>>,
    Data(service): Data<&SharedService>,
    Data(catalog): Data<&Arc<Catalog>>,
) -> poem::Result<Html<String>> {
    let (document, form) = build_document(
        PATH,
        fields.iter().map(|(name, value)| (name.as_str(), value.as_str())),
    );
    let mut page = Page::new(document)
        .with(FormController::new(Arc::clone(service), Arc::clone(catalog)));
    page.ready().await?;
    let dispatch = page.dispatch(Event::Submit { target: form }).await?;
    debug!(dispatch.default_prevented, n_effects = dispatch.effects.len());

    let results = page
        .document()
        .query_selector(RESULTS_SELECTOR)?
        .and_then(|results| page.document().get(results))
        .map(|results| results.inner_html.clone())
        .ok_or_else(|| anyhow!("the results card has disappeared"))?;
    render(catalog, PreEscaped(results)).await
}

async fn render(catalog: &Catalog, card_body: Markup) -> poem::Result<Html<String>> {
    let ready = ReadyPage::new(PATH, &["display-5 fw-bold mb-4"], &[]).await?;
    let markup = ready.render("Predicción", html! {
        div.row.justify-content-center {
            div."col-lg-8" {
                h1 class=(ready.title_class(0)) {
                    i.fas.fa-magic."me-2" {}
                    "Predicción de Segmento"
                }
                div.card.shadow {
                    div.card-body."p-4" { (card_body) }
                }
                div."mt-4" {
                    h6.text-muted { "Ejemplos:" }
                    @for example in &catalog.examples {
                        a.btn.btn-outline-secondary.btn-sm."me-2"."mb-2" href={ (PATH) "?example=" (example.key) } {
                            (example.title)
                        }
                    }
                }
            }
        }
    });
    Ok(Html(markup.into_string()))
}

fn render_form(catalog: &Catalog, values: &BTreeMap<&str, &str>) -> Markup {
    html! {
        form id=(FORM_ID) method="post" action=(PATH) {
            div.row {
                @for field in &catalog.fields {
                    div."col-md-6"."mb-3" {
                        label.form-label for=(field.name) { (field.label) }
                        input.form-control
                            type="number"
                            step="any"
                            id=(field.name)
                            name=(field.name)
                            value=(values.get(field.name.as_str()).copied().unwrap_or_default())
                            required;
                    }
                }
            }
            div.d-grid {
                button.btn.btn-primary.btn-lg type="submit" { (SUBMIT_LABEL) }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::Ordering;

    use poem::http::StatusCode;

    use crate::client::fake::FakeService;
    use crate::client::PredictionError;
    use crate::prelude::*;
    use crate::web::test::{create_test_client, premium, read_body};

    #[tokio::test]
    async fn get_ok() -> Result {
        let response = create_test_client(FakeService::new(|| Ok(premium())))?
            .get("/predict")
            .send()
            .await;
        response.assert_status_is_ok();
        let body = read_body(response).await?;
        assert!(body.contains(r#"<form id="predictionForm" method="post" action="/predict">"#));
        assert!(body.contains(r#"name="Annual_Income_(k$)" value="""#));
        assert!(body.contains(r#"href="/predict?example=premium""#));
        assert!(body.contains(r#"<a class="nav-link active" href="/predict">"#));
        Ok(())
    }

    #[tokio::test]
    async fn get_example_ok() -> Result {
        let response = create_test_client(FakeService::new(|| Ok(premium())))?
            .get("/predict?example=joven")
            .send()
            .await;
        response.assert_status_is_ok();
        let body = read_body(response).await?;
        assert!(body.contains(r#"id="Age" name="Age" value="25""#));
        Ok(())
    }

    #[tokio::test]
    async fn get_unknown_example_ok() -> Result {
        let response = create_test_client(FakeService::new(|| Ok(premium())))?
            .get("/predict?example=vip")
            .send()
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
        assert!(read_body(response).await?.contains("unknown example profile"));
        Ok(())
    }

    #[tokio::test]
    async fn post_ok() -> Result {
        let service = FakeService::new(|| Ok(premium()));
        let response = create_test_client(service.clone())?
            .post("/predict")
            .form(&[("Age", "45"), ("Spending_Score", "75")])
            .send()
            .await;
        response.assert_status_is_ok();

        let body = read_body(response).await?;
        assert!(body.contains("Clientes Premium"));
        assert!(body.contains("250 clientes (12.5%)"));
        assert!(!body.contains(r#"id="predictionForm""#));
        assert_eq!(service.n_calls.load(Ordering::SeqCst), 1);
        assert_eq!(service.requests.lock().unwrap()[0].get("Age"), Some(45.0));
        Ok(())
    }

    #[tokio::test]
    async fn post_invalid_field_ok() -> Result {
        let service = FakeService::new(|| Ok(premium()));
        let response = create_test_client(service.clone())?
            .post("/predict")
            .form(&[("Age", "cuarenta")])
            .send()
            .await;
        response.assert_status_is_ok();
        assert!(read_body(response).await?.contains("Valor inválido para Age"));
        assert_eq!(service.n_calls.load(Ordering::SeqCst), 0);
        Ok(())
    }

    #[tokio::test]
    async fn post_server_error_ok() -> Result {
        let service = FakeService::new(|| {
            Err(PredictionError::Server {
                status: StatusCode::BAD_REQUEST,
                message: "Faltan features".to_string(),
            })
        });
        let response = create_test_client(service)?
            .post("/predict")
            .form(&[("Age", "45")])
            .send()
            .await;
        response.assert_status_is_ok();
        let body = read_body(response).await?;
        assert!(body.contains("Error en la predicción: Faltan features"));
        assert!(body.contains("Intentar Nuevamente"));
        Ok(())
    }
}
