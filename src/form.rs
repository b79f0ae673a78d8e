//! Prediction form controller.

use async_trait::async_trait;
use maud::{Markup, PreEscaped};

use crate::catalog::Catalog;
use crate::client::{PredictionError, SharedService};
use crate::dom::{Document, Element, ElementId};
use crate::models::{PredictionRequest, PredictionResult};
use crate::page::{Dispatch, Event, Handler};
use crate::prelude::*;
use crate::render::{render_error, render_success, SUBMIT_LOADING_LABEL};

pub use self::parse::parse_float;

mod parse;

pub const FORM_ID: &str = "predictionForm";
pub const SUBMIT_BUTTON_SELECTOR: &str = r#"button[type="submit"]"#;
pub const RESULTS_SELECTOR: &str = ".card-body";
pub const SUBMIT_LABEL: PreEscaped<&str> =
    PreEscaped(r#"<i class="fas fa-magic me-2"></i>Predecir Segmento"#);

/// Settled prediction: either a result to show or a message to report.
#[derive(Debug)]
pub enum Outcome {
    Success(PredictionResult),
    Failure(PredictionError),
}

impl Outcome {
    pub fn render(&self, catalog: &Catalog) -> Markup {
        match self {
            Self::Success(result) => render_success(result, catalog.recommend(&result.cluster_name)),
            Self::Failure(error) => render_error(&format!("Error en la predicción: {}", error)),
        }
    }
}

/// Submit button state captured before the request, restored once it settles.
#[derive(Debug, Clone, PartialEq)]
pub struct ButtonState {
    pub label: String,
    pub disabled: bool,
}

impl ButtonState {
    /// Saves the current state and switches the button into loading.
    pub fn begin_loading(button: &mut Element) -> Self {
        let saved = Self {
            label: std::mem::replace(&mut button.inner_html, SUBMIT_LOADING_LABEL.0.to_string()),
            disabled: button.disabled,
        };
        button.disabled = true;
        saved
    }

    pub fn restore(self, button: &mut Element) {
        button.inner_html = self.label;
        button.disabled = self.disabled;
    }
}

/// Reads every named form control inside the form and parses it as a number.
/// Values that are not numbers become `NaN`.
pub fn serialize(document: &Document, form: ElementId) -> PredictionRequest {
    document
        .descendants(form)
        .filter_map(|id| document.get(id))
        .filter(|element| element.is_form_control())
        .filter_map(|element| {
            let name = element.attribute("name")?;
            Some((name, parse_float(&element.value)))
        })
        .collect()
}

/// Builds the headless prediction page: a results card wrapping the form,
/// one named input per field and the submit button.
pub fn build_document<'a>(
    path: &str,
    fields: impl IntoIterator<Item = (&'a str, &'a str)>,
) -> (Document, ElementId) {
    let mut document = Document::new(path);
    let card = document.append(None, Element::new("div").class("card"));
    let body = document.append(Some(card), Element::new("div").class("card-body"));
    let form = document.append(Some(body), Element::new("form").id(FORM_ID));
    for (name, value) in fields {
        document.append(
            Some(form),
            Element::new("input")
                .id(name)
                .attr("name", name)
                .attr("type", "number")
                .with_value(value),
        );
    }
    document.append(
        Some(form),
        Element::new("button")
            .attr("type", "submit")
            .html(SUBMIT_LABEL.0),
    );
    (document, form)
}

pub struct FormController {
    service: SharedService,
    catalog: Arc<Catalog>,
}

impl FormController {
    pub fn new(service: SharedService, catalog: Arc<Catalog>) -> Self {
        Self { service, catalog }
    }

    /// Validates and sends the request. Never fails: errors become [`Outcome::Failure`].
    #[instrument(skip_all)]
    pub async fn predict(&self, request: &PredictionRequest) -> Outcome {
        if let Some(field) = request.first_invalid_field() {
            info!(field, "invalid numeric field, not sending");
            return Outcome::Failure(PredictionError::InvalidField {
                field: field.to_string(),
            });
        }
        match self.service.predict(request).await {
            Ok(result) => {
                info!(cluster_name = %result.cluster_name, "predicted");
                Outcome::Success(result)
            }
            Err(error) => {
                warn!("prediction has failed: {:#}", error);
                Outcome::Failure(error)
            }
        }
    }

    async fn submit(&self, form: ElementId, document: &mut Document) -> Result {
        let button = document.query_selector_within(form, SUBMIT_BUTTON_SELECTOR)?;
        let saved = button
            .and_then(|button| document.get_mut(button))
            .map(ButtonState::begin_loading);

        let outcome = self.predict(&serialize(document, form)).await;

        match document.query_selector(RESULTS_SELECTOR)? {
            Some(results) => {
                if let Some(results) = document.get_mut(results) {
                    results.inner_html = outcome.render(&self.catalog).into_string();
                }
            }
            None => warn!("no results container on the page"),
        }

        if let (Some(saved), Some(button)) = (saved, button.and_then(|button| document.get_mut(button))) {
            saved.restore(button);
        }
        Ok(())
    }
}

#[async_trait]
impl Handler for FormController {
    async fn handle(&self, event: Event, document: &mut Document, dispatch: &mut Dispatch) -> Result {
        let Event::Submit { target } = event else { return Ok(()) };
        if document.get(target).and_then(Element::get_id) != Some(FORM_ID) {
            return Ok(());
        }
        dispatch.prevent_default();
        self.submit(target, document).await
    }
}
