//! Entry points the page markup triggers directly.

use crate::catalog::Catalog;
use crate::dom::{Document, ElementId};
use crate::page::Effect;
use crate::prelude::*;
use crate::render::REFRESH_LOADING_LABEL;

pub const RELOAD_DELAY: StdDuration = StdDuration::from_secs(1);

/// Pre-fills the form inputs from the named example profile. Fields without
/// a matching input are skipped.
pub fn fill_example(document: &mut Document, catalog: &Catalog, key: &str) -> Result {
    let example = catalog
        .example(key)
        .ok_or_else(|| anyhow!("unknown example profile `{}`", key))?;
    for (field, value) in &example.values {
        match document.get_element_by_id(field).and_then(|id| document.get_mut(id)) {
            Some(input) => input.value = value.to_string(),
            None => debug!(field, "no input for the example field"),
        }
    }
    Ok(())
}

/// Shows the loading label on the trigger and asks for a delayed reload.
pub fn refresh_dashboard(document: &mut Document, trigger: ElementId) -> Effect {
    if let Some(trigger) = document.get_mut(trigger) {
        trigger.inner_html = REFRESH_LOADING_LABEL.0.to_string();
        trigger.disabled = true;
    }
    Effect::Reload { delay: RELOAD_DELAY }
}
