use maud::{html, Markup, Render};
use poem::handler;
use poem::web::{Data, Html};

use crate::catalog::{Catalog, Counter};
use crate::helpers::format::format_number;
use crate::prelude::*;
use crate::web::partials::ReadyPage;

const TITLE_CLASSES: [&str; 2] = ["display-4 fw-bold", "display-5 fw-bold mb-4"];

#[handler]
#[instrument(level = "info", skip_all)]
pub async fn get(Data(catalog): Data<&Arc<Catalog>>) -> poem::Result<Html<String>> {
    let ready = ReadyPage::new("/", &TITLE_CLASSES, &catalog.counters).await?;
    let markup = ready.render("Inicio", html! {
        div."p-5"."mb-5".bg-primary.text-white."rounded-3".text-center {
            h1 class=(ready.title_class(0)) { "Segmentación de Clientes" }
            p.lead."mb-4" { "Descubre a qué segmento pertenece cada cliente con un clic." }
            a.btn.btn-light.btn-lg."me-2" href="/predict" {
                i.fas.fa-magic."me-2" {}
                "Hacer una predicción"
            }
            a.btn.btn-outline-light.btn-lg href="#como-funciona" { "¿Cómo funciona?" }
        }

        div.row."mb-5" {
            @for counter in &catalog.counters {
                div."col-md-3"."col-6"."mb-4" {
                    (CounterCard { counter, value: ready.counter_value(counter) })
                }
            }
        }

        section id="como-funciona" {
            h2 class=(ready.title_class(1)) { "¿Cómo funciona?" }
            div.row {
                @for recommendation in &catalog.recommendations {
                    div."col-md-6"."mb-3" {
                        div.card."h-100" {
                            div.card-body {
                                h5.card-title { "Clientes " (recommendation.key) }
                                p.card-text.text-muted { (recommendation.text) }
                            }
                        }
                    }
                }
            }
        }
    });
    Ok(Html(markup.into_string()))
}

/// Counter shown at the value its animation settles on, `data-target` keeps
/// what the browser counts to.
struct CounterCard<'a> {
    counter: &'a Counter,
    value: i64,
}

impl Render for CounterCard<'_> {
    fn render(&self) -> Markup {
        html! {
            div.card.shadow-sm.text-center."p-4" {
                h2.fw-bold.text-primary id=(self.counter.id) data-target=(self.counter.target) {
                    (format_number(self.value as f64))
                }
                p.text-muted."mb-0" { (self.counter.label) }
            }
        }
    }
}
