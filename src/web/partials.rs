use clap::crate_version;
use maud::{html, Markup, DOCTYPE};

use crate::catalog::Counter;
use crate::counters::CountersController;
use crate::dom::{Document, Element, ElementId};
use crate::navbar::NavbarController;
use crate::page::{Effect, Page};
use crate::prelude::*;

const BOOTSTRAP_CSS: &str = "https://cdn.jsdelivr.net/npm/bootstrap@5.3.0/dist/css/bootstrap.min.css";
const BOOTSTRAP_JS: &str = "https://cdn.jsdelivr.net/npm/bootstrap@5.3.0/dist/js/bootstrap.bundle.min.js";
const FONT_AWESOME_CSS: &str = "https://cdnjs.cloudflare.com/ajax/libs/font-awesome/6.4.0/css/all.min.css";

const NAV_LINKS: [(&str, &str, &str); 2] = [
    ("/", "fas fa-home", "Inicio"),
    ("/predict", "fas fa-magic", "Predicción"),
];

/// Navbar, titles and counters of a page after `Ready` went through the
/// navbar and counters controllers.
pub struct ReadyPage {
    document: Document,
    links: Vec<ElementId>,
    titles: Vec<ElementId>,
    counters: Vec<(String, i64)>,
}

impl ReadyPage {
    /// `titles` are the initial classes of each page title, in order.
    pub async fn new(path: &str, titles: &[&str], counters: &[Counter]) -> Result<Self> {
        let mut document = Document::new(path);
        let navbar = document.append(None, Element::new("nav").class("navbar"));
        document.append(Some(navbar), Element::new("button").class("navbar-toggler"));
        let collapse =
            document.append(Some(navbar), Element::new("div").class("collapse navbar-collapse"));
        let links = NAV_LINKS
            .iter()
            .map(|(href, _, _)| {
                document.append(Some(collapse), Element::new("a").class("nav-link").attr("href", href))
            })
            .collect();
        let titles = titles
            .iter()
            .map(|classes| document.append(None, Element::new("h1").class(classes)))
            .collect();
        for counter in counters {
            document.append(
                None,
                Element::new("h2")
                    .id(&counter.id)
                    .attr("data-target", &counter.target.to_string()),
            );
        }

        let mut page = Page::new(document)
            .with(NavbarController)
            .with(CountersController);
        let dispatch = page.ready().await?;
        let document = page.into_document();

        let counters = dispatch
            .effects
            .into_iter()
            .filter_map(|effect| match effect {
                Effect::AnimateCounter { target, animation } => {
                    let id = document.get(target)?.get_id()?.to_string();
                    Some((id, animation.last()?))
                }
                _ => None,
            })
            .collect();
        Ok(Self {
            document,
            links,
            titles,
            counters,
        })
    }

    fn classes(&self, id: ElementId) -> String {
        self.document
            .get(id)
            .map(|element| element.classes.to_string())
            .unwrap_or_default()
    }

    pub fn title_class(&self, index: usize) -> String {
        self.titles
            .get(index)
            .map(|title| self.classes(*title))
            .unwrap_or_default()
    }

    /// Value the counter's animation settles on.
    pub fn counter_value(&self, counter: &Counter) -> i64 {
        self.counters
            .iter()
            .find(|(id, _)| *id == counter.id)
            .map_or(counter.target, |(_, value)| *value)
    }

    /// Full HTML document around the page content.
    pub fn render(&self, title: &str, content: Markup) -> Markup {
        html! {
            (DOCTYPE)
            html lang="es" {
                head {
                    meta charset="utf-8";
                    meta name="viewport" content="width=device-width, initial-scale=1";
                    link rel="stylesheet" href=(BOOTSTRAP_CSS);
                    link rel="stylesheet" href=(FONT_AWESOME_CSS);
                    title { (title) " – Segmentación de Clientes" }
                }
                body {
                    (self.navbar())
                    main.container."my-5" { (content) }
                    (footer())
                    script src=(BOOTSTRAP_JS) {}
                }
            }
        }
    }

    fn navbar(&self) -> Markup {
        html! {
            nav.navbar.navbar-expand-lg.navbar-dark.bg-primary.sticky-top {
                div.container {
                    a.navbar-brand.fw-bold href="/" {
                        i.fas.fa-users."me-2" {}
                        "Segmentación de Clientes"
                    }
                    button.navbar-toggler
                        type="button"
                        data-bs-toggle="collapse"
                        data-bs-target="#navbarNav"
                        aria-controls="navbarNav"
                        aria-expanded="false"
                        aria-label="Toggle navigation"
                    {
                        span.navbar-toggler-icon {}
                    }
                    div.collapse.navbar-collapse id="navbarNav" {
                        ul.navbar-nav.ms-auto {
                            @for ((href, icon, label), link) in NAV_LINKS.iter().zip(&self.links) {
                                li.nav-item {
                                    a class=(self.classes(*link)) href=(href) {
                                        i class=(icon) {}
                                        " " (label)
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}

fn footer() -> Markup {
    html! {
        footer."py-4".bg-light.text-center.text-muted {
            small {
                "Segmentación de Clientes " (crate_version!())
            }
        }
    }
}
