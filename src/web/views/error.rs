use maud::html;
use poem::http::StatusCode;
use poem::web::Html;

use crate::prelude::*;
use crate::web::partials::ReadyPage;

pub async fn render_error_page(status: StatusCode, message: &str) -> Result<Html<String>> {
    let ready = ReadyPage::new("", &["display-4 fw-bold"], &[]).await?;
    let markup = ready.render(&status.as_u16().to_string(), html! {
        div.row.justify-content-center {
            div."col-lg-6".text-center {
                h1 class=(ready.title_class(0)) { (status.as_u16()) }
                p.lead { (message) }
                a.btn.btn-primary href="/" {
                    i.fas.fa-home."me-2" {}
                    "Volver al inicio"
                }
            }
        }
    });
    Ok(Html(markup.into_string()))
}
