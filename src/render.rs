//! Markup for the prediction results card.

use maud::{html, Markup, PreEscaped};

use crate::helpers::format::to_fixed;
use crate::models::PredictionResult;

pub const SUBMIT_LOADING_LABEL: PreEscaped<&str> =
    PreEscaped(r#"<div class="loading me-2"></div> Procesando..."#);

pub const REFRESH_LOADING_LABEL: PreEscaped<&str> =
    PreEscaped(r#"<div class="loading me-2"></div> Actualizando..."#);

const RELOAD: &str = "location.reload()";

pub fn render_success(result: &PredictionResult, recommendation: &str) -> Markup {
    let info = &result.segment_info;
    html! {
        div.prediction-result."p-4"."mb-4".text-center {
            i.fas.fa-check-circle."fa-4x"."mb-3".text-success {}
            h2.fw-bold { "¡Predicción Completada!" }
            h4."mb-3" { "El cliente pertenece al segmento:" }
            div."display-4".fw-bold.text-warning { (result.cluster_name) }
        }

        div.segment-info."p-4"."mb-4" {
            h5.fw-bold."mb-3" {
                i.fas.fa-info-circle."me-2" {}
                "Información del Segmento"
            }
            div.row {
                div."col-md-6" {
                    p {
                        strong { "Tamaño del Segmento:" } br;
                        (info.size) " clientes (" (to_fixed(info.percentage, 1)) "%)"
                    }
                }
                div."col-md-6" {
                    p {
                        strong { "Edad Promedio:" } br;
                        (to_fixed(info.avg_age, 1)) " años"
                    }
                }
                div."col-md-6" {
                    p {
                        strong { "Ingreso Promedio:" } br;
                        "$" (to_fixed(info.avg_income, 1)) "k"
                    }
                }
                div."col-md-6" {
                    p {
                        strong { "Gasto Promedio:" } br;
                        (to_fixed(info.avg_spending, 1)) " puntos"
                    }
                }
            }
        }

        div.alert.alert-info {
            h6 { i.fas.fa-lightbulb."me-2" {} "Recomendaciones de Marketing:" }
            p."mb-0" { (recommendation) }
        }

        div.text-center."mt-4" {
            button.btn.btn-primary.btn-lg onclick=(RELOAD) {
                i.fas.fa-plus."me-2" {}
                "Nueva Predicción"
            }
        }
    }
}

pub fn render_error(message: &str) -> Markup {
    html! {
        div.alert.alert-danger {
            h5 { i.fas.fa-exclamation-triangle."me-2" {} "Error" }
            p."mb-0" { (message) }
        }
        div.text-center."mt-3" {
            button.btn.btn-primary onclick=(RELOAD) {
                i.fas.fa-arrow-left."me-2" {}
                "Intentar Nuevamente"
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SegmentInfo;

    fn premium() -> PredictionResult {
        PredictionResult {
            cluster_number: Some(0),
            cluster_name: "Clientes Premium".to_string(),
            segment_info: SegmentInfo {
                size: 312,
                percentage: 15.63,
                avg_age: 44.25,
                avg_income: 86.11,
                avg_spending: 74.96,
            },
        }
    }

    #[test]
    fn render_success_ok() {
        let markup = render_success(&premium(), "Ofrecer productos de alta gama").into_string();
        assert!(markup.contains(r#"<div class="display-4 fw-bold text-warning">Clientes Premium</div>"#));
        assert!(markup.contains("312 clientes (15.6%)"));
        assert!(markup.contains("44.3 años"));
        assert!(markup.contains("$86.1k"));
        assert!(markup.contains("75.0 puntos"));
        assert!(markup.contains("Ofrecer productos de alta gama"));
        assert!(markup.contains(r#"onclick="location.reload()""#));
    }

    #[test]
    fn render_success_rounds_ties_up_ok() {
        let mut result = premium();
        result.segment_info.percentage = 12.25;
        result.segment_info.avg_income = 0.25;
        result.segment_info.avg_spending = 9.96;
        let markup = render_success(&result, "x").into_string();
        assert!(markup.contains("312 clientes (12.3%)"));
        assert!(markup.contains("$0.3k"));
        assert!(markup.contains("10.0 puntos"));
    }

    #[test]
    fn render_error_ok() {
        let markup = render_error("Faltan features").into_string();
        assert!(markup.contains(r#"<p class="mb-0">Faltan features</p>"#));
        assert!(markup.contains("Intentar Nuevamente"));
    }

    #[test]
    fn render_escapes_ok() {
        let mut result = premium();
        result.cluster_name = "<script>alert(1)</script>".to_string();
        let markup = render_success(&result, "x").into_string();
        assert!(!markup.contains("<script>"));
        assert!(markup.contains("&lt;script&gt;"));
        assert!(render_error("<b>").into_string().contains("&lt;b&gt;"));
    }
}
