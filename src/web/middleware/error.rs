use poem::web::Json;
use poem::{Endpoint, IntoResponse, Middleware, Request, Response, Result};

use crate::models::ErrorResponse;
use crate::prelude::*;
use crate::web::views::error::render_error_page;
use crate::web::API_PREFIX;

/// Turns handler errors into responses: `{"error": …}` under [`API_PREFIX`],
/// an error page elsewhere. Server errors do not leak their details.
pub struct ErrorMiddleware;

impl<E: Endpoint<Output = Response>> Middleware<E> for ErrorMiddleware {
    type Output = ErrorMiddlewareImpl<E>;

    fn transform(&self, ep: E) -> Self::Output {
        ErrorMiddlewareImpl { ep }
    }
}

pub struct ErrorMiddlewareImpl<E> {
    ep: E,
}

#[poem::async_trait]
impl<E: Endpoint<Output = Response>> Endpoint for ErrorMiddlewareImpl<E> {
    type Output = Response;

    async fn call(&self, request: Request) -> Result<Self::Output> {
        let method = request.method().clone();
        let uri = request.uri().clone();
        match self.ep.call(request).await {
            Err(error) => {
                let status = error.status();
                let message = if status.is_server_error() {
                    error!(?method, ?uri, %status, "{:#}", error);
                    status.canonical_reason().unwrap_or("error").to_string()
                } else {
                    info!(?method, ?uri, %status, "{:#}", error);
                    error.to_string()
                };
                let response = if uri.path().starts_with(API_PREFIX) {
                    Json(ErrorResponse { error: Some(message) })
                        .with_status(status)
                        .into_response()
                } else {
                    render_error_page(status, &message)
                        .await?
                        .with_status(status)
                        .into_response()
                };
                Ok(response)
            }
            result => result,
        }
    }
}

