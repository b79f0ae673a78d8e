use std::collections::BTreeMap;

use poem::http::header::USER_AGENT;
use poem::{Endpoint, Middleware, Request, Result};
use sentry::protocol::{Breadcrumb, Context};

/// Tags the Sentry scope with the request so that captured events carry it.
pub struct SentryMiddleware;

impl<E: Endpoint> Middleware<E> for SentryMiddleware {
    type Output = SentryMiddlewareImpl<E>;

    fn transform(&self, ep: E) -> Self::Output {
        SentryMiddlewareImpl { ep }
    }
}

pub struct SentryMiddlewareImpl<E> {
    ep: E,
}

#[poem::async_trait]
impl<E: Endpoint> Endpoint for SentryMiddlewareImpl<E> {
    type Output = E::Output;

    async fn call(&self, request: Request) -> Result<Self::Output> {
        let method = request.method().as_str().to_string();
        let path = request.uri().path().to_string();
        sentry::configure_scope(|scope| {
            scope.set_tag("request.method", &method);
            scope.set_tag("request.path", &path);

            let mut context = BTreeMap::new();
            context.insert("query".to_string(), request.uri().query().into());
            context.insert(
                "user_agent".to_string(),
                request
                    .headers()
                    .get(USER_AGENT)
                    .and_then(|value| value.to_str().ok())
                    .into(),
            );
            scope.set_context("request", Context::Other(context));
        });
        sentry::add_breadcrumb(Breadcrumb {
            category: Some("request".to_string()),
            message: Some(format!("{} {}", method, path)),
            ..Default::default()
        });
        self.ep.call(request).await
    }
}
