use poem::http::StatusCode;
use poem::web::{Data, Json};
use poem::{handler, IntoResponse, Response};

use crate::client::SharedService;
use crate::models::{ErrorResponse, PredictionRequest};
use crate::prelude::*;

/// JSON proxy to the prediction endpoint.
///
/// Invalid input and upstream client errors answer `400`, anything else the
/// upstream fails with answers `502`, both with an `{"error": …}` body.
#[handler]
#[instrument(level = "info", skip_all)]
pub async fn post_predict(
    Json(request): Json<PredictionRequest>,
    Data(service): Data<&SharedService>,
) -> Response {
    debug!(n_fields = request.len());
    match service.predict(&request).await {
        Ok(result) => Json(result).into_response(),
        Err(error) => {
            let status = if error.is_client_error() {
                StatusCode::BAD_REQUEST
            } else {
                StatusCode::BAD_GATEWAY
            };
            warn!(%status, "prediction has failed: {:#}", error);
            Json(ErrorResponse {
                error: Some(error.to_string()),
            })
            .with_status(status)
            .into_response()
        }
    }
}

#[handler]
pub async fn get_health() -> impl IntoResponse {
    StatusCode::NO_CONTENT
}

#[cfg(test)]
mod tests {
    use poem::http::StatusCode;
    use serde_json::json;

    use crate::client::fake::FakeService;
    use crate::client::PredictionError;
    use crate::prelude::*;
    use crate::web::test::{create_test_client, premium, read_body};

    #[tokio::test]
    async fn post_predict_ok() -> Result {
        let service = FakeService::new(|| Ok(premium()));
        let client = create_test_client(service.clone())?;
        let response = client
            .post("/api/predict")
            .body_json(&json!({"Age": 45, "Spending_Score": 75.5}))
            .send()
            .await;
        response.assert_status_is_ok();

        let body: serde_json::Value = serde_json::from_str(&read_body(response).await?)?;
        assert_eq!(body["cluster_name"], "Clientes Premium");
        assert_eq!(body["segment_info"]["size"], 250);
        assert_eq!(service.requests.lock().unwrap()[0].get("Spending_Score"), Some(75.5));
        Ok(())
    }

    #[tokio::test]
    async fn post_predict_client_error_ok() -> Result {
        let service = FakeService::new(|| {
            Err(PredictionError::Server {
                status: StatusCode::BAD_REQUEST,
                message: "Faltan features".to_string(),
            })
        });
        let response = create_test_client(service)?
            .post("/api/predict")
            .body_json(&json!({"Age": 45}))
            .send()
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
        let body: serde_json::Value = serde_json::from_str(&read_body(response).await?)?;
        assert_eq!(body, json!({"error": "Faltan features"}));
        Ok(())
    }

    #[tokio::test]
    async fn post_predict_server_error_ok() -> Result {
        let service = FakeService::new(|| {
            Err(PredictionError::Server {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                message: "model is not loaded".to_string(),
            })
        });
        let response = create_test_client(service)?
            .post("/api/predict")
            .body_json(&json!({"Age": 45}))
            .send()
            .await;
        response.assert_status(StatusCode::BAD_GATEWAY);
        let body: serde_json::Value = serde_json::from_str(&read_body(response).await?)?;
        assert_eq!(body, json!({"error": "model is not loaded"}));
        Ok(())
    }

    #[tokio::test]
    async fn post_predict_malformed_body_ok() -> Result {
        let service = FakeService::new(|| Ok(premium()));
        let response = create_test_client(service.clone())?
            .post("/api/predict")
            .body_json(&json!({"Age": "cuarenta"}))
            .send()
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
        let body: serde_json::Value = serde_json::from_str(&read_body(response).await?)?;
        assert!(body["error"].is_string());
        assert!(service.requests.lock().unwrap().is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn get_health_ok() -> Result {
        let response = create_test_client(FakeService::new(|| Ok(premium())))?
            .get("/health")
            .send()
            .await;
        response.assert_status(StatusCode::NO_CONTENT);
        Ok(())
    }
}
