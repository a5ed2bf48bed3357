use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::{debug, error};
use uuid::Uuid;
use crate::inference;
use crate::schema::PredictionResponse;
use super::{ApiError, AppState, ValidatedFeatures};

/// Body of `GET /api/v1/health`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub model_loaded: bool,
}

/// `POST /api/v1/predict`
///
/// The model is checked before the body, so a missing model answers 503 whatever was
/// sent. Inference runs on its own task: a client that disconnects mid-request does not
/// cancel it, the result is simply dropped.
#[tracing::instrument(name = "predict", skip_all, fields(request_id = %Uuid::new_v4()))]
pub(super) async fn predict(
    State(state): State<AppState>,
    features: Result<ValidatedFeatures, ApiError>,
) -> Result<Json<PredictionResponse>, ApiError> {
    let model = state.model().cloned().ok_or_else(|| {
        error!("prediction requested but no model is loaded");
        ApiError::ModelUnavailable
    })?;

    let ValidatedFeatures(features) = features.inspect_err(|err| {
        debug!(error = %err, "rejected invalid input");
    })?;
    debug!(input = ?features, "received prediction request");

    let response = tokio::spawn(async move { inference::predict(model.as_ref(), features).await })
        .await
        .map_err(ApiError::from)
        .and_then(|result| result.map_err(ApiError::from))
        .inspect_err(|err| error!(error = %err, "prediction failed"))?;

    debug!(
        prediction = response.predicted_median_house_value(),
        "prediction result"
    );
    Ok(Json(response))
}

/// `GET /api/v1/health`
pub(super) async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        model_loaded: state.has_model(),
    })
}
