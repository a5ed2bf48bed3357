//! # Inference Adapter
//!
//! Turns validated [`HousingFeatures`] into a [`PredictionResponse`] by way of a
//! [`Regressor`].
//!
//! One call in, one value out: no retries, no batching, no caching.
use candle_core::DType;
use tracing::{debug, error};
use crate::model::{FeatureFrame, Regressor};
use crate::schema::{HousingFeatures, ModelInfo, PredictionResponse};

/// Version reported in every [`ModelInfo`]
pub const MODEL_VERSION: &str = "1.0.0";

/// Training error reported in every [`ModelInfo`]
pub const TRAINING_MSE: f64 = 4500.75;

/// The prediction call itself failed
#[derive(Debug, thiserror::Error)]
pub enum InferenceError {
    #[error("{0}")]
    Model(#[from] candle_core::Error),

    #[error("model returned no prediction")]
    EmptyOutput,

    #[error("model returned a non-finite prediction: {0}")]
    NonFinite(f64),
}

impl ModelInfo {
    /// The metadata attached to every prediction.
    ///
    /// Fixed values, not read from the artifact.
    pub fn current() -> Self {
        Self {
            version: Some(MODEL_VERSION.to_string()),
            training_mse: Some(TRAINING_MSE),
        }
    }
}

/// Predict the median house value for one district.
///
/// # Parameters
///
/// * `model` - The loaded model
/// * `features` - Already validated features; echoed back in the response
///
/// # Returns
///
/// The first value the model produces for the single-row frame built from `features`,
/// wrapped with the input and [`ModelInfo::current`].
///
/// # Errors
///
/// [`InferenceError`] carrying the original cause if the model call fails, produces
/// nothing, or produces infinity or NaN.
pub async fn predict(
    model: &dyn Regressor,
    features: HousingFeatures,
) -> Result<PredictionResponse, InferenceError> {
    let frame = FeatureFrame::from_features(&features)?;
    debug!(rows = frame.rows(), "model prediction input:\n{frame}");

    let output = model
        .forward(frame)
        .await
        .inspect_err(|err| error!(error = %err, "model prediction failed"))?;

    let predicted = output
        .flatten_all()?
        .to_dtype(DType::F64)?
        .to_vec1::<f64>()?
        .first()
        .copied()
        .ok_or(InferenceError::EmptyOutput)?;
    if !predicted.is_finite() {
        error!(predicted, "model prediction is not a finite number");
        return Err(InferenceError::NonFinite(predicted));
    }

    Ok(PredictionResponse::new(
        predicted,
        features,
        Some(ModelInfo::current()),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use serde_json::json;
    use crate::model::mock_regressor::{EmptyRegressor, FailingRegressor, MockRegressor};
    use crate::model::linear::LinearRegressor;

    fn features() -> HousingFeatures {
        HousingFeatures::validate(&json!({
            "longitude": -122.23,
            "latitude": 37.88,
            "housing_median_age": 41.0,
            "total_rooms": 880.0,
            "total_bedrooms": 129.0,
            "population": 322.0,
            "households": 126.0,
            "median_income": 8.3252,
            "ocean_proximity": "NEAR BAY"
        }))
        .unwrap()
    }

    #[tokio::test]
    async fn test_predict_wraps_model_output() {
        let model = MockRegressor::new(4.526);

        let response = predict(&model, features()).await.unwrap();

        assert_eq!(response.predicted_median_house_value(), 4.526);
        assert_eq!(response.input_parameters(), &features());
        assert_eq!(
            response.model_info(),
            Some(&ModelInfo {
                version: Some("1.0.0".to_string()),
                training_mse: Some(4500.75),
            })
        );
        assert_eq!(model.calls(), 1);
    }

    #[tokio::test]
    async fn test_ocean_proximity_never_reaches_model() {
        let model = MockRegressor::new(1.0);

        predict(&model, features()).await.unwrap();

        let seen = model.seen_columns();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0], crate::model::FEATURE_COLUMNS.to_vec());
        assert!(!seen[0].contains(&"ocean_proximity"));
    }

    #[tokio::test]
    async fn test_model_failure_propagates_cause() {
        let model = FailingRegressor { message: "shape mismatch" };

        let err = predict(&model, features()).await.unwrap_err();

        assert!(matches!(err, InferenceError::Model(_)));
        assert!(err.to_string().contains("shape mismatch"));
    }

    #[tokio::test]
    async fn test_empty_output_is_an_error() {
        let err = predict(&EmptyRegressor, features()).await.unwrap_err();
        assert!(matches!(err, InferenceError::EmptyOutput));
    }

    #[tokio::test]
    async fn test_non_finite_output_is_an_error() {
        for value in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let model = MockRegressor::new(value);
            let err = predict(&model, features()).await.unwrap_err();
            assert!(matches!(err, InferenceError::NonFinite(_)));
        }
    }

    #[tokio::test]
    async fn test_overflowing_linear_model_is_an_error() {
        let model = LinearRegressor::new(&[1.0; 8], 0.0).unwrap();
        let features = HousingFeatures::validate(&json!({
            "longitude": 0.0,
            "latitude": 0.0,
            "housing_median_age": 1e308,
            "total_rooms": 1e308,
            "total_bedrooms": 1e308,
            "population": 1e308,
            "households": 0.0,
            "median_income": 0.0,
            "ocean_proximity": "INLAND"
        }))
        .unwrap();

        let err = predict(&model, features).await.unwrap_err();
        assert!(matches!(err, InferenceError::NonFinite(_)));
    }

    #[tokio::test]
    async fn test_predict_is_deterministic() {
        let model: Arc<dyn Regressor> = Arc::new(
            LinearRegressor::new(&[-0.4, -0.4, 0.01, -0.0001, 0.001, -0.0004, 0.002, 0.45], -36.0)
                .unwrap(),
        );

        let handles = (0..32)
            .map(|_| {
                let model = model.clone();
                tokio::spawn(async move {
                    predict(model.as_ref(), features())
                        .await
                        .unwrap()
                        .predicted_median_house_value()
                })
            })
            .collect::<Vec<_>>();

        let values = futures::future::join_all(handles)
            .await
            .into_iter()
            .map(|handle| handle.unwrap())
            .collect::<Vec<_>>();

        assert!(values.iter().all(|value| value.to_bits() == values[0].to_bits()));
    }
}
