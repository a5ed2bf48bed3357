use serde::{Deserialize, Serialize};
use super::features::HousingFeatures;

/// Metadata describing the model that produced a prediction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelInfo {
    pub version: Option<String>,
    pub training_mse: Option<f64>,
}

/// # PredictionResponse
///
/// The body returned for a successful prediction.
///
/// Carries the predicted value, an exact copy of the validated input, and
/// optionally the [`ModelInfo`] of the model that produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResponse {
    predicted_median_house_value: f64,
    input_parameters: HousingFeatures,
    model_info: Option<ModelInfo>,
}

impl PredictionResponse {
    pub fn new(
        predicted_median_house_value: f64,
        input_parameters: HousingFeatures,
        model_info: Option<ModelInfo>,
    ) -> Self {
        Self {
            predicted_median_house_value,
            input_parameters,
            model_info,
        }
    }

    pub fn predicted_median_house_value(&self) -> f64 {
        self.predicted_median_house_value
    }

    pub fn input_parameters(&self) -> &HousingFeatures {
        &self.input_parameters
    }

    pub fn model_info(&self) -> Option<&ModelInfo> {
        self.model_info.as_ref()
    }
}
