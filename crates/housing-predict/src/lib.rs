//! # Housing Predict
//!
//! Serves a pre-trained regression model that estimates the median house value of a
//! California housing district over HTTP.
//!
//! ## Overview
//!
//! A request travels through three pieces:
//!
//! - **Feature schema** ([`schema`]) validates the inbound JSON into [`HousingFeatures`],
//!   reporting every offending field at once
//! - **Inference adapter** ([`inference`]) projects the features into the single-row
//!   tabular frame the model was trained on, runs the model and wraps the result
//! - **HTTP endpoint** ([`api`]) ties them together and maps each outcome to a status code
//!
//! ## Architecture
//!
//! ### Model seam
//!
//! The [`Regressor`] trait is the only thing the service knows about a model: a
//! [`FeatureFrame`](model::FeatureFrame) goes in, a tensor with one value per row comes out.
//! [`LinearRegressor`](model::linear::LinearRegressor) implements it with candle over a
//! safetensors artifact; tests substitute their own.
//!
//! ### Model handle
//!
//! The model is loaded once at startup and injected into [`AppState`] as an optional,
//! shared, read-only [`ModelHandle`]. No locks are taken: handlers only read it. When
//! loading fails the handle is `None` and predictions answer 503 until the process is
//! restarted with a usable artifact.
//!
//! ### Errors
//!
//! | Outcome | Status | Body |
//! |---|---|---|
//! | invalid input | 422 | `{"detail": [{"loc", "msg", "type"}, ...]}` |
//! | no model | 503 | `{"detail": "Model not loaded."}` |
//! | inference failed | 500 | `{"detail": "Prediction failed: <cause>"}` |
//!
//! Nothing is retried and no partial response is ever sent.
//!

pub mod api;
pub mod config;
pub mod inference;
pub mod model;
pub mod schema;

pub use api::{create_router, AppState};
pub use inference::{predict, InferenceError};
pub use model::{ModelHandle, Regressor};
pub use schema::{HousingFeatures, OceanProximity, PredictionResponse};
