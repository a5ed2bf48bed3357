//! # HTTP API
//!
//! Axum router exposing the model.
//!
//! ## Endpoints
//!
//! - `POST /api/v1/predict` - Predict the median house value of one district
//! - `GET /api/v1/health` - Liveness, and whether a model is loaded
//!
//! ## Example
//!
//! ```rust,ignore
//! use housing_predict::api::{create_router, AppState};
//! use housing_predict::config::CorsConfig;
//!
//! let state = AppState::new(Some(model));
//! let app = create_router(state, &CorsConfig::default());
//! axum::serve(listener, app).await?;
//! ```

mod error;
mod extract;
mod handler;


use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;
use crate::config::CorsConfig;
use crate::model::ModelHandle;

pub use error::{ApiError, ErrorBody};
pub use extract::ValidatedFeatures;
pub use handler::HealthResponse;

/// Path prefix every route is mounted under
pub const API_PREFIX: &str = "/api/v1";

/// Application state shared across handlers
#[derive(Clone, Default)]
pub struct AppState {
    /// The loaded model, or `None` if loading failed at startup
    model: Option<ModelHandle>,
}

impl AppState {
    /// Create application state
    ///
    /// # Arguments
    ///
    /// * `model` - The model to serve; `None` makes every prediction fail with 503
    pub fn new(model: Option<ModelHandle>) -> Self {
        Self { model }
    }

    pub fn model(&self) -> Option<&ModelHandle> {
        self.model.as_ref()
    }

    pub fn has_model(&self) -> bool {
        self.model.is_some()
    }
}

/// Build the router with all routes, CORS and request tracing
pub fn create_router(state: AppState, cors: &CorsConfig) -> Router {
    let api = Router::new()
        .route("/predict", post(handler::predict))
        .route("/health", get(handler::health));

    Router::new()
        .nest(API_PREFIX, api)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors.layer())
}
