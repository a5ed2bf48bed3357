use std::sync::Arc;
use async_trait::async_trait;
use candle_core::Tensor;
use super::frame::FeatureFrame;

/// Defines a regression model that maps a tabular frame to one value per row.
///
/// # Implementation Notes
///
/// Implementations should:
/// * Treat the first dimension of the frame as the row dimension
/// * Return one output value per row, in row order
/// * Be thread-safe; a single instance serves every request concurrently
///
/// # Example
///
/// ```ignore
/// use housing_predict::model::{FeatureFrame, Regressor};
/// use async_trait::async_trait;
///
/// struct Constant(f64);
///
/// #[async_trait]
/// impl Regressor for Constant {
///     async fn forward(&self, frame: FeatureFrame) -> candle_core::Result<Tensor> {
///         Tensor::full(self.0, frame.rows(), frame.values().device())
///     }
/// }
/// ```
#[async_trait]
pub trait Regressor: Send + Sync {
    /// Runs the model over every row of `frame`.
    ///
    /// # Returns
    ///
    /// A tensor holding one prediction per row
    async fn forward(&self, frame: FeatureFrame) -> candle_core::Result<Tensor>;
}

/// The process-wide, read-only model shared by every request
pub type ModelHandle = Arc<dyn Regressor>;
