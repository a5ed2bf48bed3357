use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use async_trait::async_trait;
use candle_core::Tensor;
use super::{FeatureFrame, Regressor};

// A regressor that predicts the same value for every row
pub struct MockRegressor {
    pub(crate) value: f64,
    calls: AtomicUsize,
    seen_columns: Mutex<Vec<Vec<&'static str>>>,
}

impl MockRegressor {
    pub fn new(value: f64) -> Self {
        Self {
            value,
            calls: AtomicUsize::new(0),
            seen_columns: Mutex::new(vec![]),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Columns of every frame received, in call order
    pub fn seen_columns(&self) -> Vec<Vec<&'static str>> {
        self.seen_columns.lock().unwrap().clone()
    }
}

#[async_trait]
impl Regressor for MockRegressor {
    async fn forward(&self, frame: FeatureFrame) -> candle_core::Result<Tensor> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.seen_columns.lock().unwrap().push(frame.columns().to_vec());
        Tensor::full(self.value, frame.rows(), frame.values().device())
    }
}

// A regressor whose forward pass always fails
pub struct FailingRegressor {
    pub(crate) message: &'static str,
}

#[async_trait]
impl Regressor for FailingRegressor {
    async fn forward(&self, _frame: FeatureFrame) -> candle_core::Result<Tensor> {
        Err(candle_core::Error::Msg(self.message.to_string()))
    }
}

// A regressor that returns no values at all
pub struct EmptyRegressor;

#[async_trait]
impl Regressor for EmptyRegressor {
    async fn forward(&self, frame: FeatureFrame) -> candle_core::Result<Tensor> {
        Tensor::zeros(0, candle_core::DType::F64, frame.values().device())
    }
}

// A regressor that panics mid-inference
pub struct PanickingRegressor;

#[async_trait]
impl Regressor for PanickingRegressor {
    async fn forward(&self, _frame: FeatureFrame) -> candle_core::Result<Tensor> {
        panic!("numeric failure inside model")
    }
}
