//! Linear regression over [`FEATURE_COLUMNS`], backed by candle.
//!
//! ## Artifact format
//!
//! A safetensors file holding:
//!
//! * `weight` - one coefficient per feature column; shape `[8]`, `[1, 8]` or `[8, 1]`
//! * `bias` - a single intercept
//!
//! Any float dtype is accepted; parameters are held as `f64`. If the file's metadata
//! carries a `feature_columns` entry (comma separated), it must list [`FEATURE_COLUMNS`]
//! in the same order, so a coefficient vector trained against a different column order
//! is refused at load time rather than producing plausible but wrong predictions.
use std::path::{Path, PathBuf};
use async_trait::async_trait;
use candle_core::{DType, Device, Tensor};
use safetensors::{SafeTensorError, SafeTensors};
use super::core_trait::Regressor;
use super::frame::{FeatureFrame, FEATURE_COLUMNS};

/// Metadata key naming the column order the coefficients were fitted against
pub const COLUMNS_METADATA_KEY: &str = "feature_columns";

const WEIGHT: &str = "weight";
const BIAS: &str = "bias";

/// Failure to turn an artifact into a usable model
#[derive(Debug, thiserror::Error)]
pub enum ModelLoadError {
    #[error("unable to read model artifact {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed safetensors header: {0}")]
    Header(#[from] SafeTensorError),

    #[error("malformed model tensors: {0}")]
    Tensor(#[from] candle_core::Error),

    #[error("model artifact has no `{0}` tensor")]
    MissingTensor(&'static str),

    #[error("`{name}` has shape {found:?}, expected {expected} elements")]
    Shape {
        name: &'static str,
        expected: usize,
        found: Vec<usize>,
    },

    #[error("model was fitted on columns [{found}], expected [{}]", FEATURE_COLUMNS.join(","))]
    ColumnMismatch { found: String },
}

/// # LinearRegressor
///
/// `prediction = frame · weightᵀ + bias`, computed row by row.
#[derive(Debug, Clone)]
pub struct LinearRegressor {
    /// `(1, FEATURE_COLUMNS.len())`
    weight: Tensor,
    /// `(1,)`
    bias: Tensor,
}

impl LinearRegressor {
    /// Build a model directly from coefficients ordered as [`FEATURE_COLUMNS`].
    pub fn new(coefficients: &[f64], intercept: f64) -> Result<Self, ModelLoadError> {
        let weight = Tensor::from_slice(coefficients, coefficients.len(), &Device::Cpu)?;
        let bias = Tensor::new(&[intercept], &Device::Cpu)?;
        Self::from_tensors(weight, bias)
    }

    /// Load a model artifact from disk.
    ///
    /// # Errors
    ///
    /// [`ModelLoadError`] when the file is unreadable or does not describe a linear
    /// model over [`FEATURE_COLUMNS`].
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ModelLoadError> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|source| ModelLoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_safetensors(&bytes)
    }

    /// Load a model from an in-memory safetensors buffer.
    pub fn from_safetensors(bytes: &[u8]) -> Result<Self, ModelLoadError> {
        let (_, metadata) = SafeTensors::read_metadata(bytes)?;
        if let Some(columns) = metadata
            .metadata()
            .as_ref()
            .and_then(|entries| entries.get(COLUMNS_METADATA_KEY))
        {
            let fitted: Vec<&str> = columns.split(',').map(str::trim).collect();
            if fitted != FEATURE_COLUMNS {
                return Err(ModelLoadError::ColumnMismatch {
                    found: columns.clone(),
                });
            }
        }

        let mut tensors = candle_core::safetensors::load_buffer(bytes, &Device::Cpu)?;
        let weight = tensors
            .remove(WEIGHT)
            .ok_or(ModelLoadError::MissingTensor(WEIGHT))?;
        let bias = tensors
            .remove(BIAS)
            .ok_or(ModelLoadError::MissingTensor(BIAS))?;
        Self::from_tensors(weight, bias)
    }

    fn from_tensors(weight: Tensor, bias: Tensor) -> Result<Self, ModelLoadError> {
        let columns = FEATURE_COLUMNS.len();
        if weight.elem_count() != columns || weight.rank() > 2 {
            return Err(ModelLoadError::Shape {
                name: WEIGHT,
                expected: columns,
                found: weight.dims().to_vec(),
            });
        }
        if bias.elem_count() != 1 {
            return Err(ModelLoadError::Shape {
                name: BIAS,
                expected: 1,
                found: bias.dims().to_vec(),
            });
        }

        Ok(Self {
            weight: weight.reshape((1, columns))?.to_dtype(DType::F64)?,
            bias: bias.reshape(1)?.to_dtype(DType::F64)?,
        })
    }

    /// Coefficients in [`FEATURE_COLUMNS`] order
    pub fn coefficients(&self) -> candle_core::Result<Vec<f64>> {
        self.weight.flatten_all()?.to_vec1::<f64>()
    }

    pub fn intercept(&self) -> candle_core::Result<f64> {
        self.bias.flatten_all()?.get(0)?.to_scalar::<f64>()
    }
}

#[async_trait]
impl Regressor for LinearRegressor {
    async fn forward(&self, frame: FeatureFrame) -> candle_core::Result<Tensor> {
        let values = frame.values().to_dtype(DType::F64)?;
        values
            .matmul(&self.weight.t()?)?
            .broadcast_add(&self.bias)?
            .squeeze(1)
    }
}
