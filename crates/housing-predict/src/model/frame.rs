use std::fmt;
use candle_core::{DType, Device, Tensor};
use crate::schema::HousingFeatures;

/// Columns a model is fed, in the order the model was trained on.
///
/// `ocean_proximity` is not a column: the model was trained without it, so it is dropped
/// rather than encoded.
pub const FEATURE_COLUMNS: [&str; 8] = [
    "longitude",
    "latitude",
    "housing_median_age",
    "total_rooms",
    "total_bedrooms",
    "population",
    "households",
    "median_income",
];

/// # FeatureFrame
///
/// A tabular record: named columns over a `(rows, columns)` tensor of `f64` values.
#[derive(Debug, Clone)]
pub struct FeatureFrame {
    columns: &'static [&'static str],
    values: Tensor,
}

impl FeatureFrame {
    /// Project validated features into a single-row frame over [`FEATURE_COLUMNS`].
    pub fn from_features(features: &HousingFeatures) -> candle_core::Result<Self> {
        let row = [
            features.longitude(),
            features.latitude(),
            features.housing_median_age(),
            features.total_rooms(),
            features.total_bedrooms(),
            features.population(),
            features.households(),
            features.median_income(),
        ];
        let values = Tensor::from_slice(&row, (1, FEATURE_COLUMNS.len()), &Device::Cpu)?;
        Ok(Self {
            columns: &FEATURE_COLUMNS,
            values,
        })
    }

    /// Column names, in tensor order
    pub fn columns(&self) -> &'static [&'static str] {
        self.columns
    }

    /// The `(rows, columns)` value tensor
    pub fn values(&self) -> &Tensor {
        &self.values
    }

    pub fn rows(&self) -> usize {
        self.values.dims().first().copied().unwrap_or(0)
    }

    /// Values of the named column, one per row, or `None` if the frame has no such column
    #[cfg(test)]
    pub(crate) fn column(&self, name: &str) -> candle_core::Result<Option<Vec<f64>>> {
        let Some(index) = self.columns.iter().position(|column| *column == name) else {
            return Ok(None);
        };
        let values = self
            .values
            .narrow(1, index, 1)?
            .flatten_all()?
            .to_dtype(DType::F64)?
            .to_vec1::<f64>()?;
        Ok(Some(values))
    }
}

impl fmt::Display for FeatureFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rows = self
            .values
            .to_dtype(DType::F64)
            .and_then(|values| values.to_vec2::<f64>())
            .map_err(|_| fmt::Error)?;
        for row in rows {
            let cells: Vec<String> = self
                .columns
                .iter()
                .zip(row)
                .map(|(column, value)| format!("{column}={value}"))
                .collect();
            writeln!(f, "{}", cells.join(" "))?;
        }
        Ok(())
    }
}
