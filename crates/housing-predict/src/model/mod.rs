//! # Regression Model
//!
//! This module provides the seam between the service and whatever model backs it.
//!
//! ## Module Structure
//!
//! * [`Regressor`] - the trait any model must fulfil: one [`FeatureFrame`] in, one
//!   output tensor out
//! * [`FeatureFrame`] - the tabular record a model receives, with named, ordered columns
//! * [`linear`] - [`LinearRegressor`](linear::LinearRegressor), a candle backed linear
//!   regression model loaded from a safetensors artifact
//!
//! ## Usage
//!
//! The service holds a single [`ModelHandle`] for its lifetime. Tests inject their own
//! [`Regressor`] in place of an artifact backed model.

mod core_trait;
mod frame;

pub mod linear;

pub use core_trait::*;
pub use frame::{FeatureFrame, FEATURE_COLUMNS};

#[cfg(test)]
/// Mock regressors.
///
/// Return fixed values and record the frames they receive
pub(crate) mod mock_regressor;
