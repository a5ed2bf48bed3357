//! # Request and Response Schema
//!
//! Value types crossing the HTTP boundary.
//!
//! ## Module Structure
//!
//! * `features` - [`HousingFeatures`], the validated description of one housing district,
//!   and the closed [`OceanProximity`] category
//! * `validation` - turns an arbitrary JSON payload into [`HousingFeatures`], collecting
//!   every offending field into [`ValidationErrors`]
//! * `response` - [`PredictionResponse`] and the [`ModelInfo`] attached to it
//!
//! A [`HousingFeatures`] can only be obtained through validation (deserializing one
//! also validates), so anything downstream of this module may assume the invariants hold.

mod features;
mod response;
mod validation;

pub use features::{HousingFeatures, OceanProximity};
pub use response::{ModelInfo, PredictionResponse};
pub use validation::{ErrorDetail, ErrorKind, LocItem, ValidationErrors};
