use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use super::features::{HousingFeatures, OceanProximity};

/// One element of an error location, e.g. `["body", "total_bedrooms"]`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LocItem {
    Key(String),
    Index(usize),
}

impl From<&str> for LocItem {
    fn from(key: &str) -> Self {
        LocItem::Key(key.to_string())
    }
}

impl From<usize> for LocItem {
    fn from(index: usize) -> Self {
        LocItem::Index(index)
    }
}

/// Machine-readable reason a field was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The body could not be decoded as JSON
    JsonInvalid,
    /// The body decoded, but is not an object
    ModelAttributesType,
    /// A required field was absent
    Missing,
    /// A numeric field held a non-numeric JSON value
    FloatType,
    /// A numeric field held a string that does not parse as a number
    FloatParsing,
    /// A numeric field held infinity or NaN
    FiniteNumber,
    /// A constrained field was negative
    GreaterThanEqual,
    /// `ocean_proximity` was not one of the known categories
    Enum,
}

impl ErrorKind {
    pub fn type_name(&self) -> &'static str {
        match self {
            ErrorKind::JsonInvalid => "json_invalid",
            ErrorKind::ModelAttributesType => "model_attributes_type",
            ErrorKind::Missing => "missing",
            ErrorKind::FloatType => "float_type",
            ErrorKind::FloatParsing => "float_parsing",
            ErrorKind::FiniteNumber => "finite_number",
            ErrorKind::GreaterThanEqual => "greater_than_equal",
            ErrorKind::Enum => "enum",
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            ErrorKind::JsonInvalid => "JSON decode error",
            ErrorKind::ModelAttributesType => {
                "Input should be a valid dictionary or object to extract fields from"
            }
            ErrorKind::Missing => "Field required",
            ErrorKind::FloatType => "Input should be a valid number",
            ErrorKind::FloatParsing => {
                "Input should be a valid number, unable to parse string as a number"
            }
            ErrorKind::FiniteNumber => "Input should be a finite number",
            ErrorKind::GreaterThanEqual => "Input should be greater than or equal to 0",
            ErrorKind::Enum => {
                "Input should be 'NEAR BAY', '<1H OCEAN', 'INLAND', 'NEAR OCEAN' or 'ISLAND'"
            }
        }
    }
}

/// A single rejected field, in the `{loc, msg, type}` shape clients already parse
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorDetail {
    pub loc: Vec<LocItem>,
    pub msg: String,
    #[serde(rename = "type")]
    pub error_type: String,
}

impl ErrorDetail {
    pub fn new(loc: Vec<LocItem>, kind: ErrorKind) -> Self {
        Self {
            loc,
            msg: kind.message().to_string(),
            error_type: kind.type_name().to_string(),
        }
    }

    /// An error located at `["body", field]`
    pub fn body_field(field: &str, kind: ErrorKind) -> Self {
        Self::new(vec!["body".into(), field.into()], kind)
    }

    /// The field this error points at, if it points at one
    pub fn field(&self) -> Option<&str> {
        match self.loc.get(1) {
            Some(LocItem::Key(key)) => Some(key.as_str()),
            _ => None,
        }
    }
}

/// Every problem found in a request body.
///
/// Never empty when returned as an error.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{} validation error(s) for HousingFeatures", .errors.len())]
pub struct ValidationErrors {
    errors: Vec<ErrorDetail>,
}

impl ValidationErrors {
    pub fn single(detail: ErrorDetail) -> Self {
        Self { errors: vec![detail] }
    }

    /// The body was empty
    pub fn missing_body() -> Self {
        Self::single(ErrorDetail::new(vec!["body".into()], ErrorKind::Missing))
    }

    /// The body was not valid JSON; `position` is where decoding stopped
    pub fn json_invalid(position: usize) -> Self {
        Self::single(ErrorDetail::new(
            vec!["body".into(), position.into()],
            ErrorKind::JsonInvalid,
        ))
    }

    pub fn errors(&self) -> &[ErrorDetail] {
        &self.errors
    }

    pub fn into_errors(self) -> Vec<ErrorDetail> {
        self.errors
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Reads fields off a JSON object, recording a failure for every bad field
/// instead of stopping at the first one.
struct FieldReader<'a> {
    object: &'a Map<String, Value>,
    errors: Vec<ErrorDetail>,
}

impl<'a> FieldReader<'a> {
    fn new(object: &'a Map<String, Value>) -> Self {
        Self { object, errors: vec![] }
    }

    fn fail(&mut self, field: &str, kind: ErrorKind) {
        self.errors.push(ErrorDetail::body_field(field, kind));
    }

    /// Read a float. A failed read returns `0.0`, which is discarded by [`Self::finish`].
    fn float(&mut self, field: &str, non_negative: bool) -> f64 {
        let value = match self.object.get(field) {
            None => {
                self.fail(field, ErrorKind::Missing);
                return 0.0;
            }
            Some(Value::Number(number)) => number.as_f64(),
            Some(Value::String(text)) => match text.trim().parse::<f64>() {
                Ok(parsed) => Some(parsed),
                Err(_) => {
                    self.fail(field, ErrorKind::FloatParsing);
                    return 0.0;
                }
            },
            Some(_) => None,
        };

        match value {
            None => {
                self.fail(field, ErrorKind::FloatType);
                0.0
            }
            Some(value) if !value.is_finite() => {
                self.fail(field, ErrorKind::FiniteNumber);
                0.0
            }
            Some(value) if non_negative && value < 0.0 => {
                self.fail(field, ErrorKind::GreaterThanEqual);
                0.0
            }
            Some(value) => value,
        }
    }

    fn category(&mut self, field: &str) -> OceanProximity {
        match self.object.get(field) {
            None => self.fail(field, ErrorKind::Missing),
            Some(Value::String(label)) => match OceanProximity::from_label(label) {
                Some(category) => return category,
                None => self.fail(field, ErrorKind::Enum),
            },
            Some(_) => self.fail(field, ErrorKind::Enum),
        }
        OceanProximity::NearBay
    }

    fn finish<T>(self, value: T) -> Result<T, ValidationErrors> {
        if self.errors.is_empty() {
            Ok(value)
        } else {
            Err(ValidationErrors { errors: self.errors })
        }
    }
}

impl HousingFeatures {
    /// Validate an arbitrary JSON payload.
    ///
    /// Either every field is valid and a complete [`HousingFeatures`] is returned, or
    /// every invalid field is reported, in declaration order.
    ///
    /// # Errors
    ///
    /// [`ValidationErrors`] listing each offending field with its location and type.
    pub fn validate(payload: &Value) -> Result<Self, ValidationErrors> {
        let Some(object) = payload.as_object() else {
            return Err(ValidationErrors::single(ErrorDetail::new(
                vec!["body".into()],
                ErrorKind::ModelAttributesType,
            )));
        };

        let mut reader = FieldReader::new(object);
        let features = HousingFeatures {
            longitude: reader.float("longitude", false),
            latitude: reader.float("latitude", false),
            housing_median_age: reader.float("housing_median_age", true),
            total_rooms: reader.float("total_rooms", true),
            total_bedrooms: reader.float("total_bedrooms", true),
            population: reader.float("population", true),
            households: reader.float("households", true),
            median_income: reader.float("median_income", true),
            ocean_proximity: reader.category("ocean_proximity"),
        };
        reader.finish(features)
    }
}
