use axum::{
    body::Bytes,
    extract::{FromRequest, Request},
};
use serde_json::Value;
use crate::schema::{HousingFeatures, ValidationErrors};
use super::ApiError;

/// Extracts a JSON body and validates it as [`HousingFeatures`].
///
/// Unlike `axum::Json`, rejection carries every offending field rather than the first
/// deserialization error, and renders as a 422 `{"detail": [...]}` list. A body that
/// cannot be read at all (e.g. over the size limit) keeps axum's own status.
#[derive(Debug, Clone, Copy)]
pub struct ValidatedFeatures(pub HousingFeatures);

impl<S> FromRequest<S> for ValidatedFeatures
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let body = Bytes::from_request(req, state).await?;
        if body.is_empty() {
            return Err(ValidationErrors::missing_body().into());
        }

        let payload: Value = serde_json::from_slice(&body).map_err(|err| {
            ValidationErrors::json_invalid(byte_offset(&body, err.line(), err.column()))
        })?;

        Ok(HousingFeatures::validate(&payload).map(ValidatedFeatures)?)
    }
}

/// Byte offset into `body` of a 1-based `line` and `column`, as reported by serde_json.
///
/// A column of `0` (reported at end of input) points at the start of the line.
fn byte_offset(body: &[u8], line: usize, column: usize) -> usize {
    let line_start: usize = body
        .split(|byte| *byte == b'\n')
        .take(line.saturating_sub(1))
        .map(|line| line.len() + 1)
        .sum();
    (line_start + column.saturating_sub(1)).min(body.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offset_on_first_line() {
        assert_eq!(byte_offset(b"{\"a\": x}", 1, 7), 6);
    }

    #[test]
    fn test_offset_counts_previous_lines() {
        let body = b"{\n  \"longitude\": 1.0,\n  \"latitude\": oops\n}";
        let err = serde_json::from_slice::<Value>(body).unwrap_err();

        let offset = byte_offset(body, err.line(), err.column());

        assert_eq!(err.line(), 3);
        assert_eq!(body[offset], b'o');
    }

    #[test]
    fn test_offset_clamped_to_body() {
        assert_eq!(byte_offset(b"{", 4, 10), 1);
    }
}
