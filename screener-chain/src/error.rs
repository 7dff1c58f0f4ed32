use serde::{Deserialize, Serialize};
use thiserror::Error;

/// All errors generated while decoding data source payloads in `screener-chain`.
///
/// Formatting and view assembly are total and never produce errors; only the boundary where raw
/// JSON documents enter the crate can fail.
#[derive(Debug, Clone, Eq, PartialEq, Deserialize, Serialize, Error)]
pub enum DataError {
    #[error("failed to decode payload: {0}")]
    Decode(String),

    #[error("payload missing required field: {0}")]
    MissingField(&'static str),
}

impl From<serde_json::Error> for DataError {
    fn from(value: serde_json::Error) -> Self {
        Self::Decode(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_error_from_serde_json() {
        let error = serde_json::from_str::<serde_json::Value>("{not json")
            .map(|_| ())
            .map_err(DataError::from)
            .unwrap_err();

        assert!(matches!(error, DataError::Decode(_)));
        assert!(error.to_string().starts_with("failed to decode payload"));
    }

    #[test]
    fn test_data_error_display() {
        assert_eq!(
            DataError::MissingField("ticker").to_string(),
            "payload missing required field: ticker"
        );
    }
}
