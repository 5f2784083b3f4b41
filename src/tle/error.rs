use thiserror::Error;

#[derive(Debug, Error)]
pub enum TleError {
    #[error("malformed element record: {field} {reason}")]
    MalformedElementRecord { field: &'static str, reason: String },
    #[error("{field} = {value} does not fit its TLE columns")]
    EncodingOverflow { field: &'static str, value: String },
    #[error("T-{minutes_before}min: {source}")]
    AtOffset {
        minutes_before: u32,
        #[source]
        source: Box<TleError>,
    },
}

impl TleError {
    pub fn malformed(field: &'static str, reason: impl Into<String>) -> Self {
        TleError::MalformedElementRecord {
            field,
            reason: reason.into(),
        }
    }

    pub fn overflow(field: &'static str, value: impl ToString) -> Self {
        TleError::EncodingOverflow {
            field,
            value: value.to_string(),
        }
    }

    /// The error underneath any offset context.
    pub fn root(&self) -> &TleError {
        match self {
            TleError::AtOffset { source, .. } => source.root(),
            other => other,
        }
    }
}
