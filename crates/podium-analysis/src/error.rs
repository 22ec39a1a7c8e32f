//! Error taxonomy for analysis operations.
//!
//! Every error is local to one request: it is surfaced to the caller with a
//! descriptive message and never retried.

use podium_data::gdp::UnknownCountry;

/// Error raised by pipeline operations.
#[derive(Debug, derive_more::Display, derive_more::Error)]
pub enum AnalysisError {
    /// A caller-supplied parameter is out of range or unrecognized.
    #[display("invalid parameter: {message}")]
    InvalidParameter { message: String },
    /// The requested filters left nothing to compute on.
    ///
    /// Returned as an explicit record instead of panicking so dashboard
    /// callers stay resilient.
    #[display("empty result: {context}")]
    EmptyResult { context: String },
    /// A GDP lookup missed; kept as its own variant so callers can
    /// distinguish a bad country code from a malformed request.
    #[display("{source}")]
    UnknownCountry { source: UnknownCountry },
}

impl AnalysisError {
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        AnalysisError::InvalidParameter {
            message: message.into(),
        }
    }

    pub(crate) fn empty(context: impl Into<String>) -> Self {
        AnalysisError::EmptyResult {
            context: context.into(),
        }
    }
}

impl From<UnknownCountry> for AnalysisError {
    fn from(source: UnknownCountry) -> Self {
        AnalysisError::UnknownCountry { source }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        let err = AnalysisError::invalid("multiplier must be at least 1");
        assert_eq!(
            err.to_string(),
            "invalid parameter: multiplier must be at least 1"
        );
        let err = AnalysisError::empty("no rows after filtering");
        assert_eq!(err.to_string(), "empty result: no rows after filtering");
    }
}
