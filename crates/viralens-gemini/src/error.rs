use thiserror::Error;

/// Errors returned by the generative analysis calls.
///
/// Both variants carry a reason string covering every failure mode of one
/// attempt: transport failure, a service-reported error, an empty body, or
/// output that does not conform to the requested schema. No partial result
/// ever survives these.
#[derive(Debug, Error)]
pub enum InsightError {
    #[error("analysis failed: {0}")]
    AnalysisFailed(String),

    #[error("outline generation failed: {0}")]
    OutlineFailed(String),
}
