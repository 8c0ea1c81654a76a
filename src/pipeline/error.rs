use thiserror::Error;

use crate::llm::LlmError;
use crate::search::SearchError;
use crate::synthesis::SynthesisError;

#[derive(Debug, Error)]
/// Errors that can fail verification of a single claim.
///
/// These never escape [`ClaimPipeline::analyze`](super::ClaimPipeline::analyze);
/// the orchestrator converts them into degraded verdicts so one claim's
/// failure cannot abort its siblings.
pub enum PipelineError {
    /// The claim-review API call failed.
    #[error("claim review search failed: {0}")]
    Search(#[from] SearchError),

    /// Relevance judgement failed.
    #[error("relevance judgement failed: {0}")]
    Llm(#[from] LlmError),

    /// Verdict synthesis failed.
    #[error("verdict synthesis failed: {0}")]
    Synthesis(#[from] SynthesisError),
}

/// Convenience result type for per-claim verification.
pub type PipelineResult<T> = Result<T, PipelineError>;
