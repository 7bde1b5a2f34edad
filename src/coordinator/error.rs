//! Submission rejection reasons.

use thiserror::Error;

/// Why a submission was not dispatched.
///
/// Request failures are not errors at this level: they settle the
/// coordinator into `Failed` and are reported through its state.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SubmitError {
    /// Neither a URL nor any text was provided.
    #[error("Please enter a URL or text to summarize.")]
    Validation,

    /// Another request is still in flight; the new one was ignored.
    #[error("A summary is already being processed (request #{sequence})")]
    Busy { sequence: u64 },
}
