use std::fmt;

use crate::error::ChallengeError;
use crate::validator::ChallengeFormat;

/// Logger scoped to one challenge call.
///
/// Every event carries the `flow` field (`header` or `redirect_uri`) so
/// challenge handling can be filtered in a subscriber. Key material and proof
/// tokens are never passed to this logger.
#[derive(Debug, Clone, Copy)]
pub(crate) struct ChallengeLog {
    flow: &'static str,
}

impl ChallengeLog {
    pub(crate) const HEADER: Self = Self { flow: "header" };
    pub(crate) const REDIRECT_URI: Self = Self {
        flow: "redirect_uri",
    };

    pub(crate) fn for_format(format: ChallengeFormat) -> Self {
        match format {
            ChallengeFormat::Header => Self::HEADER,
            ChallengeFormat::RedirectUri => Self::REDIRECT_URI,
        }
    }

    /// Returns the flow name attached to every event.
    #[allow(dead_code)] // Used in tests
    pub(crate) fn flow(&self) -> &'static str {
        self.flow
    }

    pub(crate) fn info(&self, args: fmt::Arguments<'_>) {
        tracing::info!(flow = self.flow, "{}", args);
    }

    pub(crate) fn debug(&self, args: fmt::Arguments<'_>) {
        tracing::debug!(flow = self.flow, "{}", args);
    }

    pub(crate) fn warn(&self, args: fmt::Arguments<'_>) {
        tracing::warn!(flow = self.flow, "{}", args);
    }

    /// Logs a failure and hands the error back for propagation.
    pub(crate) fn rejected(&self, err: ChallengeError) -> ChallengeError {
        tracing::warn!(
            flow = self.flow,
            kind = %err.kind(),
            reason = err.message(),
            "device challenge rejected"
        );
        err
    }
}
