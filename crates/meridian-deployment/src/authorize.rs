//! Authorization gate for in-process engine callers.

use meridian_contracts::CallerContext;

use crate::error::{DeploymentError, DeploymentResult};

/// Check that the caller presented a usable credential.
///
/// In-process callers reach the engine without passing the edge
/// gateway that rejects unauthenticated requests, so every entry point
/// runs this check before doing any other work. Only the presence of a
/// non-empty token is checked; verifying it is the gateway's job.
pub fn ensure_authorized(context: &dyn CallerContext) -> DeploymentResult<()> {
    match context.token() {
        Some(token) if !token.is_empty() => Ok(()),
        _ => Err(DeploymentError::Unauthorized),
    }
}
