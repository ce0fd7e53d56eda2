//! Request admission middleware.

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;
use tracing::warn;
use truerand_core::error::GenerationError;

use crate::error::ApiError;
use crate::state::AppState;

/// Rejects the request with `429 Too Many Requests` unless the shared limiter
/// admits it. Admitted requests proceed untouched.
///
/// # Errors
///
/// Returns `ApiError` wrapping `GenerationError::RateLimitExceeded` when no
/// token is available.
pub async fn limit_rate(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    if !state.limiter.allow() {
        warn!(method = %request.method(), uri = %request.uri(), "rate limit exceeded");
        return Err(GenerationError::RateLimitExceeded.into());
    }
    Ok(next.run(request).await)
}
