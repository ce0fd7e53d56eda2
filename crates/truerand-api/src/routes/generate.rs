//! Routes for random sequence generation.

use axum::extract::{Query, State};
use axum::{Json, Router, middleware, routing::get};
use serde::Serialize;
use tracing::{Span, error, field, info, instrument};
use truerand_core::error::GenerationError;
use uuid::Uuid;

use truerand_generation::application::command_handlers;
use truerand_generation::domain::commands::GenerateSequence;
use truerand_generation::domain::request::GenerationRequest;

use crate::error::ApiError;
use crate::middleware::limit_rate;
use crate::state::AppState;

/// Query string for GET /generate. Both values stay raw so that validation
/// owns every rejection, including missing parameters.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct GenerateQuery {
    /// Element width token: `uint8`, `uint16` or `uint32`.
    pub kind: Option<String>,
    /// Number of values to draw, as a decimal string.
    pub length: Option<String>,
}

impl GenerateQuery {
    /// Picks `type` and `length` out of decoded query pairs. A repeated key
    /// keeps its first value; unknown keys are ignored.
    #[must_use]
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        let mut query = Self::default();
        for (key, value) in pairs {
            match key.as_str() {
                "type" if query.kind.is_none() => query.kind = Some(value),
                "length" if query.length.is_none() => query.length = Some(value),
                _ => {}
            }
        }
        query
    }
}

/// Success envelope carrying the generated values in draw order.
#[derive(Debug, Serialize)]
pub struct GenerateResponse {
    /// Envelope outcome, always `"Success"`.
    pub code: &'static str,
    /// Human-readable outcome.
    pub message: &'static str,
    /// The random values.
    pub data: Vec<u32>,
}

impl GenerateResponse {
    fn new(data: Vec<u32>) -> Self {
        Self {
            code: "Success",
            message: "success",
            data,
        }
    }
}

/// GET /generate
#[instrument(skip_all, fields(kind = field::Empty, length = field::Empty))]
async fn generate(
    State(state): State<AppState>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<Json<GenerateResponse>, ApiError> {
    let query = GenerateQuery::from_pairs(pairs);
    let span = Span::current();
    span.record("kind", query.kind.as_deref());
    span.record("length", query.length.as_deref());

    let request = GenerationRequest::parse(query.kind.as_deref(), query.length.as_deref())
        .inspect_err(|e| info!(error = %e, "rejected generation request"))?;

    let command = GenerateSequence {
        correlation_id: Uuid::new_v4(),
        request,
    };

    info!(
        correlation_id = %command.correlation_id,
        width = %request.width(),
        count = request.count(),
        "handling generate_sequence command"
    );

    let generation =
        command_handlers::handle_generate_sequence(&command, state.entropy_source.as_ref());

    let sequence = match state.read_timeout {
        Some(limit) => tokio::time::timeout(limit, generation).await.map_err(|_| {
            error!(
                correlation_id = %command.correlation_id,
                timeout = ?limit,
                "entropy source did not deliver in time"
            );
            GenerationError::SourceReadFailure(format!(
                "timed out after {}ms",
                limit.as_millis()
            ))
        })??,
        None => generation.await?,
    };

    Ok(Json(GenerateResponse::new(sequence.into_values())))
}

/// Returns the router for generation. Every matched route is gated by the
/// shared rate limiter before any validation runs.
pub fn router(state: &AppState) -> Router<AppState> {
    Router::new()
        .route("/generate", get(generate))
        .route_layer(middleware::from_fn_with_state(state.clone(), limit_rate))
}
