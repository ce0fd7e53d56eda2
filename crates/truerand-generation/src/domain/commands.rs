//! Commands for the generation context.

use uuid::Uuid;

use super::request::GenerationRequest;

/// Command to draw a random sequence from the entropy source.
#[derive(Debug, Clone)]
pub struct GenerateSequence {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The validated width and count to generate.
    pub request: GenerationRequest,
}
