// crates/cube-conformance-client/src/envelope.rs
// ============================================================================
// Module: Response Envelope
// Description: Raw, uninterpreted outcome of one dispatched request.
// Purpose: Carry status, reason, and body without judging them.
// Dependencies: none
// ============================================================================

//! ## Overview
//! The envelope is produced once per dispatch and never mutated. The
//! dispatcher records what the server said and nothing more; deciding
//! whether a non-2xx status is a regression or the expected outcome of a
//! negative scenario belongs to the harness and the scenario itself.

// ============================================================================
// SECTION: Response Envelope
// ============================================================================

/// Raw outcome of one dispatched request.
///
/// # Invariants
/// - Immutable once produced.
/// - `is_successful` mirrors a 2xx status and nothing else.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseEnvelope {
    /// HTTP status code.
    pub status_code: u16,
    /// Canonical reason phrase for the status.
    pub reason: String,
    /// Raw response body text.
    pub raw_body: String,
    /// Whether the status is in the 2xx range.
    pub is_successful: bool,
}

impl ResponseEnvelope {
    /// Renders the status line for diagnostics.
    #[must_use]
    pub fn status_line(&self) -> String {
        format!("{} {}", self.status_code, self.reason)
    }
}
