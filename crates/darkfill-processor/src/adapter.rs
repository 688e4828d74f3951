//! Request/response adapter around [`OrderProcessor`].
//!
//! Turns a raw JSON body into a status code and a JSON response. The
//! transport itself (HTTP server, queue consumer) lives outside this crate.

use darkfill_ingress::SignerRecovery;
use darkfill_types::{
    DarkfillError, ExecutionReport, HealthStatus, OrderRequest, ProcessResponse, Result,
};

use crate::OrderProcessor;

/// Body returned when a response cannot be serialised.
const INTERNAL_FAULT_BODY: &str =
    r#"{"success":false,"code":"INTERNAL_FAULT","message":"Internal server error"}"#;

fn parse_request(body: &[u8]) -> Result<OrderRequest> {
    let malformed = |reason: String| DarkfillError::MalformedRequest { reason };
    let value: serde_json::Value =
        serde_json::from_slice(body).map_err(|e| malformed(e.to_string()))?;
    if !value.is_object() {
        return Err(malformed("request body must be a JSON object".into()));
    }
    serde_json::from_value(value).map_err(|e| malformed(e.to_string()))
}

/// Static liveness payload.
#[must_use]
pub fn health() -> HealthStatus {
    HealthStatus::default()
}

impl<R: SignerRecovery> OrderProcessor<R> {
    /// Split a parsed request into its parts and run the pipeline.
    pub fn process_request(&self, request: OrderRequest) -> Result<ExecutionReport> {
        let (envelope, encoded) = request.into_parts()?;
        self.process(&envelope, &encoded)
    }

    /// Run a parsed request and shape the outcome as a response.
    pub fn respond(&self, request: OrderRequest) -> (u16, ProcessResponse) {
        let wallet = request.wallet_address.clone().unwrap_or_default();
        match self.process_request(request) {
            Ok(report) => (200, ProcessResponse::success(&wallet, &report)),
            Err(err) => {
                if matches!(
                    err,
                    DarkfillError::MissingAuthFields { .. } | DarkfillError::MissingOrderPayload
                ) {
                    tracing::warn!(code = err.code(), "Incomplete order request");
                }
                (err.status_code(), ProcessResponse::failure(&err))
            }
        }
    }

    /// Handle a raw request body end to end.
    ///
    /// Oversized bodies are rejected before parsing. A body that is not a
    /// JSON request object is `MalformedRequest`.
    pub fn handle_json(&self, body: &[u8]) -> (u16, String) {
        let limit = self.config().max_request_bytes;
        let (status, response) = if body.len() > limit {
            let err = DarkfillError::PayloadTooLarge {
                size: body.len(),
                limit,
            };
            tracing::warn!(size = body.len(), limit, "Request body too large");
            (err.status_code(), ProcessResponse::failure(&err))
        } else {
            match parse_request(body) {
                Ok(request) => self.respond(request),
                Err(err) => {
                    tracing::warn!(error = %err, "Unparseable order request");
                    (err.status_code(), ProcessResponse::failure(&err))
                }
            }
        };

        match serde_json::to_string(&response) {
            Ok(json) => (status, json),
            Err(e) => {
                tracing::error!(error = %e, "Failed to serialise response");
                (500, INTERNAL_FAULT_BODY.to_string())
            }
        }
    }
}
