/// Classified failures from the generation model, per the ordered rules in
/// [`classify`](crate::classify).
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    /// The model or platform blocked the generation on policy grounds.
    #[error("Generation blocked by safety policy: {reason}")]
    SafetyBlocked { reason: String },

    /// The model declined an image request and answered with text instead.
    /// Distinct from a transport failure; never billed.
    #[error("Model declined to generate: {message}")]
    Refused { message: String },

    /// The response arrived but deviated from the expected shape (bad
    /// finish reason, missing or undecodable payload, schema mismatch).
    #[error("Malformed model response: {0}")]
    Malformed(String),

    /// The response carried no candidates at all.
    #[error("Model returned an empty response")]
    Empty,

    /// Request-level failure: network, timeout, or a non-2xx status.
    #[error("Model transport error: {0}")]
    Transport(String),
}

impl GatewayError {
    /// Whether this failure is a policy block (safety or refusal). Policy
    /// blocks must not be charged to the requester.
    pub fn is_policy_block(&self) -> bool {
        matches!(
            self,
            GatewayError::SafetyBlocked { .. } | GatewayError::Refused { .. }
        )
    }
}

impl From<reqwest::Error> for GatewayError {
    fn from(err: reqwest::Error) -> Self {
        GatewayError::Transport(err.to_string())
    }
}
