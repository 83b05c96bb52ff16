#[derive(Debug, thiserror::Error)]
pub enum ConsentError {
    #[error("Consent value could not be encoded or decoded: {0}")]
    Codec(#[from] serde_json::Error),

    #[error("Cookie expiry date could not be formatted: {0}")]
    Clock(#[from] time::error::Format),
}
