/// Typed failures raised by the Palette API client
use reqwest::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PaletteError {
    /// The API answered with a non-success status
    #[error("API request failed with status {status}: {body}")]
    Api { status: StatusCode, body: String },

    /// The API described a cluster without giving its uid
    #[error("API response for cluster {name} did not contain a uid")]
    MissingUid { name: String },
}
