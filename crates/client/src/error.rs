use thiserror::Error;

/// Errors returned by [`RelayServerClient`](crate::RelayServerClient).
#[derive(Debug, Error)]
pub enum Error {
    /// The server could not be reached, or the connection dropped mid-request.
    #[error("connection error: {0}")]
    Connection(String),

    /// The client could not be built.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// The server answered with a non-success status outside the envelope
    /// contract.
    #[error("HTTP {status}: {message}")]
    Http { status: u16, message: String },

    /// The response body could not be decoded.
    #[error("deserialization error: {0}")]
    Deserialization(String),
}

impl Error {
    /// Returns `true` if the request never produced an HTTP response.
    pub fn is_connection(&self) -> bool {
        matches!(self, Self::Connection(_))
    }
}
