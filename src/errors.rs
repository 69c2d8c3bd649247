// Client errors

/// Errors returned by the Lygos API client.
///
/// Each documented HTTP status maps to its own variant so callers can
/// match on a specific failure, or handle the enum as a whole for
/// uniform error handling. Transport failures (DNS, connection refused,
/// timeout) are kept separate from API status errors in [`Network`].
///
/// [`Network`]: LygosError::Network
#[derive(Debug, thiserror::Error)]
pub enum LygosError {
    /// 400 - the request was malformed
    #[error("bad request: {0}")]
    BadRequest(String),

    /// 401 - the API key was missing or rejected
    #[error("authentication failed: {0}")]
    Authentication(String),

    /// 403 - the API key is not allowed to access this resource
    #[error("permission denied: {0}")]
    PermissionDenied(String),

    /// 404 - the requested resource does not exist
    #[error("not found: {0}")]
    NotFound(String),

    /// 409 - the request conflicts with the current server state
    #[error("conflict: {0}")]
    Conflict(String),

    /// 422 - the request was well-formed but contains invalid data
    #[error("unprocessable entity: {0}")]
    UnprocessableEntity(String),

    /// 500 - internal server error
    #[error("server error: {0}")]
    Server(String),

    /// 502 - invalid response from an upstream server
    #[error("bad gateway: {0}")]
    BadGateway(String),

    /// 503 - the service is temporarily unavailable
    #[error("service unavailable: {0}")]
    ServiceUnavailable(String),

    /// 504 - an upstream server did not respond in time
    #[error("gateway timeout: {0}")]
    GatewayTimeout(String),

    /// Any other non-2xx status
    #[error("API error (HTTP {status}): {message}")]
    Api { status: u16, message: String },

    /// Transport-level failure before an HTTP status was received
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The server returned 2xx but the body could not be parsed
    #[error("invalid response: {0}")]
    Decode(String),

    /// The client was constructed with invalid configuration
    #[error("configuration error: {0}")]
    Config(String),

    /// An update was requested with no fields to change
    #[error("no update fields provided")]
    EmptyUpdate,
}

impl LygosError {
    /// Map a non-2xx HTTP status and server message to the matching
    /// error variant. Unrecognized statuses fall back to [`Api`].
    ///
    /// [`Api`]: LygosError::Api
    pub fn from_status(status: u16, message: String) -> Self {
        match status {
            400 => LygosError::BadRequest(message),
            401 => LygosError::Authentication(message),
            403 => LygosError::PermissionDenied(message),
            404 => LygosError::NotFound(message),
            409 => LygosError::Conflict(message),
            422 => LygosError::UnprocessableEntity(message),
            500 => LygosError::Server(message),
            502 => LygosError::BadGateway(message),
            503 => LygosError::ServiceUnavailable(message),
            504 => LygosError::GatewayTimeout(message),
            _ => LygosError::Api { status, message },
        }
    }

    /// The HTTP status code behind this error, where one exists.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            LygosError::BadRequest(_) => Some(400),
            LygosError::Authentication(_) => Some(401),
            LygosError::PermissionDenied(_) => Some(403),
            LygosError::NotFound(_) => Some(404),
            LygosError::Conflict(_) => Some(409),
            LygosError::UnprocessableEntity(_) => Some(422),
            LygosError::Server(_) => Some(500),
            LygosError::BadGateway(_) => Some(502),
            LygosError::ServiceUnavailable(_) => Some(503),
            LygosError::GatewayTimeout(_) => Some(504),
            LygosError::Api { status, .. } => Some(*status),
            LygosError::Network(err) => err.status().map(|s| s.as_u16()),
            LygosError::Decode(_) | LygosError::Config(_) | LygosError::EmptyUpdate => None,
        }
    }
}
