//! Errors reported by a document client.
//!
//! A client maps whatever its transport produced into a [`ClientError`].
//! The code names follow the service's own exception names so that callers
//! can match on them without knowing which client produced the failure.

use std::fmt;

/// Well-known failure codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum ClientErrorCode {
    /// Table not found.
    ResourceNotFoundException,
    /// A condition expression evaluated to false.
    ConditionalCheckFailedException,
    /// Provisioned throughput exceeded.
    ProvisionedThroughputExceededException,
    /// Account-level request limit exceeded.
    RequestLimitExceeded,
    /// Request rejected as throttled.
    ThrottlingException,
    /// The request was malformed (bad expression, unused placeholder, ...).
    ValidationException,
    /// Credentials rejected.
    AccessDeniedException,
    /// Server-side failure.
    InternalServerError,
    /// The request never produced a service response (I/O, timeout, DNS).
    TransportFailure,
    /// A service error code this crate does not know.
    Unknown,
}

impl ClientErrorCode {
    /// Short code string.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ResourceNotFoundException => "ResourceNotFoundException",
            Self::ConditionalCheckFailedException => "ConditionalCheckFailedException",
            Self::ProvisionedThroughputExceededException => {
                "ProvisionedThroughputExceededException"
            }
            Self::RequestLimitExceeded => "RequestLimitExceeded",
            Self::ThrottlingException => "ThrottlingException",
            Self::ValidationException => "ValidationException",
            Self::AccessDeniedException => "AccessDeniedException",
            Self::InternalServerError => "InternalServerError",
            Self::TransportFailure => "TransportFailure",
            Self::Unknown => "Unknown",
        }
    }

    /// Parse a service error code, e.g. the `__type` suffix of a JSON error.
    #[must_use]
    pub fn from_code(code: &str) -> Self {
        // Fully-qualified codes look like `com.amazonaws.dynamodb.v20120810#Name`.
        let short = code.rsplit('#').next().unwrap_or(code);
        match short {
            "ResourceNotFoundException" => Self::ResourceNotFoundException,
            "ConditionalCheckFailedException" => Self::ConditionalCheckFailedException,
            "ProvisionedThroughputExceededException" => {
                Self::ProvisionedThroughputExceededException
            }
            "RequestLimitExceeded" => Self::RequestLimitExceeded,
            "ThrottlingException" => Self::ThrottlingException,
            "ValidationException" => Self::ValidationException,
            "AccessDeniedException" => Self::AccessDeniedException,
            "InternalServerError" => Self::InternalServerError,
            _ => Self::Unknown,
        }
    }
}

impl fmt::Display for ClientErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A failed client request.
#[derive(Debug)]
pub struct ClientError {
    /// The error code.
    pub code: ClientErrorCode,
    /// A human-readable error message.
    pub message: String,
    /// The underlying source error, if any.
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl fmt::Display for ClientError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ClientError({}): {}", self.code, self.message)
    }
}

impl std::error::Error for ClientError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn std::error::Error + 'static))
    }
}

impl ClientError {
    /// Create an error from a code, using the code as the message.
    #[must_use]
    pub fn new(code: ClientErrorCode) -> Self {
        Self {
            message: code.as_str().to_owned(),
            code,
            source: None,
        }
    }

    /// Create an error with a custom message.
    #[must_use]
    pub fn with_message(code: ClientErrorCode, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            code,
            source: None,
        }
    }

    /// Set the source error.
    #[must_use]
    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// The request did not reach the service or its response was lost.
    #[must_use]
    pub fn transport(message: impl Into<String>) -> Self {
        Self::with_message(ClientErrorCode::TransportFailure, message)
    }
}

/// Create a `ClientError` from an error code.
///
/// # Examples
///
/// ```
/// use dynaparams_model::client_error;
/// use dynaparams_model::error::ClientErrorCode;
///
/// let err = client_error!(ValidationException);
/// assert_eq!(err.code, ClientErrorCode::ValidationException);
///
/// let err = client_error!(ResourceNotFoundException, "Table not found");
/// assert_eq!(err.message, "Table not found");
/// ```
#[macro_export]
macro_rules! client_error {
    ($code:ident) => {
        $crate::error::ClientError::new($crate::error::ClientErrorCode::$code)
    };
    ($code:ident, $msg:expr) => {
        $crate::error::ClientError::with_message($crate::error::ClientErrorCode::$code, $msg)
    };
}
