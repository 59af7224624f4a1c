// Copyright (c) Microsoft Corporation. All rights reserved.
// Licensed under the MIT License.

//! Error types for Cosmos DB operations.

use azure_core::http::StatusCode;
use serde_json::Value;
use std::fmt;

/// A specialized `Result` type for Cosmos DB operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors produced by the Cosmos DB client.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The account key could not be decoded or used as an HMAC key. This is never retried.
    #[error("invalid account key")]
    Credential(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Mutually exclusive options were supplied for a single request.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The service answered with an HTTP status of 400 or above.
    #[error(transparent)]
    HttpResponse(#[from] CosmosError),

    /// The transport failed before a response was received. Passed through unchanged.
    #[error(transparent)]
    Transport(#[from] azure_core::Error),

    /// A request or response body could not be (de)serialized.
    #[error("data conversion failed")]
    DataConversion(#[from] serde_json::Error),

    /// A response body was missing an expected field.
    #[error("response body has no field named '{0}'")]
    MissingField(String),

    #[error("invalid endpoint url")]
    Url(#[from] url::ParseError),

    #[error("failed to format request date")]
    DateFormat(#[from] time::error::Format),
}

impl From<base64::DecodeError> for Error {
    fn from(error: base64::DecodeError) -> Self {
        Self::Credential(Box::new(error))
    }
}

impl Error {
    pub(crate) fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }

    /// Returns the HTTP status code if this error was caused by a failed service response.
    pub fn http_status(&self) -> Option<StatusCode> {
        match self {
            Error::HttpResponse(e) => Some(e.http_status_code()),
            _ => None,
        }
    }
}

/// A failed service response, raised when the client is configured to raise on failure.
///
/// Carries the status code, the decoded response body and a human-readable message.
#[derive(Debug, Clone)]
pub struct CosmosError {
    http_status_code: StatusCode,
    response: Value,
    message: String,
}

impl CosmosError {
    pub fn new(http_status_code: StatusCode, response: Value, message: impl AsRef<str>) -> Self {
        let message = match response.get("message") {
            Some(Value::String(m)) => format!("{}\n --> response: {}", message.as_ref(), m),
            Some(m) => format!("{}\n --> response: {}", message.as_ref(), m),
            None => format!("{}\n --> response: {}", message.as_ref(), response),
        };
        Self {
            http_status_code,
            response,
            message,
        }
    }

    pub fn http_status_code(&self) -> StatusCode {
        self.http_status_code
    }

    /// The decoded body of the failed response.
    pub fn response(&self) -> &Value {
        &self.response
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for CosmosError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "HTTP {}: {}",
            u16::from(self.http_status_code),
            self.message
        )
    }
}

impl std::error::Error for CosmosError {}
