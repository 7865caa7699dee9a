//! Error type definitions.
//!
//! This module defines the error taxonomy used throughout the audit engine.
//! Network-layer failures are caught at the check-module boundary and turned
//! into `success: false` envelopes; they never crash a request handler.

use log::SetLoggerError;
use reqwest::Error as ReqwestError;
use thiserror::Error;

/// Error types for initialization failures.
#[derive(Error, Debug)]
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),

    /// Error initializing the HTTP client.
    #[error("HTTP client initialization error: {0}")]
    HttpClientError(#[from] ReqwestError),
}

/// Errors produced while auditing a target URL.
///
/// The user-visible message (German, matching the checklist UI) is carried by
/// the `Display` impl; `details()` exposes the underlying technical message
/// where one exists.
#[derive(Error, Debug)]
pub enum AuditError {
    /// No URL was supplied in the request body.
    #[error("URL ist erforderlich")]
    MissingUrl,

    /// The supplied string could not be parsed as an absolute http(s) URL.
    #[error("Ungültige URL")]
    InvalidUrl(String),

    /// A probe did not complete within its time bound.
    #[error("Website nicht erreichbar")]
    Timeout,

    /// DNS, connection, or TLS failure while probing.
    #[error("Website nicht erreichbar")]
    Network(String),

    /// The document body could not be read or decoded.
    #[error("Website nicht erreichbar oder HTML nicht parsebar")]
    Parse(String),

    /// The redirect chain walk failed at the network layer.
    #[error("Fehler beim Testen der Weiterleitungen")]
    RedirectTest(String),

    /// Any uncategorized failure.
    #[error("Server Fehler")]
    Server(String),
}

impl AuditError {
    /// Technical detail string for the response envelope, if any.
    pub fn details(&self) -> Option<String> {
        match self {
            AuditError::MissingUrl => None,
            AuditError::InvalidUrl(detail)
            | AuditError::Network(detail)
            | AuditError::Parse(detail)
            | AuditError::RedirectTest(detail)
            | AuditError::Server(detail) => Some(detail.clone()),
            AuditError::Timeout => Some("Zeitüberschreitung der Anfrage".to_string()),
        }
    }

    /// Whether this error was caused by bad client input (maps to HTTP 400).
    pub fn is_input_error(&self) -> bool {
        matches!(self, AuditError::MissingUrl | AuditError::InvalidUrl(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_url_message() {
        assert_eq!(AuditError::MissingUrl.to_string(), "URL ist erforderlich");
        assert!(AuditError::MissingUrl.details().is_none());
    }

    #[test]
    fn test_network_error_carries_details() {
        let err = AuditError::Network("dns error: no such host".to_string());
        assert_eq!(err.to_string(), "Website nicht erreichbar");
        assert_eq!(err.details().as_deref(), Some("dns error: no such host"));
    }

    #[test]
    fn test_input_error_classification() {
        assert!(AuditError::MissingUrl.is_input_error());
        assert!(AuditError::InvalidUrl("x".into()).is_input_error());
        assert!(!AuditError::Timeout.is_input_error());
        assert!(!AuditError::Server("boom".into()).is_input_error());
    }
}
