// Copyright (c) 2025 - Cowboy AI, Inc.
//! Error types for bridge reconciliation

use std::num::ParseIntError;

use thiserror::Error;

use crate::domain::NetworkError;

/// Errors that can occur while reconciling a bridge interface
#[derive(Debug, Error)]
pub enum BridgeError {
    /// The MAAS API answered with a non-success status
    #[error("MAAS API returned {status}: {body}")]
    Api { status: u16, body: String },

    /// The request never produced a response (connect, TLS, timeout, decode)
    #[error("MAAS transport error: {0}")]
    Transport(String),

    /// No machine matched the system ID, hostname, or FQDN
    #[error("machine ({0}) was not found")]
    MachineNotFound(String),

    /// No bridge interface matched the identifier on the machine
    #[error("network interface ({identifier}) was not found on machine ({machine})")]
    InterfaceNotFound { identifier: String, machine: String },

    /// No physical interface carries the MAC address a new bridge should sit on
    #[error("no parent interface with MAC address {mac_address} on machine ({machine})")]
    ParentNotFound { mac_address: String, machine: String },

    /// The persisted identifier is not a decimal interface id
    #[error("invalid network interface id ({id:?}): {source}")]
    MalformedId {
        id: String,
        #[source]
        source: ParseIntError,
    },

    /// The import token is not `MACHINE:NETWORK_INTERFACE`
    #[error("unexpected format of ID ({0:?}), expected MACHINE:NETWORK_INTERFACE")]
    MalformedImportId(String),

    /// A network value object failed validation
    #[error(transparent)]
    Network(#[from] NetworkError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl BridgeError {
    /// True only when MAAS answered 404 for the requested entity.
    ///
    /// Callers use this after `read` to drop a resource that was deleted
    /// out of band. A machine that no longer resolves is not a reason to
    /// forget the bridge.
    pub fn is_not_found(&self) -> bool {
        matches!(self, BridgeError::Api { status: 404, .. })
    }
}

/// Result type for bridge operations
pub type BridgeResult<T> = Result<T, BridgeError>;

#[cfg(feature = "maas")]
impl From<reqwest::Error> for BridgeError {
    fn from(err: reqwest::Error) -> Self {
        BridgeError::Transport(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remote_404_is_not_found() {
        let err = BridgeError::Api {
            status: 404,
            body: "Not Found".to_string(),
        };
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "MAAS API returned 404: Not Found");
    }

    #[test]
    fn test_other_statuses_are_not_not_found() {
        let err = BridgeError::Api {
            status: 500,
            body: String::new(),
        };
        assert!(!err.is_not_found());
        assert!(!BridgeError::MalformedImportId("x".into()).is_not_found());
    }

    #[test]
    fn test_local_lookup_failures_are_not_not_found() {
        assert!(!BridgeError::MachineNotFound("node1".into()).is_not_found());
        let err = BridgeError::InterfaceNotFound {
            identifier: "br0".into(),
            machine: "abc123".into(),
        };
        assert!(!err.is_not_found());
    }

    #[test]
    fn test_malformed_id_message() {
        let source = "abc".parse::<i64>().unwrap_err();
        let err = BridgeError::MalformedId {
            id: "abc".to_string(),
            source,
        };
        assert!(err.to_string().starts_with("invalid network interface id (\"abc\")"));
    }
}
