// Copyright (c) 2025 - Cowboy AI, Inc.
//! `MACHINE:NETWORK_INTERFACE` import identifiers

use std::fmt;
use std::str::FromStr;

use crate::errors::{BridgeError, BridgeResult};

/// Parsed import identifier
///
/// The machine part is a system ID, hostname, or FQDN, none of which contain
/// a colon, so the token is split on the first colon only. This keeps MAC
/// addresses usable as the interface part:
///
/// ```rust
/// use maas_bridge::reconciler::ImportId;
///
/// let id: ImportId = "machine123:AA:BB:CC:DD:EE:FF".parse().unwrap();
/// assert_eq!(id.machine, "machine123");
/// assert_eq!(id.interface, "AA:BB:CC:DD:EE:FF");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportId {
    pub machine: String,
    pub interface: String,
}

impl ImportId {
    pub fn parse(token: &str) -> BridgeResult<Self> {
        match token.split_once(':') {
            Some((machine, interface)) if !machine.is_empty() && !interface.is_empty() => {
                Ok(Self {
                    machine: machine.to_string(),
                    interface: interface.to_string(),
                })
            }
            _ => Err(BridgeError::MalformedImportId(token.to_string())),
        }
    }
}

impl FromStr for ImportId {
    type Err = BridgeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for ImportId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.machine, self.interface)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("machine123:br0", "machine123", "br0" ; "name")]
    #[test_case("machine123:17", "machine123", "17" ; "id")]
    #[test_case("node1.maas:aa:bb:cc:dd:ee:ff", "node1.maas", "aa:bb:cc:dd:ee:ff" ; "mac")]
    fn test_parse_valid(token: &str, machine: &str, interface: &str) {
        let id = ImportId::parse(token).unwrap();
        assert_eq!(id.machine, machine);
        assert_eq!(id.interface, interface);
        assert_eq!(id.to_string(), token);
    }

    #[test_case("machine123" ; "no separator")]
    #[test_case("machine123:" ; "empty interface")]
    #[test_case(":br0" ; "empty machine")]
    #[test_case(":" ; "separator only")]
    #[test_case("" ; "empty")]
    fn test_parse_malformed(token: &str) {
        match ImportId::parse(token) {
            Err(BridgeError::MalformedImportId(t)) => assert_eq!(t, token),
            other => panic!("expected MalformedImportId, got {:?}", other),
        }
    }
}
