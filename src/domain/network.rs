// Copyright (c) 2025 - Cowboy AI, Inc.
//! Network Value Objects with Validation Invariants

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Network validation error
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum NetworkError {
    #[error("Invalid MAC address format: {0}")]
    InvalidMacAddress(String),

    #[error("Invalid MTU: {0} (must be 552-65535)")]
    InvalidMtu(u32),
}

/// MAC Address value object
///
/// Represents a 48-bit MAC address with validation.
/// Invariants:
/// - Valid MAC address format (6 octets)
/// - Canonical representation (lowercase, colon-separated)
///
/// MAAS reports MAC addresses in lowercase while operators often paste them
/// in uppercase, so comparisons go through this type rather than raw strings.
///
/// # Examples
///
/// ```rust
/// use maas_bridge::domain::MacAddress;
///
/// let mac = MacAddress::new("00-11-22-AA-BB-CC").unwrap();
/// assert_eq!(mac.as_str(), "00:11:22:aa:bb:cc");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct MacAddress([u8; 6]);

impl MacAddress {
    /// Create a new MAC address with validation
    ///
    /// # Invariants
    /// - Valid MAC address format
    /// - 6 octets (48 bits)
    pub fn new(mac: impl AsRef<str>) -> Result<Self, NetworkError> {
        let mac = mac.as_ref();
        let invalid = || NetworkError::InvalidMacAddress(mac.to_string());

        // Invariant: six groups of two hex digits, either bare or joined by
        // a single ':' or '-' used consistently
        let groups: Vec<&str> = match mac.len() {
            12 => (0..12)
                .step_by(2)
                .map(|i| mac.get(i..i + 2))
                .collect::<Option<_>>()
                .ok_or_else(invalid)?,
            17 => {
                let sep = if mac.contains(':') { ':' } else { '-' };
                mac.split(sep).collect()
            }
            _ => return Err(invalid()),
        };

        if groups.len() != 6 {
            return Err(invalid());
        }

        let mut octets = [0u8; 6];
        for (octet, group) in octets.iter_mut().zip(&groups) {
            if group.len() != 2 || !group.bytes().all(|b| b.is_ascii_hexdigit()) {
                return Err(invalid());
            }
            *octet = u8::from_str_radix(group, 16).map_err(|_| invalid())?;
        }

        Ok(Self(octets))
    }

    /// Get as canonical string (lowercase, colon-separated)
    pub fn as_str(&self) -> String {
        format!(
            "{:02x}:{:02x}:{:02x}:{:02x}:{:02x}:{:02x}",
            self.0[0], self.0[1], self.0[2], self.0[3], self.0[4], self.0[5]
        )
    }

    /// Compare two MAC strings.
    ///
    /// Both sides are normalized when they parse; otherwise falls back to
    /// exact equality so that partial or vendor-specific notations still match
    /// themselves.
    pub fn same(a: &str, b: &str) -> bool {
        match (MacAddress::new(a), MacAddress::new(b)) {
            (Ok(a), Ok(b)) => a == b,
            _ => a == b,
        }
    }
}

impl fmt::Display for MacAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for MacAddress {
    type Err = NetworkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for MacAddress {
    type Error = NetworkError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<MacAddress> for String {
    fn from(mac: MacAddress) -> Self {
        mac.as_str()
    }
}

/// MTU (Maximum Transmission Unit) value object
///
/// Invariants:
/// - 552 = smallest MTU MAAS accepts on an interface
/// - 65535 = largest MTU MAAS accepts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct Mtu(u32);

impl Mtu {
    /// Minimum MTU
    pub const MIN: u32 = 552;

    /// Maximum MTU
    pub const MAX: u32 = 65535;

    /// Standard Ethernet MTU
    pub const STANDARD_ETHERNET: u32 = 1500;

    /// Create a new MTU with validation
    pub fn new(size: u32) -> Result<Self, NetworkError> {
        if !(Self::MIN..=Self::MAX).contains(&size) {
            return Err(NetworkError::InvalidMtu(size));
        }

        Ok(Self(size))
    }

    /// Get the MTU value
    pub fn value(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for Mtu {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<u32> for Mtu {
    type Error = NetworkError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Mtu> for u32 {
    fn from(mtu: Mtu) -> Self {
        mtu.0
    }
}
