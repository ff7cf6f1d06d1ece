// Copyright (c) 2025 - Cowboy AI, Inc.
//! MAAS machine and network interface representations
//!
//! These mirror the JSON returned by the MAAS 2.0 API. Only the fields the
//! reconciler reads are modelled; everything else in the payload is ignored.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A machine known to MAAS
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Machine {
    pub system_id: String,
    #[serde(default)]
    pub hostname: String,
    #[serde(default)]
    pub fqdn: String,
}

impl Machine {
    /// True if `identifier` is this machine's system ID, hostname, or FQDN
    pub fn is_identified_by(&self, identifier: &str) -> bool {
        self.system_id == identifier || self.hostname == identifier || self.fqdn == identifier
    }
}

/// Interface kind discriminator (`type` in the MAAS payload)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InterfaceType {
    Physical,
    Bridge,
    Bond,
    Vlan,
    Alias,
    #[serde(other)]
    Unknown,
}

impl InterfaceType {
    pub fn as_str(&self) -> &'static str {
        match self {
            InterfaceType::Physical => "physical",
            InterfaceType::Bridge => "bridge",
            InterfaceType::Bond => "bond",
            InterfaceType::Vlan => "vlan",
            InterfaceType::Alias => "alias",
            InterfaceType::Unknown => "unknown",
        }
    }
}

impl fmt::Display for InterfaceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// VLAN an interface is attached to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vlan {
    /// MAAS database id, the value accepted by the `vlan` parameter
    pub id: i64,
    /// 802.1Q tag, 0 for untagged
    #[serde(default)]
    pub vid: u16,
}

/// A network interface as currently applied on the remote service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkInterface {
    pub id: i64,
    #[serde(rename = "type")]
    pub interface_type: InterfaceType,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub mac_address: String,
    #[serde(default)]
    pub vlan: Option<Vlan>,
    /// Names of the interfaces this one is built on, in MAAS order
    #[serde(default)]
    pub parents: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub effective_mtu: u32,
}

impl NetworkInterface {
    pub fn is_bridge(&self) -> bool {
        self.interface_type == InterfaceType::Bridge
    }

    pub fn vlan_id(&self) -> Option<i64> {
        self.vlan.as_ref().map(|v| v.id)
    }
}
