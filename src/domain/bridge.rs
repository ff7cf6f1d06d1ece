// Copyright (c) 2025 - Cowboy AI, Inc.
//! Bridge interface desired state, persisted state, and MAAS parameters

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

use super::interface::NetworkInterface;
use super::network::Mtu;
use crate::errors::{BridgeError, BridgeResult};

/// Bridge implementation MAAS configures on the machine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BridgeKind {
    Standard,
    Ovs,
}

impl fmt::Display for BridgeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BridgeKind::Standard => f.write_str("standard"),
            BridgeKind::Ovs => f.write_str("ovs"),
        }
    }
}

/// Desired configuration of a bridge interface
///
/// `machine` and `mac_address` identify the bridge and cannot change once it
/// exists; every other field is converged by an update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BridgeSpec {
    /// System ID, hostname, or FQDN
    pub machine: String,
    /// MAC address of the physical interface being bridged
    pub mac_address: String,
    /// MAAS VLAN id; untagged when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vlan: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub tags: BTreeSet<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mtu: Option<Mtu>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bridge_type: Option<BridgeKind>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bridge_stp: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bridge_fd: Option<u32>,
}

impl BridgeSpec {
    pub fn new(machine: impl Into<String>, mac_address: impl Into<String>) -> Self {
        Self {
            machine: machine.into(),
            mac_address: mac_address.into(),
            vlan: None,
            name: None,
            tags: BTreeSet::new(),
            mtu: None,
            bridge_type: None,
            bridge_stp: None,
            bridge_fd: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_vlan(mut self, vlan: impl Into<String>) -> Self {
        self.vlan = Some(vlan.into());
        self
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_mtu(mut self, mtu: Mtu) -> Self {
        self.mtu = Some(mtu);
        self
    }
}

/// Parameters accepted by `create_bridge` and interface update
///
/// Each field feeds the MAAS parameter of the same name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BridgeParams {
    pub name: Option<String>,
    pub mac_address: String,
    /// Interface ids the bridge sits on; only sent on creation
    pub parents: Vec<i64>,
    pub vlan: Option<String>,
    pub tags: BTreeSet<String>,
    pub mtu: Option<u32>,
    pub bridge_type: Option<BridgeKind>,
    pub bridge_stp: Option<bool>,
    pub bridge_fd: Option<u32>,
}

impl BridgeParams {
    pub fn from_spec(spec: &BridgeSpec) -> Self {
        Self {
            name: spec.name.clone(),
            mac_address: spec.mac_address.clone(),
            parents: Vec::new(),
            vlan: spec.vlan.clone(),
            tags: spec.tags.clone(),
            mtu: spec.mtu.map(|m| m.value()),
            bridge_type: spec.bridge_type,
            bridge_stp: spec.bridge_stp,
            bridge_fd: spec.bridge_fd,
        }
    }

    pub fn with_parent(mut self, interface_id: i64) -> Self {
        self.parents.push(interface_id);
        self
    }

    /// Form-encoded pairs in the shape the MAAS API expects.
    ///
    /// `parents` repeats the key once per id. `tags` is always present so an
    /// empty set clears the remote tags on update.
    pub fn to_form(&self) -> Vec<(&'static str, String)> {
        let mut form = Vec::new();

        if let Some(name) = &self.name {
            form.push(("name", name.clone()));
        }
        form.push(("mac_address", self.mac_address.clone()));
        for parent in &self.parents {
            form.push(("parents", parent.to_string()));
        }
        if let Some(vlan) = &self.vlan {
            form.push(("vlan", vlan.clone()));
        }
        form.push(("tags", self.tags.iter().cloned().collect::<Vec<_>>().join(",")));
        if let Some(mtu) = self.mtu {
            form.push(("mtu", mtu.to_string()));
        }
        if let Some(kind) = self.bridge_type {
            form.push(("bridge_type", kind.to_string()));
        }
        if let Some(stp) = self.bridge_stp {
            form.push(("bridge_stp", stp.to_string()));
        }
        if let Some(fd) = self.bridge_fd {
            form.push(("bridge_fd", fd.to_string()));
        }

        form
    }
}

/// Locally persisted record of a managed bridge
///
/// `id` is the stringified MAAS interface id and is empty until the bridge
/// has been created or imported.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BridgeState {
    pub id: String,
    pub machine: String,
    #[serde(default)]
    pub parents: Vec<String>,
    #[serde(default)]
    pub bridge_type: String,
    #[serde(default)]
    pub mac_address: String,
    #[serde(default)]
    pub vlan: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub tags: BTreeSet<String>,
    #[serde(default)]
    pub mtu: Option<u32>,
}

impl BridgeState {
    /// Build a state record from a remote interface on `machine`
    pub fn adopt(machine: impl Into<String>, iface: &NetworkInterface) -> Self {
        let mut state = Self {
            id: iface.id.to_string(),
            machine: machine.into(),
            parents: iface.parents.clone(),
            bridge_type: iface.interface_type.to_string(),
            mac_address: iface.mac_address.clone(),
            vlan: iface.vlan_id().map(|id| id.to_string()),
            ..Default::default()
        };
        state.refresh(iface);
        state
    }

    /// Copy the update-relevant attributes from a fresh remote read
    pub fn refresh(&mut self, iface: &NetworkInterface) {
        self.name = Some(iface.name.clone());
        self.tags = iface.tags.iter().cloned().collect();
        self.mtu = Some(iface.effective_mtu);
    }

    pub fn is_created(&self) -> bool {
        !self.id.is_empty()
    }

    /// Numeric interface id parsed from the persisted identifier
    pub fn interface_id(&self) -> BridgeResult<i64> {
        self.id
            .parse::<i64>()
            .map_err(|source| BridgeError::MalformedId {
                id: self.id.clone(),
                source,
            })
    }
}
