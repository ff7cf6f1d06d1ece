// Copyright (c) 2025 - Cowboy AI, Inc.
//! Bridge lookup on a machine
//!
//! Locates at most one bridge interface among everything MAAS reports for a
//! machine. The identifying token may be a MAC address, an interface name, or
//! a stringified interface id. Matching precedence is fixed:
//!
//! 1. MAC address (case and separator insensitive)
//! 2. interface name
//! 3. interface id
//!
//! so that a bridge whose name happens to look like another bridge's id does
//! not depend on list order. Interfaces that are not bridges never match.

use tracing::debug;

use crate::api::MaasApi;
use crate::domain::{InterfaceType, MacAddress, NetworkInterface};
use crate::errors::{BridgeError, BridgeResult};

/// Pick the bridge matching `identifier` from an interface list
pub fn find_bridge_in<'a>(
    interfaces: &'a [NetworkInterface],
    identifier: &str,
) -> Option<&'a NetworkInterface> {
    let bridges = move || interfaces.iter().filter(|n| n.is_bridge());

    bridges()
        .find(|n| !n.mac_address.is_empty() && MacAddress::same(&n.mac_address, identifier))
        .or_else(|| bridges().find(|n| n.name == identifier))
        .or_else(|| bridges().find(|n| n.id.to_string() == identifier))
}

/// Pick the interface a new bridge on `mac_address` should be built on.
///
/// Physical interfaces win over other non-bridge kinds carrying the same MAC
/// (VLAN children inherit their parent's address).
pub fn find_parent_in<'a>(
    interfaces: &'a [NetworkInterface],
    mac_address: &str,
) -> Option<&'a NetworkInterface> {
    let candidates = move || {
        interfaces
            .iter()
            .filter(move |n| !n.is_bridge() && MacAddress::same(&n.mac_address, mac_address))
    };

    candidates()
        .find(|n| n.interface_type == InterfaceType::Physical)
        .or_else(|| candidates().next())
}

/// Read-only bridge lookups against a [`MaasApi`]
pub struct Resolver<'a, A: MaasApi + ?Sized> {
    api: &'a A,
}

impl<'a, A: MaasApi + ?Sized> Resolver<'a, A> {
    pub fn new(api: &'a A) -> Self {
        Self { api }
    }

    /// Find the bridge on `system_id` matching `identifier`.
    ///
    /// `Ok(None)` means the machine has no such bridge; errors come only from
    /// listing the interfaces.
    pub async fn find_bridge(
        &self,
        system_id: &str,
        identifier: &str,
    ) -> BridgeResult<Option<NetworkInterface>> {
        let interfaces = self.api.list_interfaces(system_id).await?;
        let found = find_bridge_in(&interfaces, identifier).cloned();

        debug!(
            system_id,
            identifier,
            interfaces = interfaces.len(),
            found = ?found.as_ref().map(|n| n.id),
            "Bridge lookup"
        );

        Ok(found)
    }

    /// Like [`find_bridge`](Self::find_bridge) but a missing bridge is an error
    pub async fn require_bridge(
        &self,
        system_id: &str,
        identifier: &str,
    ) -> BridgeResult<NetworkInterface> {
        self.find_bridge(system_id, identifier)
            .await?
            .ok_or_else(|| BridgeError::InterfaceNotFound {
                identifier: identifier.to_string(),
                machine: system_id.to_string(),
            })
    }
}
