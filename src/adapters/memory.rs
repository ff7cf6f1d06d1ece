// Copyright (c) 2025 - Cowboy AI, Inc.

//! In-memory MAAS adapter
//!
//! Keeps machines and interfaces in process memory and answers the
//! [`MaasApi`] calls the way a region controller would: ids are assigned
//! sequentially, unknown entities produce a 404 `Api` error, and bridges
//! inherit VLAN and MTU from their parent unless told otherwise.
//!
//! Clones share the same state, so a test can hand one clone to a
//! [`BridgeReconciler`](crate::reconciler::BridgeReconciler) and inspect the
//! other.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::debug;

use crate::api::MaasApi;
use crate::domain::{BridgeParams, InterfaceType, Machine, NetworkInterface, Vlan};
use crate::errors::{BridgeError, BridgeResult};

#[derive(Debug, Default)]
struct Inventory {
    machines: Vec<Machine>,
    interfaces: HashMap<String, Vec<NetworkInterface>>,
    next_id: i64,
    create_calls: usize,
    update_calls: usize,
    delete_calls: usize,
}

impl Inventory {
    fn allocate_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }

    fn machine_interfaces(&mut self, system_id: &str) -> BridgeResult<&mut Vec<NetworkInterface>> {
        if !self.machines.iter().any(|m| m.system_id == system_id) {
            return Err(not_found());
        }
        Ok(self.interfaces.entry(system_id.to_string()).or_default())
    }
}

fn not_found() -> BridgeError {
    BridgeError::Api {
        status: 404,
        body: "Not Found".to_string(),
    }
}

fn bad_request(body: impl Into<String>) -> BridgeError {
    BridgeError::Api {
        status: 400,
        body: body.into(),
    }
}

fn parse_vlan(vlan: &str) -> BridgeResult<Vlan> {
    let id = vlan
        .parse::<i64>()
        .map_err(|_| bad_request("{\"vlan\": [\"Select a valid choice.\"]}"))?;
    Ok(Vlan { id, vid: 0 })
}

/// Shared in-process stand-in for a MAAS region controller
#[derive(Debug, Clone, Default)]
pub struct InMemoryMaas {
    inner: Arc<Mutex<Inventory>>,
}

impl InMemoryMaas {
    pub fn new() -> Self {
        Self::default()
    }

    fn inventory(&self) -> MutexGuard<'_, Inventory> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn add_machine(&self, system_id: &str, hostname: &str, fqdn: &str) {
        self.inventory().machines.push(Machine {
            system_id: system_id.to_string(),
            hostname: hostname.to_string(),
            fqdn: fqdn.to_string(),
        });
    }

    /// Add an interface with the next free id and return that id
    pub fn add_interface(
        &self,
        system_id: &str,
        interface_type: InterfaceType,
        name: &str,
        mac_address: &str,
    ) -> i64 {
        let mut inventory = self.inventory();
        let id = inventory.allocate_id();
        inventory
            .interfaces
            .entry(system_id.to_string())
            .or_default()
            .push(NetworkInterface {
                id,
                interface_type,
                name: name.to_string(),
                mac_address: mac_address.to_string(),
                vlan: None,
                parents: Vec::new(),
                tags: Vec::new(),
                effective_mtu: 1500,
            });
        id
    }

    /// Add an interface exactly as given; later allocations skip past its id
    pub fn insert_interface(&self, system_id: &str, iface: NetworkInterface) {
        let mut inventory = self.inventory();
        inventory.next_id = inventory.next_id.max(iface.id);
        inventory
            .interfaces
            .entry(system_id.to_string())
            .or_default()
            .push(iface);
    }

    pub fn interfaces(&self, system_id: &str) -> Vec<NetworkInterface> {
        self.inventory()
            .interfaces
            .get(system_id)
            .cloned()
            .unwrap_or_default()
    }

    pub fn create_calls(&self) -> usize {
        self.inventory().create_calls
    }

    pub fn update_calls(&self) -> usize {
        self.inventory().update_calls
    }

    pub fn delete_calls(&self) -> usize {
        self.inventory().delete_calls
    }
}

#[async_trait]
impl MaasApi for InMemoryMaas {
    async fn resolve_machine(&self, identifier: &str) -> BridgeResult<Machine> {
        self.inventory()
            .machines
            .iter()
            .find(|m| m.is_identified_by(identifier))
            .cloned()
            .ok_or_else(|| BridgeError::MachineNotFound(identifier.to_string()))
    }

    async fn list_interfaces(&self, system_id: &str) -> BridgeResult<Vec<NetworkInterface>> {
        let mut inventory = self.inventory();
        Ok(inventory.machine_interfaces(system_id)?.clone())
    }

    async fn get_interface(&self, system_id: &str, id: i64) -> BridgeResult<NetworkInterface> {
        let mut inventory = self.inventory();
        inventory
            .machine_interfaces(system_id)?
            .iter()
            .find(|n| n.id == id)
            .cloned()
            .ok_or_else(not_found)
    }

    async fn create_bridge(
        &self,
        system_id: &str,
        params: &BridgeParams,
    ) -> BridgeResult<NetworkInterface> {
        let mut inventory = self.inventory();
        inventory.create_calls += 1;
        let id = inventory.allocate_id();
        let interfaces = inventory.machine_interfaces(system_id)?;

        let mut parents = Vec::with_capacity(params.parents.len());
        for parent_id in &params.parents {
            let parent = interfaces
                .iter()
                .find(|n| n.id == *parent_id)
                .ok_or_else(|| bad_request(format!("parent {} does not exist", parent_id)))?;
            parents.push(parent.clone());
        }
        let first_parent = parents
            .first()
            .ok_or_else(|| bad_request("{\"parents\": [\"This field is required.\"]}"))?;

        let vlan = match &params.vlan {
            Some(vlan) => Some(parse_vlan(vlan)?),
            None => first_parent.vlan.clone(),
        };
        let bridge_count = interfaces.iter().filter(|n| n.is_bridge()).count();

        let bridge = NetworkInterface {
            id,
            interface_type: InterfaceType::Bridge,
            name: params
                .name
                .clone()
                .unwrap_or_else(|| format!("br{}", bridge_count)),
            mac_address: params.mac_address.clone(),
            vlan,
            parents: parents.iter().map(|p| p.name.clone()).collect(),
            tags: params.tags.iter().cloned().collect(),
            effective_mtu: params.mtu.unwrap_or(first_parent.effective_mtu),
        };
        interfaces.push(bridge.clone());

        debug!(system_id, id, "In-memory bridge created");
        Ok(bridge)
    }

    async fn update_interface(
        &self,
        system_id: &str,
        id: i64,
        params: &BridgeParams,
    ) -> BridgeResult<NetworkInterface> {
        let mut inventory = self.inventory();
        inventory.update_calls += 1;
        let iface = inventory
            .machine_interfaces(system_id)?
            .iter_mut()
            .find(|n| n.id == id)
            .ok_or_else(not_found)?;

        if let Some(name) = &params.name {
            iface.name = name.clone();
        }
        iface.mac_address = params.mac_address.clone();
        if let Some(vlan) = &params.vlan {
            iface.vlan = Some(parse_vlan(vlan)?);
        }
        iface.tags = params.tags.iter().cloned().collect();
        if let Some(mtu) = params.mtu {
            iface.effective_mtu = mtu;
        }

        Ok(iface.clone())
    }

    async fn delete_interface(&self, system_id: &str, id: i64) -> BridgeResult<()> {
        let mut inventory = self.inventory();
        inventory.delete_calls += 1;
        let interfaces = inventory.machine_interfaces(system_id)?;
        let position = interfaces
            .iter()
            .position(|n| n.id == id)
            .ok_or_else(not_found)?;
        interfaces.remove(position);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    fn maas() -> InMemoryMaas {
        let maas = InMemoryMaas::new();
        maas.add_machine("abc123", "node1", "node1.maas");
        maas
    }

    #[tokio::test]
    async fn test_create_bridge_inherits_from_parent() {
        let maas = maas();
        let eth0 = maas.add_interface("abc123", InterfaceType::Physical, "eth0", "52:54:00:00:00:01");

        let params = BridgeParams {
            mac_address: "52:54:00:00:00:01".to_string(),
            parents: vec![eth0],
            tags: BTreeSet::from(["a".to_string()]),
            ..Default::default()
        };
        let bridge = maas.create_bridge("abc123", &params).await.unwrap();

        assert_eq!(bridge.name, "br0");
        assert_eq!(bridge.parents, vec!["eth0".to_string()]);
        assert_eq!(bridge.effective_mtu, 1500);
        assert_eq!(maas.interfaces("abc123").len(), 2);
    }

    #[tokio::test]
    async fn test_create_bridge_requires_parent() {
        let maas = maas();
        let params = BridgeParams {
            mac_address: "52:54:00:00:00:01".to_string(),
            ..Default::default()
        };
        let err = maas.create_bridge("abc123", &params).await.unwrap_err();
        assert!(matches!(err, BridgeError::Api { status: 400, .. }));
    }

    #[tokio::test]
    async fn test_unknown_entities_are_404() {
        let maas = maas();
        assert!(maas.get_interface("abc123", 99).await.unwrap_err().is_not_found());
        assert!(maas.list_interfaces("nope").await.unwrap_err().is_not_found());
        assert!(maas.delete_interface("abc123", 99).await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_insert_interface_reserves_id() {
        let maas = maas();
        let iface = NetworkInterface {
            id: 40,
            interface_type: InterfaceType::Physical,
            name: "eth0".to_string(),
            mac_address: "52:54:00:00:00:01".to_string(),
            vlan: None,
            parents: Vec::new(),
            tags: Vec::new(),
            effective_mtu: 1500,
        };
        maas.insert_interface("abc123", iface);

        let next = maas.add_interface("abc123", InterfaceType::Physical, "eth1", "52:54:00:00:00:02");
        assert_eq!(next, 41);
    }
}
