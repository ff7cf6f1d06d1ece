// Copyright (c) 2025 - Cowboy AI, Inc.
//! Test Fixtures for maas-bridge
//!
//! Deterministic MAAS inventories shared by the integration tests. Interface
//! ids are fixed so assertions can name them directly.

#![allow(dead_code)]

use maas_bridge::adapters::InMemoryMaas;
use maas_bridge::domain::{InterfaceType, NetworkInterface, Vlan};

pub const MACHINE_ID: &str = "machine123";
pub const MACHINE_HOSTNAME: &str = "node1";
pub const MACHINE_FQDN: &str = "node1.maas";

pub const ETH0_ID: i64 = 3;
pub const ETH0_MAC: &str = "aa:bb:cc:dd:ee:ff";
pub const ETH1_ID: i64 = 4;
pub const ETH1_MAC: &str = "52:54:00:00:00:02";

pub const BRIDGE_ID: i64 = 10;
pub const BRIDGE_MAC: &str = "52:54:00:00:00:02";

pub fn interface(id: i64, kind: InterfaceType, name: &str, mac: &str) -> NetworkInterface {
    NetworkInterface {
        id,
        interface_type: kind,
        name: name.to_string(),
        mac_address: mac.to_string(),
        vlan: Some(Vlan { id: 5001, vid: 0 }),
        parents: Vec::new(),
        tags: Vec::new(),
        effective_mtu: 1500,
    }
}

/// One machine with two physical NICs and no bridges
pub fn bare_machine() -> InMemoryMaas {
    let maas = InMemoryMaas::new();
    maas.add_machine(MACHINE_ID, MACHINE_HOSTNAME, MACHINE_FQDN);
    maas.insert_interface(
        MACHINE_ID,
        interface(ETH0_ID, InterfaceType::Physical, "eth0", ETH0_MAC),
    );
    maas.insert_interface(
        MACHINE_ID,
        interface(ETH1_ID, InterfaceType::Physical, "eth1", ETH1_MAC),
    );
    maas
}

/// [`bare_machine`] plus an existing bridge `br1` on eth1
pub fn machine_with_bridge() -> InMemoryMaas {
    let maas = bare_machine();
    let mut bridge = interface(BRIDGE_ID, InterfaceType::Bridge, "br1", BRIDGE_MAC);
    bridge.parents = vec!["eth1".to_string()];
    bridge.tags = vec!["existing".to_string()];
    maas.insert_interface(MACHINE_ID, bridge);
    maas
}

/// Machine `m1`: a bridge and a physical NIC sharing one MAC
pub fn machine_m1() -> InMemoryMaas {
    let maas = InMemoryMaas::new();
    maas.add_machine("m1", "m1-host", "m1-host.maas");
    maas.insert_interface("m1", interface(5, InterfaceType::Bridge, "br0", "AA:BB"));
    maas.insert_interface("m1", interface(6, InterfaceType::Physical, "eth0", "AA:BB"));
    maas
}
