// Copyright (c) 2025 - Cowboy AI, Inc.
//! Property-Based Tests for bridge lookup

use maas_bridge::domain::{InterfaceType, NetworkInterface};
use maas_bridge::resolver::find_bridge_in;
use proptest::prelude::*;

fn kind_strategy() -> impl Strategy<Value = InterfaceType> {
    prop_oneof![
        Just(InterfaceType::Physical),
        Just(InterfaceType::Bridge),
        Just(InterfaceType::Bond),
        Just(InterfaceType::Vlan),
    ]
}

/// Interfaces with unique ids, names, and MACs derived from their position
fn interfaces_strategy() -> impl Strategy<Value = Vec<NetworkInterface>> {
    prop::collection::vec(kind_strategy(), 0..12).prop_map(|kinds| {
        kinds
            .into_iter()
            .enumerate()
            .map(|(i, kind)| NetworkInterface {
                id: 100 + i as i64,
                interface_type: kind,
                name: format!("if{}", i),
                mac_address: format!("52:54:00:00:00:{:02x}", i),
                vlan: None,
                parents: Vec::new(),
                tags: Vec::new(),
                effective_mtu: 1500,
            })
            .collect()
    })
}

proptest! {
    /// Whatever the token, only bridges are ever returned
    #[test]
    fn prop_only_bridges_match(
        interfaces in interfaces_strategy(),
        pick in 0usize..12,
        field in 0u8..3,
    ) {
        prop_assume!(!interfaces.is_empty());
        let target = &interfaces[pick % interfaces.len()];
        let token = match field {
            0 => target.mac_address.clone(),
            1 => target.name.clone(),
            _ => target.id.to_string(),
        };

        match find_bridge_in(&interfaces, &token) {
            Some(found) => {
                prop_assert!(found.is_bridge());
                prop_assert_eq!(found.id, target.id);
            }
            None => prop_assert!(!target.is_bridge()),
        }
    }

    /// Every bridge can be found by each of its identifiers
    #[test]
    fn prop_every_bridge_resolvable(interfaces in interfaces_strategy()) {
        for bridge in interfaces.iter().filter(|n| n.is_bridge()) {
            let by_mac = find_bridge_in(&interfaces, &bridge.mac_address.to_uppercase()).map(|n| n.id);
            let by_name = find_bridge_in(&interfaces, &bridge.name).map(|n| n.id);
            let by_id = find_bridge_in(&interfaces, &bridge.id.to_string()).map(|n| n.id);
            prop_assert_eq!(by_mac, Some(bridge.id));
            prop_assert_eq!(by_name, Some(bridge.id));
            prop_assert_eq!(by_id, Some(bridge.id));
        }
    }
}
