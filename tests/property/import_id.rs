// Copyright (c) 2025 - Cowboy AI, Inc.
//! Property-Based Tests for `MACHINE:NETWORK_INTERFACE` parsing

use maas_bridge::{BridgeError, ImportId};
use proptest::prelude::*;

/// System IDs, hostnames, and FQDNs never contain a colon
fn machine_strategy() -> impl Strategy<Value = String> {
    "[a-z0-9][a-z0-9.-]{0,30}"
}

fn mac_strategy() -> impl Strategy<Value = String> {
    prop::array::uniform6(any::<u8>()).prop_map(|o| {
        format!(
            "{:02X}:{:02X}:{:02X}:{:02X}:{:02X}:{:02X}",
            o[0], o[1], o[2], o[3], o[4], o[5]
        )
    })
}

fn interface_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        mac_strategy(),
        "[a-z][a-z0-9.-]{0,14}",
        (1i64..100_000).prop_map(|id| id.to_string()),
    ]
}

proptest! {
    /// Parsing then formatting returns the same token
    #[test]
    fn prop_parse_display_identity(
        machine in machine_strategy(),
        interface in interface_strategy(),
    ) {
        let token = format!("{}:{}", machine, interface);
        let id = ImportId::parse(&token).unwrap();

        prop_assert_eq!(&id.machine, &machine);
        prop_assert_eq!(&id.interface, &interface);
        prop_assert_eq!(id.to_string(), token);
    }

    /// A token without an interface part never parses
    #[test]
    fn prop_missing_interface_rejected(machine in machine_strategy()) {
        prop_assert!(matches!(
            ImportId::parse(&machine),
            Err(BridgeError::MalformedImportId(_))
        ));
        let with_colon = format!("{}:", machine);
        prop_assert!(matches!(
            ImportId::parse(&with_colon),
            Err(BridgeError::MalformedImportId(_))
        ));
    }

    /// A token without a machine part never parses
    #[test]
    fn prop_missing_machine_rejected(interface in interface_strategy()) {
        let token = format!(":{}", interface);
        prop_assert!(ImportId::parse(&token).is_err());
    }
}
