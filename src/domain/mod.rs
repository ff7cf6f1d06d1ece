// Copyright (c) 2025 - Cowboy AI, Inc.
//! Bridge Domain Models
//!
//! Value objects and records exchanged between the reconciler and MAAS.
//!
//! - [`MacAddress`] - 48-bit MAC address validation and comparison
//! - [`Mtu`] - Maximum Transmission Unit within MAAS limits
//! - [`NetworkInterface`] / [`Machine`] - remote entities as MAAS reports them
//! - [`BridgeSpec`] - desired configuration of a bridge
//! - [`BridgeState`] - persisted record of a managed bridge
//! - [`BridgeParams`] - parameters sent on create and update

pub mod bridge;
pub mod interface;
pub mod network;

pub use bridge::{BridgeKind, BridgeParams, BridgeSpec, BridgeState};
pub use interface::{InterfaceType, Machine, NetworkInterface, Vlan};
pub use network::{MacAddress, Mtu, NetworkError};
