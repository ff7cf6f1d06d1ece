// Copyright (c) 2025 - Cowboy AI, Inc.

//! Remote service capability
//!
//! [`MaasApi`] is the only way the reconciler talks to MAAS. It is passed
//! explicitly into [`BridgeReconciler`](crate::reconciler::BridgeReconciler)
//! so that the HTTP adapter, the in-memory adapter, or a test double can be
//! swapped in without touching lifecycle logic.
//!
//! # Example Implementation
//!
//! ```rust,no_run
//! use async_trait::async_trait;
//! use maas_bridge::api::MaasApi;
//! use maas_bridge::domain::{BridgeParams, Machine, NetworkInterface};
//! use maas_bridge::errors::{BridgeError, BridgeResult};
//!
//! struct Offline;
//!
//! #[async_trait]
//! impl MaasApi for Offline {
//!     async fn resolve_machine(&self, identifier: &str) -> BridgeResult<Machine> {
//!         Err(BridgeError::MachineNotFound(identifier.to_string()))
//!     }
//!
//!     async fn list_interfaces(&self, _system_id: &str) -> BridgeResult<Vec<NetworkInterface>> {
//!         Ok(Vec::new())
//!     }
//!
//!     async fn get_interface(&self, _system_id: &str, _id: i64) -> BridgeResult<NetworkInterface> {
//!         Err(BridgeError::Transport("offline".into()))
//!     }
//!
//!     async fn create_bridge(
//!         &self,
//!         _system_id: &str,
//!         _params: &BridgeParams,
//!     ) -> BridgeResult<NetworkInterface> {
//!         Err(BridgeError::Transport("offline".into()))
//!     }
//!
//!     async fn update_interface(
//!         &self,
//!         _system_id: &str,
//!         _id: i64,
//!         _params: &BridgeParams,
//!     ) -> BridgeResult<NetworkInterface> {
//!         Err(BridgeError::Transport("offline".into()))
//!     }
//!
//!     async fn delete_interface(&self, _system_id: &str, _id: i64) -> BridgeResult<()> {
//!         Err(BridgeError::Transport("offline".into()))
//!     }
//! }
//! ```

use async_trait::async_trait;

use crate::domain::{BridgeParams, Machine, NetworkInterface};
use crate::errors::BridgeResult;

/// Operations the reconciler needs from MAAS
///
/// Implementations report failures as-is; the reconciler never retries.
#[async_trait]
pub trait MaasApi: Send + Sync {
    /// Map a system ID, hostname, or FQDN to the machine record
    async fn resolve_machine(&self, identifier: &str) -> BridgeResult<Machine>;

    /// All interfaces on a machine, in the order MAAS returns them
    async fn list_interfaces(&self, system_id: &str) -> BridgeResult<Vec<NetworkInterface>>;

    async fn get_interface(&self, system_id: &str, id: i64) -> BridgeResult<NetworkInterface>;

    async fn create_bridge(
        &self,
        system_id: &str,
        params: &BridgeParams,
    ) -> BridgeResult<NetworkInterface>;

    async fn update_interface(
        &self,
        system_id: &str,
        id: i64,
        params: &BridgeParams,
    ) -> BridgeResult<NetworkInterface>;

    async fn delete_interface(&self, system_id: &str, id: i64) -> BridgeResult<()>;
}
