// Copyright (c) 2025 - Cowboy AI, Inc.
//! Lifecycle reconciliation
//!
//! A [`Resource`] exposes the entry points a declarative driver calls for one
//! managed entity. Each entry point is independent: it re-resolves the
//! machine, talks to MAAS, and leaves the outcome in the state record the
//! caller persists.
//!
//! ```text
//! create ──▶ find-or-create ──▶ persist id ──▶ update ──▶ read
//! update ──▶ full overwrite ──▶ read
//! read   ──▶ partial refresh (name, tags, mtu)
//! delete ──▶ remote delete
//! import ──▶ MACHINE:IFACE ──▶ require bridge ──▶ full state
//! ```
//!
//! Nothing is retried. When `update` fails right after a successful create
//! the id is already in the state record, so the caller can still track the
//! bridge.

pub mod bridge;
pub mod import;

pub use bridge::BridgeReconciler;
pub use import::ImportId;

use async_trait::async_trait;

use crate::errors::BridgeResult;

/// Create/read/update/delete/import over a typed desired and state pair
#[async_trait]
pub trait Resource: Send + Sync {
    /// Declarative input
    type Desired: Send + Sync;

    /// Persisted record; an empty identifier means "not created yet"
    type State: Send + Sync;

    /// Find or create the entity, record its identifier, then converge it
    async fn create(&self, desired: &Self::Desired, state: &mut Self::State) -> BridgeResult<()>;

    /// Refresh the state from the remote service
    async fn read(&self, state: &mut Self::State) -> BridgeResult<()>;

    /// Push the desired attributes, then refresh
    async fn update(&self, desired: &Self::Desired, state: &mut Self::State) -> BridgeResult<()>;

    /// Remove the entity remotely
    async fn delete(&self, state: &Self::State) -> BridgeResult<()>;

    /// Build state for an entity that already exists remotely
    async fn import(&self, id: &str) -> BridgeResult<Self::State>;
}
