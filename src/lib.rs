// Copyright (c) 2025 - Cowboy AI, Inc.
//! Declarative bridge interfaces for MAAS machines
//!
//! Reconciles a desired bridge configuration against the live state held by
//! a MAAS region controller: find-or-create the bridge on a machine, converge
//! its name, VLAN, tags, and MTU, and read, update, delete, or import it by a
//! stable identifier.

pub mod adapters;
pub mod api;
pub mod domain;
pub mod errors;
pub mod reconciler;
pub mod resolver;

// Re-export commonly used types
pub use api::MaasApi;
pub use domain::{BridgeSpec, BridgeState};
pub use errors::{BridgeError, BridgeResult};
pub use reconciler::{BridgeReconciler, ImportId, Resource};
pub use resolver::Resolver;
