// Copyright (c) 2025 - Cowboy AI, Inc.

//! MAAS adapter implementations
//!
//! This module contains concrete implementations of the [`MaasApi`](crate::api::MaasApi)
//! trait: the HTTP client for a real region controller and an in-memory
//! inventory for tests and dry runs.

pub mod memory;

pub use memory::InMemoryMaas;

#[cfg(feature = "maas")]
pub mod maas;

#[cfg(feature = "maas")]
pub use maas::{MaasClient, MaasConfig, MaasVersion};
