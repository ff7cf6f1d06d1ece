// Copyright (c) 2025 - Cowboy AI, Inc.
//! Property-Based Tests Entry Point
//!
//! This test suite uses proptest to verify properties of identifier parsing
//! and bridge lookup that must hold for all valid inputs.

mod property;
