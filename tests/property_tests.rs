// Copyright (c) 2025 - Cowboy AI, Inc.
//! Property-Based Tests Entry Point
//!
//! Uses proptest to check that roster invariants hold for arbitrary
//! sequences of register and unregister requests.

mod property;
