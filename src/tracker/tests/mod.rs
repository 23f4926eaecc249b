//! Unit tests for the tracker module.
//!
//! Tests are organised by component: entity behaviour, identity rules and
//! allocation, JSON projection and hydration, and the service layer.

mod identity_tests;
mod project_tests;
