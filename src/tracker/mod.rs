//! User, project and task tracking with JSON persistence.
//!
//! Users own projects, projects own typed tasks, and the whole graph is
//! saved to and loaded from a single JSON document. The module follows
//! hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
