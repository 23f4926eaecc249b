//! Taskboard: users, projects and typed tasks with JSON persistence.
//!
//! Users own projects, which own development, QA and documentation tasks.
//! The whole graph round-trips through a JSON document between runs.
//!
//! # Architecture
//!
//! Taskboard follows hexagonal architecture principles:
//!
//! - **Domain**: Entities, identity rules and identifier allocation
//! - **Ports**: The storage contract used by the service layer
//! - **Adapters**: JSON file and in-memory stores
//!
//! # Modules
//!
//! - [`tracker`]: Entity model, persistence and the tracker service
//! - [`config`]: Data file location

pub mod config;
pub mod tracker;
