//! Adapter implementations for tracker ports.

pub mod json;
pub mod memory;
