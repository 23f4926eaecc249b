//! Step definitions for tracker persistence scenarios.

mod given;
mod then;
mod when;
pub mod world;
