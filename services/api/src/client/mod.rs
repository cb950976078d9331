//! services/api/src/client/mod.rs
//!
//! The editor runtime used by planner front ends.

pub mod driver;

pub use driver::EditorDriver;
