//! Application layer: the selection/body coordinator.

pub mod coordinator;

pub use coordinator::Coordinator;
