//! Core framework abstractions.
//!
//! - HostEvent: lifecycle notifications inbound from the host
//! - Command: user-triggered command surface

pub mod command;
pub mod event;

pub use command::Command;
pub use event::HostEvent;
