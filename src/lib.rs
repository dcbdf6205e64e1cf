//! outliner - host-agnostic outline/body editor core
//!
//! Module structure:
//! - core: framework abstractions (HostEvent, Command)
//! - models: data models (Outline, Document, DocumentStore)
//! - host: boundary contracts satisfied by the embedding editor
//! - services: BodyFs virtual buffer provider, WorkbenchConfig
//! - app: Coordinator, the selection/body state machine

pub mod app;
pub mod core;
pub mod host;
pub mod logging;
pub mod models;
pub mod services;
