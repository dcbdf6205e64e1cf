//! Service layer.
//!
//! - BodyFs: virtual buffer provider over the document store
//! - config: settings file handling

pub mod body_fs;
pub mod config;

pub use body_fs::{BodyFs, BodyFsError, BufferFs, FileChange, FileStat, WatchId};
pub use config::{ensure_settings_file, load_settings, settings_path, WorkbenchConfig};
