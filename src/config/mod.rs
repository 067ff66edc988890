//! User configuration (`config.toml`).

pub mod settings;

pub use settings::{Settings, DATA_DIR_NAME};
