pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use config::cli::LocalStorage;
#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::toml_config::TomlConfig;

pub use crate::core::analyze::AnalyzeTool;
pub use crate::core::combine::CombineTool;
pub use crate::core::engine::ToolboxEngine;
pub use crate::core::rename::RenameTool;
pub use utils::error::{Result, ToolboxError};
