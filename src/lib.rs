pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use adapters::{CanvasClient, LocalStorage};
pub use config::{toml_config::TomlConfig, CliConfig};
pub use core::{etl::EtlEngine, pipeline::SyllabusPipeline};
pub use utils::error::{EtlError, Result};
