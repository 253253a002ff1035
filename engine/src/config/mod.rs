mod config_manager;
mod config_serializer;
mod content_provider;
mod engine_config;
mod validate;

pub use config_manager::ConfigManager;
pub use config_serializer::{ContentSerializer, YamlConfigSerializer};
pub use content_provider::{ContentProvider, FileContentProvider, MemoryContentProvider};
pub use engine_config::{AutoplayConfig, BoardConfig, EngineConfig, SearchConfig};
pub use validate::Validate;
