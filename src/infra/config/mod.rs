mod app_config;
mod file_config;
mod loader;

pub use app_config::{AppConfig, CompletionConfig, EventsConfig, LogConfig, WindowConfig};
pub use loader::load;
