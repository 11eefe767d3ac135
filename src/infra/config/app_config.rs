use serde::{Deserialize, Serialize};

use crate::infra::error::AppError;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct AppConfig {
    pub logging: LogConfig,
    pub window: WindowConfig,
    pub events: EventsConfig,
    pub completion: CompletionConfig,
}

impl AppConfig {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.window.title.trim().is_empty() {
            return Err(AppError::ConfigInvalid {
                details: "window.title must not be empty".into(),
            });
        }

        if self.window.width == 0 || self.window.height == 0 {
            return Err(AppError::ConfigInvalid {
                details: format!(
                    "window size must be non-zero, got {}x{}",
                    self.window.width, self.window.height
                ),
            });
        }

        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LogConfig {
    pub level: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_owned(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "My Window".to_owned(),
            width: 800,
            height: 600,
        }
    }
}

/// Resize requests submitted by the `run` command, in order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EventsConfig {
    pub sequence: Vec<[u32; 2]>,
}

impl Default for EventsConfig {
    fn default() -> Self {
        Self {
            sequence: vec![
                [1024, 768],
                [644, 494],
                [800, 600],
                [200, 120],
                [900, 1144],
                [500, 100],
                [2140, 4116],
            ],
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CompletionConfig {
    pub wait: bool,
    /// Bounded wait in milliseconds; unset waits without limit.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_ms: Option<u64>,
}

impl Default for CompletionConfig {
    fn default() -> Self {
        Self {
            wait: true,
            timeout_ms: None,
        }
    }
}
