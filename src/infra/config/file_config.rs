use serde::Deserialize;

use crate::infra::config::{AppConfig, CompletionConfig, EventsConfig, LogConfig, WindowConfig};

#[derive(Debug, Deserialize, Default)]
pub struct FileConfig {
    pub logging: Option<FileLogConfig>,
    pub window: Option<FileWindowConfig>,
    pub events: Option<FileEventsConfig>,
    pub completion: Option<FileCompletionConfig>,
}

impl FileConfig {
    pub fn merge_into(self, config: &mut AppConfig) {
        if let Some(logging) = self.logging {
            logging.merge_into(&mut config.logging);
        }

        if let Some(window) = self.window {
            window.merge_into(&mut config.window);
        }

        if let Some(events) = self.events {
            events.merge_into(&mut config.events);
        }

        if let Some(completion) = self.completion {
            completion.merge_into(&mut config.completion);
        }
    }
}

#[derive(Debug, Deserialize, Default)]
pub struct FileLogConfig {
    pub level: Option<String>,
}

impl FileLogConfig {
    fn merge_into(self, config: &mut LogConfig) {
        if let Some(level) = self.level {
            config.level = level;
        }
    }
}

#[derive(Debug, Deserialize, Default)]
pub struct FileWindowConfig {
    pub title: Option<String>,
    pub width: Option<u32>,
    pub height: Option<u32>,
}

impl FileWindowConfig {
    fn merge_into(self, config: &mut WindowConfig) {
        if let Some(title) = self.title {
            config.title = title;
        }

        if let Some(width) = self.width {
            config.width = width;
        }

        if let Some(height) = self.height {
            config.height = height;
        }
    }
}

#[derive(Debug, Deserialize, Default)]
pub struct FileEventsConfig {
    pub sequence: Option<Vec<[u32; 2]>>,
}

impl FileEventsConfig {
    fn merge_into(self, config: &mut EventsConfig) {
        if let Some(sequence) = self.sequence {
            config.sequence = sequence;
        }
    }
}

#[derive(Debug, Deserialize, Default)]
pub struct FileCompletionConfig {
    pub wait: Option<bool>,
    pub timeout_ms: Option<u64>,
}

impl FileCompletionConfig {
    fn merge_into(self, config: &mut CompletionConfig) {
        if let Some(wait) = self.wait {
            config.wait = wait;
        }

        if let Some(timeout_ms) = self.timeout_ms {
            config.timeout_ms = Some(timeout_ms);
        }
    }
}
